//! Album record types

use serde::{Deserialize, Serialize};

pub type AlbumId = i64;

/// A stored album record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AlbumRecord {
    pub id: AlbumId,
    pub name: String,
    pub artist: String,
    /// Release year, 0 when unknown
    pub year: i64,
    pub condition: String,
    /// Public path of the uploaded photo (`/uploads/...`), empty when none
    pub image: String,
    /// Comma-joined genre tags
    pub genre: String,
    pub external_id: Option<String>,
    pub external_uri: Option<String>,
    pub external_image_url: Option<String>,
    pub price_estimate: Option<String>,
    pub price_low: Option<String>,
    pub price_high: Option<String>,
}

/// Data for inserting a new album record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAlbumRecord {
    pub name: String,
    pub artist: String,
    pub year: i64,
    pub condition: String,
    pub image: String,
    pub genre: String,
    pub external_id: Option<String>,
    pub external_uri: Option<String>,
    pub external_image_url: Option<String>,
    pub price_estimate: Option<String>,
    pub price_low: Option<String>,
    pub price_high: Option<String>,
}

impl NewAlbumRecord {
    /// Attach the generated id, yielding the stored shape
    pub fn into_record(self, id: AlbumId) -> AlbumRecord {
        AlbumRecord {
            id,
            name: self.name,
            artist: self.artist,
            year: self.year,
            condition: self.condition,
            image: self.image,
            genre: self.genre,
            external_id: self.external_id,
            external_uri: self.external_uri,
            external_image_url: self.external_image_url,
            price_estimate: self.price_estimate,
            price_low: self.price_low,
            price_high: self.price_high,
        }
    }
}

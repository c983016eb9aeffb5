//! Album submission payloads

use crate::lenient;
use serde::{Deserialize, Serialize};

/// Genre as sent by clients: either a tag list or a ready-made string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenreField {
    Tags(Vec<String>),
    Text(String),
}

impl GenreField {
    /// Tags joined with `", "`; text passes through unchanged
    pub fn joined(&self) -> String {
        match self {
            GenreField::Tags(tags) => tags.join(", "),
            GenreField::Text(text) => text.clone(),
        }
    }
}

/// One item of an album submission batch.
///
/// Accepts the fields of an approved `SearchCandidate` as well as the raw
/// Discogs names (`id`, `uri`, `cover_image`, `price`, `low`, `high`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumSubmission {
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub year: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub genre: Option<GenreField>,
    /// Catalog genre list, used when `genre` is absent
    #[serde(default)]
    pub genres: Option<GenreField>,
    #[serde(default, alias = "id", deserialize_with = "lenient::string")]
    pub external_id: Option<String>,
    #[serde(default, alias = "uri", deserialize_with = "lenient::string")]
    pub external_uri: Option<String>,
    #[serde(
        default,
        alias = "image_url",
        alias = "cover_image",
        deserialize_with = "lenient::string"
    )]
    pub external_image_url: Option<String>,
    #[serde(default, alias = "thumb", deserialize_with = "lenient::string")]
    pub thumb_url: Option<String>,
    #[serde(default, alias = "price", deserialize_with = "lenient::string")]
    pub price_estimate: Option<String>,
    #[serde(default, alias = "low", deserialize_with = "lenient::string")]
    pub price_low: Option<String>,
    #[serde(default, alias = "high", deserialize_with = "lenient::string")]
    pub price_high: Option<String>,
    /// Embedded photo as a `data:image/...;base64,` URL
    #[serde(default, alias = "uploadImage")]
    pub upload_image: Option<String>,
}

impl AlbumSubmission {
    /// Album title, falling back to the catalog `title` field
    pub fn album_title(&self) -> Option<&str> {
        non_empty(self.album.as_deref()).or_else(|| non_empty(self.title.as_deref()))
    }

    pub fn artist_name(&self) -> Option<&str> {
        non_empty(self.artist.as_deref())
    }

    /// Edited `genre`, falling back to the catalog `genres` list
    pub fn genre_field(&self) -> Option<&GenreField> {
        self.genre.as_ref().or(self.genres.as_ref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

//! Marketplace search types

use super::ConditionGrade;
use crate::lenient;
use serde::{Deserialize, Serialize};

/// Placeholder the recognizer emits for fields it could not read
const UNKNOWN_PLACEHOLDER: &str = "Unknown";

/// Search request for a catalog lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub year: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
}

impl SearchQuery {
    pub fn artist_term(&self) -> Option<&str> {
        usable_term(self.artist.as_deref())
    }

    pub fn album_term(&self) -> Option<&str> {
        usable_term(self.album.as_deref())
    }

    pub fn year_term(&self) -> Option<&str> {
        usable_term(self.year.as_deref())
    }

    /// Declared condition, if it is one of the canonical grades
    pub fn condition_grade(&self) -> Option<ConditionGrade> {
        self.condition.as_deref().and_then(ConditionGrade::parse)
    }
}

fn usable_term(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != UNKNOWN_PLACEHOLDER)
}

/// A marketplace release matching a search, optionally priced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub external_id: i64,
    pub title: String,
    pub artist: Option<String>,
    pub year: Option<String>,
    pub image_url: Option<String>,
    pub thumb_url: Option<String>,
    pub uri: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    pub price_low: Option<f64>,
    pub price_high: Option<f64>,
    pub price_estimate: Option<f64>,
    /// Set when the price lookup for this candidate failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_error: Option<String>,
}

impl SearchCandidate {
    pub fn is_priced(&self) -> bool {
        self.price_low.is_some() || self.price_high.is_some() || self.price_estimate.is_some()
    }
}

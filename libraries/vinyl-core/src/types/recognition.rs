//! Image recognition result

use super::ConditionGrade;
use crate::lenient;
use serde::{Deserialize, Serialize};

/// Best-effort identification of a record from a photo.
///
/// Field names follow the JSON object the vision service is asked to return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionGuess {
    pub artist: String,
    pub album: String,
    /// Empty when the year is not visible
    #[serde(default, deserialize_with = "lenient::text")]
    pub year: String,
    #[serde(default)]
    pub pressing: String,
    pub condition: String,
    #[serde(default)]
    pub condition_notes: String,
    #[serde(default)]
    pub cover_condition: String,
    #[serde(default)]
    pub confidence: String,
}

impl RecognitionGuess {
    pub fn condition_grade(&self) -> Option<ConditionGrade> {
        ConditionGrade::parse(&self.condition)
    }
}

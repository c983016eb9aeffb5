//! Record condition grading

use serde::{Deserialize, Serialize};
use std::fmt;

/// Goldmine-style condition grade for a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionGrade {
    Mint,
    #[serde(rename = "Near Mint")]
    NearMint,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl ConditionGrade {
    /// All grades, best first
    pub const ALL: [ConditionGrade; 6] = [
        ConditionGrade::Mint,
        ConditionGrade::NearMint,
        ConditionGrade::VeryGood,
        ConditionGrade::Good,
        ConditionGrade::Fair,
        ConditionGrade::Poor,
    ];

    /// Parse a grade name, ignoring case and surrounding whitespace.
    ///
    /// Anything other than the six canonical names yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|grade| grade.as_str().eq_ignore_ascii_case(input))
    }

    /// Canonical display name
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionGrade::Mint => "Mint",
            ConditionGrade::NearMint => "Near Mint",
            ConditionGrade::VeryGood => "Very Good",
            ConditionGrade::Good => "Good",
            ConditionGrade::Fair => "Fair",
            ConditionGrade::Poor => "Poor",
        }
    }

    /// Label used by the Discogs marketplace price suggestions
    pub fn marketplace_label(&self) -> &'static str {
        match self {
            ConditionGrade::Mint => "Mint (M)",
            ConditionGrade::NearMint => "Near Mint (NM or M-)",
            ConditionGrade::VeryGood => "Very Good (VG)",
            ConditionGrade::Good => "Good (G)",
            ConditionGrade::Fair => "Fair (F)",
            ConditionGrade::Poor => "Poor (P)",
        }
    }
}

impl fmt::Display for ConditionGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

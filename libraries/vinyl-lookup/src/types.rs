//! Client configuration and service payload types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Connection settings for the Discogs API.
#[derive(Debug, Clone)]
pub struct DiscogsConfig {
    /// Base URL (e.g., "https://api.discogs.com")
    pub base_url: String,
    /// Consumer key used for database search
    pub api_key: Option<String>,
    /// Consumer secret used for database search
    pub api_secret: Option<String>,
    /// Personal access token used for marketplace price suggestions
    pub personal_token: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Discogs rejects requests without a descriptive user agent
    pub user_agent: String,
}

impl DiscogsConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.discogs.com";

    /// Config with all credentials set, pointing at `base_url`.
    pub fn with_credentials(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        personal_token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
            personal_token: Some(personal_token.into()),
            ..Self::default()
        }
    }
}

impl Default for DiscogsConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_secret: None,
            personal_token: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: default_user_agent(),
        }
    }
}

/// Connection settings for the vision (messages) API.
#[derive(Debug, Clone)]
pub struct RecognitionConfig {
    /// Base URL (e.g., "https://api.anthropic.com")
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    /// Value of the `anthropic-version` header
    pub api_version: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl RecognitionConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.anthropic.com";
    pub const DEFAULT_MODEL: &'static str = "claude-sonnet-4-20250514";
    pub const DEFAULT_API_VERSION: &'static str = "2023-06-01";

    pub fn with_api_key(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: Self::DEFAULT_MODEL.to_string(),
            max_tokens: 1000,
            api_version: Self::DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

fn default_user_agent() -> String {
    format!("VinylVault/{}", env!("CARGO_PKG_VERSION"))
}

// =============================================================================
// Marketplace Types
// =============================================================================

/// Suggested price for one condition grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSuggestion {
    #[serde(default)]
    pub currency: Option<String>,
    pub value: f64,
}

/// Price suggestions for a release, keyed by marketplace grade label
/// (e.g. `"Very Good (VG)"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSuggestions(pub HashMap<String, PriceSuggestion>);

impl PriceSuggestions {
    pub fn value_for(&self, label: &str) -> Option<f64> {
        self.0.get(label).map(|s| s.value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for PriceSuggestions {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(label, value)| {
                    (
                        label.into(),
                        PriceSuggestion {
                            currency: None,
                            value,
                        },
                    )
                })
                .collect(),
        )
    }
}

/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use vinyl_lookup::{DiscogsConfig, RecognitionConfig};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub recognition: RecognitionSettings,

    #[serde(default)]
    pub discogs: DiscogsSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request body limit; photos arrive base64 encoded inside JSON
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecognitionSettings {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_recognition_base_url")]
    pub base_url: String,

    #[serde(default = "default_recognition_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_recognition_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscogsSettings {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub api_secret: Option<String>,

    #[serde(default)]
    pub personal_token: Option<String>,

    #[serde(default = "default_discogs_base_url")]
    pub base_url: String,

    #[serde(default = "default_discogs_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub user_agent: Option<String>,
}

impl ServerConfig {
    /// Load configuration from file and environment.
    ///
    /// Reads `path` when given, else `config.toml` if present, then applies
    /// `VINYL_`-prefixed environment overrides (`VINYL_DISCOGS__API_KEY`).
    /// Conventional service variables fill any value still unset.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("VINYL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let mut loaded: Self = config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        loaded.apply_fallbacks(|name| std::env::var(name).ok());
        Ok(loaded)
    }

    /// Fill unset values from the conventional service variables
    pub fn apply_fallbacks<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fill = |slot: &mut Option<String>, name: &str| {
            let is_set = matches!(slot.as_deref(), Some(v) if !v.trim().is_empty());
            if !is_set {
                if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                    *slot = Some(value);
                }
            }
        };

        fill(&mut self.recognition.api_key, "ANTHROPIC_API_KEY");
        fill(&mut self.discogs.api_key, "DISCOGS_API_KEY");
        fill(&mut self.discogs.api_secret, "DISCOGS_API_SECRET");
        fill(&mut self.discogs.personal_token, "DISCOGS_API_PERSONAL_TOKEN");

        if self.storage.database_url == default_database_url() {
            if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
                self.storage.database_url = url;
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config(
                "Port must be non-zero (set VINYL_SERVER__PORT)".to_string(),
            ));
        }

        if self.storage.database_url.trim().is_empty() {
            return Err(ServerError::Config(
                "Database URL is required (set VINYL_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        if self.server.max_body_bytes == 0 {
            return Err(ServerError::Config(
                "Body limit must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn discogs_config(&self) -> DiscogsConfig {
        let settings = &self.discogs;
        let defaults = DiscogsConfig::default();
        DiscogsConfig {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            api_secret: settings.api_secret.clone(),
            personal_token: settings.personal_token.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
            user_agent: settings
                .user_agent
                .clone()
                .unwrap_or(defaults.user_agent),
            connect_timeout: defaults.connect_timeout,
        }
    }

    pub fn recognition_config(&self) -> RecognitionConfig {
        let settings = &self.recognition;
        RecognitionConfig {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            api_version: settings.api_version.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
            ..RecognitionConfig::default()
        }
    }
}

// Default values
impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            uploads_dir: default_uploads_dir(),
        }
    }
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_recognition_base_url(),
            model: default_recognition_model(),
            max_tokens: default_max_tokens(),
            api_version: default_api_version(),
            timeout_secs: default_recognition_timeout_secs(),
        }
    }
}

impl Default for DiscogsSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            personal_token: None,
            base_url: default_discogs_base_url(),
            timeout_secs: default_discogs_timeout_secs(),
            user_agent: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_body_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_database_url() -> String {
    "sqlite://./data/vinyl.db".to_string()
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("./static/uploads")
}

fn default_recognition_base_url() -> String {
    RecognitionConfig::DEFAULT_BASE_URL.to_string()
}

fn default_recognition_model() -> String {
    RecognitionConfig::DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_api_version() -> String {
    RecognitionConfig::DEFAULT_API_VERSION.to_string()
}

fn default_recognition_timeout_secs() -> u64 {
    60
}

fn default_discogs_base_url() -> String {
    DiscogsConfig::DEFAULT_BASE_URL.to_string()
}

fn default_discogs_timeout_secs() -> u64 {
    30
}

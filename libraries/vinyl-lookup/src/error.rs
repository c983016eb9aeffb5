//! Error types for the external lookup clients.

use thiserror::Error;

/// Errors that can occur when calling the catalog or recognition services.
#[derive(Error, Debug)]
pub enum LookupError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// A credential required for this call is not configured
    #[error("{0} not configured")]
    MissingCredentials(&'static str),

    /// Invalid service base URL
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse service response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Input rejected before calling the service
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Search completed but matched nothing
    #[error("No results found for this album")]
    NoResults,
}

impl LookupError {
    /// True for errors caused by missing or invalid local configuration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LookupError::MissingCredentials(_) | LookupError::InvalidUrl(_)
        )
    }
}

/// Result type for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;

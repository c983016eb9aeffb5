/// Core error types for Vinyl Vault
use thiserror::Error;

/// Result type alias using `VinylError`
pub type Result<T> = std::result::Result<T, VinylError>;

/// Core error type for Vinyl Vault
#[derive(Error, Debug)]
pub enum VinylError {
    /// Malformed or missing request fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up
        entity: String,
        /// Identifier that was looked up
        id: String,
    },
}

impl VinylError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use vinyl_core::VinylError;
use vinyl_lookup::LookupError;
use vinyl_storage::StorageError;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] StorageError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<VinylError> for ServerError {
    fn from(err: VinylError) -> Self {
        match err {
            VinylError::Validation(msg) => ServerError::BadRequest(msg),
            VinylError::NotFound { entity, id } => {
                ServerError::NotFound(format!("{} {} not found", entity, id))
            }
            VinylError::Storage(msg) => ServerError::Storage(msg),
        }
    }
}

impl ServerError {
    /// Status code and client-facing message
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Database(StorageError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                format!("{} {} not found", entity, id),
            ),
            ServerError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ServerError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error".to_string(),
                )
            }
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            ServerError::Io(e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
            ServerError::Lookup(e) => lookup_status(e),
        }
    }
}

fn lookup_status(err: &LookupError) -> (StatusCode, String) {
    match err {
        LookupError::NoResults => (StatusCode::NOT_FOUND, err.to_string()),
        LookupError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        LookupError::Upstream { status, message } => {
            tracing::error!(status, "Upstream service error: {}", message);
            let status =
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, message.clone())
        }
        LookupError::MissingCredentials(_) | LookupError::InvalidUrl(_) => {
            tracing::error!("Lookup configuration error: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        LookupError::Request(_) | LookupError::ParseError(_) => {
            tracing::error!("Lookup error: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

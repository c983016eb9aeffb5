//! Vinyl Vault Server Library
//!
//! HTTP service for cataloguing vinyl records: photo recognition, Discogs
//! search with price enrichment, and album storage.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{StoredUpload, UploadStorage};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};
use vinyl_lookup::{DiscogsClient, RecognitionClient};
use vinyl_storage::Database;

/// Build the application state from configuration
pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let db = Database::connect(&config.storage.database_url).await?;
    tracing::info!("Database connected");

    let uploads = UploadStorage::new(config.storage.uploads_dir.clone());
    uploads.initialize().await?;
    tracing::info!("Upload storage initialized at {:?}", uploads.base_path());

    let discogs = Arc::new(DiscogsClient::new(config.discogs_config())?);
    let recognition = Arc::new(RecognitionClient::new(config.recognition_config())?);

    Ok(AppState::new(
        db,
        Arc::new(uploads),
        discogs.clone(),
        discogs,
        recognition,
    ))
}

/// Build the router with all routes and layers
pub fn create_router(app_state: AppState, max_body_bytes: usize) -> Router {
    let uploads_dir = app_state.uploads.base_path().to_path_buf();

    Router::new()
        .route("/health", get(api::health::health))
        .route("/albums-list", get(api::albums::list_albums))
        .route("/albums-submit", post(api::albums::submit_albums))
        .route("/recognize", post(api::recognize::recognize))
        .route("/search-enrich", post(api::search::search_enrich))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Health check API routes
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub albums: i64,
}

/// GET /health - Health check endpoint, also confirms the database answers
pub async fn health(State(app_state): State<AppState>) -> crate::error::Result<Json<HealthResponse>> {
    let albums = app_state.db.count_albums().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        albums,
    }))
}

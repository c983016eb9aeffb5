/// Catalog search API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use vinyl_core::{SearchCandidate, SearchQuery};
use vinyl_lookup::enrich_top_candidate;

/// POST /search-enrich
/// Search Discogs and return the top match priced for the declared condition
pub async fn search_enrich(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<SearchQuery>, JsonRejection>,
) -> Result<Json<SearchCandidate>> {
    let Json(query) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    tracing::debug!(
        artist = ?query.artist,
        album = ?query.album,
        condition = ?query.condition,
        "Search enrich request"
    );

    let top = enrich_top_candidate(&*app_state.catalog, &*app_state.prices, &query).await?;
    Ok(Json(top))
}

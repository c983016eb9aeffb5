/// Album catalog API routes
use crate::{error::Result, services, state::AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use vinyl_core::{AlbumRecord, AlbumSubmission};

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub albums: Vec<AlbumRecord>,
}

/// GET /albums-list
pub async fn list_albums(State(app_state): State<AppState>) -> Result<Json<Vec<AlbumRecord>>> {
    let albums = app_state.db.list_albums().await?;
    Ok(Json(albums))
}

/// POST /albums-submit
///
/// Failures answer `{success: false, error}` rather than the plain error body.
pub async fn submit_albums(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<Vec<AlbumSubmission>>, JsonRejection>,
) -> Response {
    let submissions = match payload {
        Ok(Json(submissions)) => submissions,
        Err(rejection) => {
            return failure(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let timestamp_ms = chrono::Utc::now().timestamp_millis();

    match services::submit_albums(
        &app_state.db,
        &app_state.uploads,
        &submissions,
        timestamp_ms,
    )
    .await
    {
        Ok(albums) => Json(SubmitResponse {
            success: true,
            albums,
        })
        .into_response(),
        Err(e) => {
            let (status, message) = e.status_and_message();
            failure(status, message)
        }
    }
}

fn failure(status: StatusCode, error: String) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": error,
        })),
    )
        .into_response()
}

/// Image recognition API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use bytes::Bytes;
use vinyl_core::RecognitionGuess;

/// Form field carrying the photo
const IMAGE_FIELD: &str = "image";

struct UploadedImage {
    data: Bytes,
    media_type: String,
}

/// POST /recognize
/// Identify a record from a multipart photo upload
pub async fn recognize(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RecognitionGuess>> {
    let image = read_image_field(&headers, body).await?;

    tracing::debug!(
        bytes = image.data.len(),
        media_type = %image.media_type,
        "Recognizing uploaded image"
    );

    let guess = app_state
        .recognition
        .recognize(&image.data, &image.media_type)
        .await?;

    Ok(Json(guess))
}

async fn read_image_field(headers: &HeaderMap, body: Bytes) -> Result<UploadedImage> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    if !content_type.starts_with("multipart/form-data") {
        return Err(ServerError::BadRequest(
            "Expected multipart/form-data".to_string(),
        ));
    }

    let boundary = multer::parse_boundary(content_type)
        .map_err(|_| ServerError::BadRequest("Missing boundary".to_string()))?;

    // Convert Bytes to a stream for multer
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let media_type = field
            .content_type()
            .map(ToString::to_string)
            .filter(|m| m.starts_with("image/"))
            .or_else(|| {
                field
                    .file_name()
                    .and_then(|name| mime_guess::from_path(name).first())
                    .map(|m| m.essence_str().to_string())
            })
            .unwrap_or_else(|| "image/jpeg".to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Failed to read image: {}", e)))?;

        if data.is_empty() {
            break;
        }

        if !media_type.starts_with("image/") {
            return Err(ServerError::BadRequest(format!(
                "Unsupported image type: {}",
                media_type
            )));
        }

        return Ok(UploadedImage { data, media_type });
    }

    Err(ServerError::BadRequest("No image provided".to_string()))
}

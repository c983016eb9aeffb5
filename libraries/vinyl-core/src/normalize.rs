//! Mapping of submitted candidates into storable album records

use crate::error::{Result, VinylError};
use crate::types::{AlbumSubmission, ConditionGrade, GenreField, NewAlbumRecord};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Public URL prefix under which uploaded photos are served
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

const DATA_URL_IMAGE_PREFIX: &str = "data:image";
const FALLBACK_ALBUM_COMPONENT: &str = "unknown";

/// Strip everything outside `[A-Za-z0-9]` and lowercase the rest
pub fn sanitize_component(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// File name for an uploaded photo: `<timestamp>_<artist>_<album>.jpg`
pub fn upload_file_name(timestamp_ms: i64, artist: &str, album: &str) -> String {
    format!(
        "{}_{}_{}.jpg",
        timestamp_ms,
        sanitize_component(artist),
        sanitize_component(album)
    )
}

/// Parse the leading integer of a year field, 0 when there is none
pub fn parse_year(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 0;
    };
    let digits: String = raw
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

/// Canonical grade name for a submitted condition, empty when unrecognized
pub fn canonical_condition(raw: Option<&str>) -> String {
    raw.and_then(ConditionGrade::parse)
        .map(|grade| grade.as_str().to_string())
        .unwrap_or_default()
}

/// Decoded photo embedded in a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    bytes: Vec<u8>,
}

impl ImagePayload {
    /// Decode a `data:image/<type>;base64,<data>` URL.
    ///
    /// Returns `Ok(None)` for values that are not image data URLs at all.
    pub fn from_data_url(value: &str) -> Result<Option<Self>> {
        if !value.starts_with(DATA_URL_IMAGE_PREFIX) {
            return Ok(None);
        }

        let (header, data) = value
            .split_once(',')
            .ok_or_else(|| VinylError::validation("Image data URL has no payload"))?;

        if !header.ends_with(";base64") {
            return Err(VinylError::validation(
                "Image data URL must be base64 encoded",
            ));
        }

        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| VinylError::validation(format!("Invalid base64 image: {}", e)))?;

        if bytes.is_empty() {
            return Err(VinylError::validation("Image payload is empty"));
        }

        Ok(Some(Self { bytes }))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AlbumSubmission {
    /// Decode the embedded photo, if any
    pub fn image_payload(&self) -> Result<Option<ImagePayload>> {
        match self.upload_image.as_deref() {
            Some(value) => ImagePayload::from_data_url(value),
            None => Ok(None),
        }
    }

    /// Upload file name for this submission's photo
    pub fn upload_file_name(&self, timestamp_ms: i64) -> String {
        upload_file_name(
            timestamp_ms,
            self.artist_name().unwrap_or_default(),
            self.album_title().unwrap_or(FALLBACK_ALBUM_COMPONENT),
        )
    }
}

impl NewAlbumRecord {
    /// Map a submission into the stored shape.
    ///
    /// `image` is the public path of an already stored photo, or empty.
    pub fn from_submission(submission: &AlbumSubmission, image: String) -> Self {
        Self {
            name: submission.album_title().unwrap_or_default().to_string(),
            artist: submission.artist.clone().unwrap_or_default(),
            year: parse_year(submission.year.as_deref()),
            condition: canonical_condition(submission.condition.as_deref()),
            image,
            genre: submission
                .genre_field()
                .map(GenreField::joined)
                .unwrap_or_default(),
            external_id: submission.external_id.clone(),
            external_uri: submission.external_uri.clone(),
            external_image_url: submission
                .external_image_url
                .clone()
                .or_else(|| submission.thumb_url.clone()),
            price_estimate: submission.price_estimate.clone(),
            price_low: submission.price_low.clone(),
            price_high: submission.price_high.clone(),
        }
    }
}

//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use vinyl_lookup::{DiscogsClient, DiscogsConfig, RecognitionClient, RecognitionConfig};
use vinyl_server::{create_router, AppState, UploadStorage};
use vinyl_storage::Database;

pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Router wired to a throwaway database and uploads directory
pub struct TestApp {
    pub router: Router,
    pub db: Database,
    pub uploads_dir: PathBuf,
    _temp_dir: TempDir,
}

/// Base URLs for the external services; `None` leaves credentials unset
pub struct Upstreams {
    pub discogs: Option<String>,
    pub recognition: Option<String>,
}

impl Upstreams {
    pub fn none() -> Self {
        Self {
            discogs: None,
            recognition: None,
        }
    }
}

impl TestApp {
    pub async fn new(upstreams: Upstreams) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("vinyl.db");
        let db = Database::connect(&format!("sqlite://{}", db_path.display()))
            .await
            .unwrap();

        let uploads_dir = temp_dir.path().join("uploads");
        let uploads = UploadStorage::new(uploads_dir.clone());
        uploads.initialize().await.unwrap();

        let discogs_config = match upstreams.discogs {
            Some(url) => DiscogsConfig::with_credentials(url, "test-key", "test-secret", "test-token"),
            None => DiscogsConfig::default(),
        };
        let recognition_config = match upstreams.recognition {
            Some(url) => RecognitionConfig::with_api_key(url, "test-api-key"),
            None => RecognitionConfig::default(),
        };

        let discogs = Arc::new(DiscogsClient::new(discogs_config).unwrap());
        let recognition = Arc::new(RecognitionClient::new(recognition_config).unwrap());

        let state = AppState::new(
            db.clone(),
            Arc::new(uploads),
            discogs.clone(),
            discogs,
            recognition,
        );

        Self {
            router: create_router(state, MAX_BODY_BYTES),
            db,
            uploads_dir,
            _temp_dir: temp_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> Response<Body> {
        self.send(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
    }

    pub fn upload_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.uploads_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Multipart body with a single file field
pub fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> (String, Vec<u8>) {
    let boundary = "vinyl-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    (format!("multipart/form-data; boundary={}", boundary), body)
}

/// Album fixtures
pub mod fixtures {
    /// Tiny JPEG header, enough for storage tests
    pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];

    pub fn data_url(bytes: &[u8]) -> String {
        use base64::{engine::general_purpose::STANDARD, Engine as _};
        format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes))
    }
}

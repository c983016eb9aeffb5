/// API integration tests
/// Tests complete HTTP request/response cycles with a real database and mock upstreams
mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{body_json, fixtures, multipart_body, TestApp, Upstreams};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn discogs_only(server: &MockServer) -> Upstreams {
    Upstreams {
        discogs: Some(server.uri()),
        recognition: None,
    }
}

fn recognition_only(server: &MockServer) -> Upstreams {
    Upstreams {
        discogs: None,
        recognition: Some(server.uri()),
    }
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new(Upstreams::none()).await;

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["albums"], 0);
}

// =============================================================================
// Albums
// =============================================================================

#[tokio::test]
async fn test_list_albums_empty() {
    let app = TestApp::new(Upstreams::none()).await;

    let response = app.get("/albums-list").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_submit_without_image_then_list() {
    let app = TestApp::new(Upstreams::none()).await;

    let response = app
        .post_json(
            "/albums-submit",
            &json!([{
                "artist": "X",
                "album": "Y",
                "year": "1999",
                "condition": "Mint",
                "genre": ["Rock", "Pop"]
            }]),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["albums"].as_array().unwrap().len(), 1);

    let listed = body_json(app.get("/albums-list").await).await;
    let albums = listed.as_array().unwrap();
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0]["name"], "Y");
    assert_eq!(albums[0]["artist"], "X");
    assert_eq!(albums[0]["year"], 1999);
    assert_eq!(albums[0]["condition"], "Mint");
    assert_eq!(albums[0]["genre"], "Rock, Pop");
    assert_eq!(albums[0]["image"], "");
    assert!(app.upload_files().is_empty());
}

#[tokio::test]
async fn test_submit_stores_canonical_condition_and_edited_genre() {
    let app = TestApp::new(Upstreams::none()).await;

    let response = app
        .post_json(
            "/albums-submit",
            &json!([
                {
                    "external_id": 11,
                    "title": "Animals",
                    "artist": "Pink Floyd",
                    "genres": ["Rock"],
                    "genre": ["Rock", "Prog"],
                    "condition": "near mint"
                },
                {"artist": "Can", "album": "Ege Bamyasi", "condition": "VG+ maybe"}
            ]),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);

    let listed = body_json(app.get("/albums-list").await).await;
    let albums = listed.as_array().unwrap();
    assert_eq!(albums.len(), 2);
    assert_eq!(albums[0]["condition"], "Near Mint");
    assert_eq!(albums[0]["genre"], "Rock, Prog");
    assert_eq!(albums[1]["condition"], "");
}

#[tokio::test]
async fn test_submit_catalog_candidate_fields() {
    let app = TestApp::new(Upstreams::none()).await;

    let response = app
        .post_json(
            "/albums-submit",
            &json!([{
                "title": "Kind of Blue",
                "artist": "Miles Davis",
                "year": 1959,
                "condition": "Very Good",
                "genres": ["Jazz"],
                "external_id": 1234567,
                "uri": "/release/1234567",
                "cover_image": "https://img.example/kob.jpg",
                "price_estimate": 41.5,
                "price_low": 9.0,
                "price_high": 80.0
            }]),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let album = &body_json(response).await["albums"][0];
    assert_eq!(album["name"], "Kind of Blue");
    assert_eq!(album["year"], 1959);
    assert_eq!(album["genre"], "Jazz");
    assert_eq!(album["external_id"], "1234567");
    assert_eq!(album["external_uri"], "/release/1234567");
    assert_eq!(album["external_image_url"], "https://img.example/kob.jpg");
    assert_eq!(album["price_estimate"], "41.5");
}

#[tokio::test]
async fn test_submit_with_image_stores_and_serves_file() {
    let app = TestApp::new(Upstreams::none()).await;

    let response = app
        .post_json(
            "/albums-submit",
            &json!([{
                "artist": "Pink Floyd",
                "album": "The Wall",
                "year": "1979",
                "condition": "Good",
                "uploadImage": fixtures::data_url(fixtures::JPEG_BYTES)
            }]),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let image = body["albums"][0]["image"].as_str().unwrap().to_string();

    assert!(image.starts_with("/uploads/"), "unexpected image path {}", image);
    assert!(image.ends_with("_pinkfloyd_thewall.jpg"), "unexpected image path {}", image);

    let files = app.upload_files();
    assert_eq!(files.len(), 1);
    assert_eq!(format!("/uploads/{}", files[0]), image);

    let served = app.get(&image).await;
    assert_eq!(served.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(served.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], fixtures::JPEG_BYTES);
}

#[tokio::test]
async fn test_same_name_images_do_not_overwrite() {
    let app = TestApp::new(Upstreams::none()).await;
    let item = json!({
        "artist": "Can",
        "album": "Tago Mago",
        "uploadImage": fixtures::data_url(fixtures::JPEG_BYTES)
    });

    let response = app
        .post_json("/albums-submit", &json!([item.clone(), item]))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let first = body["albums"][0]["image"].as_str().unwrap();
    let second = body["albums"][1]["image"].as_str().unwrap();

    assert_ne!(first, second);
    assert!(second.ends_with("_can_tagomago_2.jpg"));
    assert_eq!(app.upload_files().len(), 2);
}

#[tokio::test]
async fn test_invalid_image_rejects_whole_batch() {
    let app = TestApp::new(Upstreams::none()).await;

    let response = app
        .post_json(
            "/albums-submit",
            &json!([
                {"artist": "A", "album": "Fine", "uploadImage": fixtures::data_url(fixtures::JPEG_BYTES)},
                {"artist": "B", "album": "Broken", "uploadImage": "data:image/jpeg;base64,@@@"}
            ]),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("base64"));

    assert_eq!(app.db.count_albums().await.unwrap(), 0);
    assert!(app.upload_files().is_empty());
}

#[tokio::test]
async fn test_failed_insert_removes_written_images() {
    let app = TestApp::new(Upstreams::none()).await;

    sqlx::query(
        "CREATE TRIGGER reject_albums BEFORE INSERT ON albums
         WHEN NEW.artist = 'REJECT'
         BEGIN SELECT RAISE(ABORT, 'rejected'); END",
    )
    .execute(app.db.pool())
    .await
    .unwrap();

    let response = app
        .post_json(
            "/albums-submit",
            &json!([
                {"artist": "Keep", "album": "One", "uploadImage": fixtures::data_url(fixtures::JPEG_BYTES)},
                {"artist": "REJECT", "album": "Two", "uploadImage": fixtures::data_url(fixtures::JPEG_BYTES)}
            ]),
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["success"], false);
    assert_eq!(app.db.count_albums().await.unwrap(), 0);
    assert!(app.upload_files().is_empty());
}

#[tokio::test]
async fn test_submit_rejects_non_array_body() {
    let app = TestApp::new(Upstreams::none()).await;

    let response = app
        .post_json("/albums-submit", &json!({"artist": "X"}))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}

// =============================================================================
// Search & Enrich
// =============================================================================

#[tokio::test]
async fn test_search_enrich_no_results_is_404() {
    let discogs = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/database/search"))
        .and(query_param("artist", "Pink Floyd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&discogs)
        .await;

    let app = TestApp::new(discogs_only(&discogs)).await;

    let response = app
        .post_json(
            "/search-enrich",
            &json!({
                "artist": "Pink Floyd",
                "album": "Unknown",
                "year": "Unknown",
                "condition": "Very Good"
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"error": "No results found for this album"})
    );

    let requests = discogs.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let keys: Vec<String> = requests[0]
        .url
        .query_pairs()
        .map(|(k, _)| k.into_owned())
        .collect();
    assert!(!keys.contains(&"release_title".to_string()));
    assert!(!keys.contains(&"year".to_string()));
}

#[tokio::test]
async fn test_search_enrich_returns_priced_top_candidate() {
    let discogs = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/database/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": 11, "title": "Pink Floyd - Animals", "year": "1977", "genre": ["Rock"], "uri": "/release/11"},
                {"id": 12, "title": "Pink Floyd - Animals", "year": "1977"}
            ]
        })))
        .mount(&discogs)
        .await;

    for id in [11, 12] {
        Mock::given(method("GET"))
            .and(path(format!("/marketplace/price_suggestions/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Mint (M)": {"currency": "USD", "value": 80.0},
                "Near Mint (NM or M-)": {"currency": "USD", "value": 55.0},
                "Very Good (VG)": {"currency": "USD", "value": 25.0},
                "Poor (P)": {"currency": "USD", "value": 4.0}
            })))
            .expect(1)
            .mount(&discogs)
            .await;
    }

    let app = TestApp::new(discogs_only(&discogs)).await;

    let response = app
        .post_json(
            "/search-enrich",
            &json!({"artist": "Pink Floyd", "album": "Animals", "year": 1977, "condition": "near mint"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["external_id"], 11);
    assert_eq!(body["title"], "Animals");
    assert_eq!(body["artist"], "Pink Floyd");
    assert_eq!(body["price_low"], 4.0);
    assert_eq!(body["price_high"], 80.0);
    assert_eq!(body["price_estimate"], 55.0);
}

#[tokio::test]
async fn test_search_enrich_without_credentials_is_500() {
    let app = TestApp::new(Upstreams::none()).await;

    let response = app
        .post_json("/search-enrich", &json!({"artist": "Can", "condition": "Mint"}))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn test_search_enrich_passes_upstream_status() {
    let discogs = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/database/search"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid consumer key."})))
        .mount(&discogs)
        .await;

    let app = TestApp::new(discogs_only(&discogs)).await;

    let response = app
        .post_json("/search-enrich", &json!({"artist": "Can", "condition": "Mint"}))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("Invalid consumer key"));
}

// =============================================================================
// Recognize
// =============================================================================

fn multipart_request(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let (content_type_header, body) = multipart_body(field, file_name, content_type, data);
    Request::builder()
        .uri("/recognize")
        .method("POST")
        .header(header::CONTENT_TYPE, content_type_header)
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_recognize_returns_guess() {
    let vision = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{
                "type": "text",
                "text": "{\"artist\":\"Can\",\"album\":\"Tago Mago\",\"year\":\"1971\",\"pressing\":\"Original\",\"condition\":\"Very Good\",\"conditionNotes\":\"Light surface marks\",\"coverCondition\":\"Worn corners\",\"confidence\":\"Medium\"}"
            }]
        })))
        .expect(1)
        .mount(&vision)
        .await;

    let app = TestApp::new(recognition_only(&vision)).await;

    let response = app
        .send(multipart_request("image", "cover.jpg", "image/jpeg", fixtures::JPEG_BYTES))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["artist"], "Can");
    assert_eq!(body["album"], "Tago Mago");
    assert_eq!(body["conditionNotes"], "Light surface marks");
    assert_eq!(body["confidence"], "Medium");
}

#[tokio::test]
async fn test_recognize_without_image_field_is_400() {
    let app = TestApp::new(Upstreams::none()).await;

    let response = app
        .send(multipart_request("photo", "cover.jpg", "image/jpeg", fixtures::JPEG_BYTES))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "No image provided"}));
}

#[tokio::test]
async fn test_recognize_empty_image_is_400() {
    let app = TestApp::new(Upstreams::none()).await;

    let response = app
        .send(multipart_request("image", "cover.jpg", "image/jpeg", &[]))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recognize_requires_multipart() {
    let app = TestApp::new(Upstreams::none()).await;

    let response = app.post_json("/recognize", &json!({"image": "x"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recognize_without_api_key_is_500() {
    let app = TestApp::new(Upstreams::none()).await;

    let response = app
        .send(multipart_request("image", "cover.jpg", "image/jpeg", fixtures::JPEG_BYTES))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_recognize_passes_upstream_status() {
    let vision = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Overloaded"))
        .mount(&vision)
        .await;

    let app = TestApp::new(recognition_only(&vision)).await;

    let response = app
        .send(multipart_request("image", "cover.png", "image/png", fixtures::JPEG_BYTES))
        .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["error"], "Overloaded");
}

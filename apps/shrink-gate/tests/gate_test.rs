//! End-to-end tests of the gateway router: upload, compress, download.

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use shrink_gate::{routes, AppState};
use shrinkray_codec::{JpegQualityStrategy, Workdir, ZipArchiveStrategy};
use shrinkray_domain::compression::CompressionService;
use shrinkray_domain::intake::IntakeGate;

const BOUNDARY: &str = "shrinkray-test-boundary";

fn test_app_with_timeout(compression_timeout: Duration) -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let workdir = Workdir::create(dir.path()).unwrap();
    let service = CompressionService::new(
        IntakeGate::with_defaults(),
        JpegQualityStrategy::default(),
        ZipArchiveStrategy,
    );
    let state = AppState {
        service: Arc::new(service),
        workdir: Arc::new(workdir),
        compression_timeout,
    };
    (routes::create_router(state), dir)
}

fn test_app() -> (Router, TempDir) {
    test_app_with_timeout(Duration::from_secs(30))
}

fn multipart_body(filename: Option<&str>, data: &[u8], target_size_kb: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(filename) = filename {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(target) = target_size_kb {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"target_size_kb\"\r\n\r\n",
        );
        body.extend_from_slice(target.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn compress_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/compress")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn noisy_png(width: u32, height: u32) -> Vec<u8> {
    let mut state = 0xdead_beefu32;
    let img = image::RgbImage::from_fn(width, height, |_, _| {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let b = state.to_le_bytes();
        image::Rgb([b[0], b[1], b[2]])
    });
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    bytes
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = test_app();
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"OK");
}

#[tokio::test]
async fn test_text_upload_round_trips_through_download() {
    let (app, _dir) = test_app();
    let content = b"meeting notes\n".repeat(370); // ~5 KB

    let response = app
        .clone()
        .oneshot(compress_request(multipart_body(
            Some("notes.txt"),
            &content,
            None,
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["artifact"], "notes.txt.zip");
    assert_eq!(json["download_url"], "/download/notes.txt.zip");

    let response = app
        .oneshot(
            Request::get("/download/notes.txt.zip")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let archive_bytes = body_bytes(response).await;
    let mut archive =
        zip::ZipArchive::new(std::io::Cursor::new(archive_bytes)).unwrap();
    assert_eq!(archive.len(), 1);
    let mut entry = archive.by_index(0).unwrap();
    assert_eq!(entry.name(), "notes.txt");
    let mut extracted = Vec::new();
    entry.read_to_end(&mut extracted).unwrap();
    assert_eq!(extracted, content);
}

#[tokio::test]
async fn test_large_image_compressed_to_target() {
    let (app, _dir) = test_app();
    let png = noisy_png(512, 512);
    assert!(png.len() > 102_400, "fixture must start over budget");

    let response = app
        .clone()
        .oneshot(compress_request(multipart_body(
            Some("photo.png"),
            &png,
            Some("100"),
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["artifact"], "photo.jpg");
    assert!(json["final_size_kb"].as_u64().unwrap() <= 100);

    let response = app
        .oneshot(
            Request::get("/download/photo.jpg")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.len() <= 102_400);
}

#[tokio::test]
async fn test_disallowed_extension_rejected() {
    let (app, _dir) = test_app();
    let response = app
        .oneshot(compress_request(multipart_body(
            Some("data.exe"),
            b"MZ....",
            None,
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("invalid file type"));
}

#[tokio::test]
async fn test_missing_file_rejected() {
    let (app, _dir) = test_app();
    let response = app
        .oneshot(compress_request(multipart_body(None, b"", Some("100"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "missing file");
}

#[tokio::test]
async fn test_non_numeric_target_size_rejected() {
    let (app, _dir) = test_app();
    let response = app
        .oneshot(compress_request(multipart_body(
            Some("notes.txt"),
            b"hello",
            Some("lots"),
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("invalid target size"));
}

#[tokio::test]
async fn test_zero_budget_image_is_unreachable() {
    let (app, _dir) = test_app();
    let png = noisy_png(16, 16);

    let response = app
        .oneshot(compress_request(multipart_body(
            Some("tiny.png"),
            &png,
            Some("0"),
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("could not reach target size"));
}

#[tokio::test]
async fn test_elapsed_timeout_is_a_server_error() {
    // a bound no encode can meet, so the timeout branch always fires
    let (app, _dir) = test_app_with_timeout(Duration::from_nanos(1));
    let png = noisy_png(256, 256);

    let response = app
        .oneshot(compress_request(multipart_body(
            Some("photo.png"),
            &png,
            Some("10"),
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_download_of_unknown_artifact_is_not_found() {
    let (app, _dir) = test_app();
    let response = app
        .oneshot(
            Request::get("/download/never-produced.zip")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_name_is_sanitized() {
    let (app, _dir) = test_app();
    // traversal collapses to a plain name, which does not exist
    let response = app
        .oneshot(
            Request::get("/download/..%2F..%2Fetc%2Fpasswd")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

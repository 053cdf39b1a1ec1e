//! End-to-end tests for the relay HTTP API.
//!
//! Each test drives the real router with in-process requests via
//! `tower::ServiceExt::oneshot`, the same way a polling client would.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use drop_relay::config::Config;
use drop_relay::http::build_router;
use drop_relay::server::ShareRelay;
use drop_types::{FileMeta, SessionCreated, SessionInfo, UploadResponse};
use std::sync::Arc;
use tower::util::ServiceExt;

fn test_relay() -> Arc<ShareRelay> {
    Arc::new(ShareRelay::new(Config::default()))
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn upload_body(name: &str, mime: &str, size: u64, data: &str, client: &str) -> Body {
    Body::from(
        serde_json::json!({
            "fileName": name,
            "fileType": mime,
            "fileSize": size,
            "fileData": data,
            "clientId": client,
        })
        .to_string(),
    )
}

fn post_json(uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn create_upload_list_fetch_scenario() {
    let relay = test_relay();
    let app = build_router(relay);

    // Create session "4444".
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/session",
            Body::from(r#"{"sessionId":"4444"}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created: SessionCreated = body_json(response).await;
    assert_eq!(created.session_id.as_str(), "4444");

    // Upload a.txt with raw content "hello".
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/session/4444/upload",
            upload_body("a.txt", "text/plain", 5, "hello", "client-1"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let uploaded: UploadResponse = body_json(response).await;
    assert!(uploaded.success);
    assert_eq!(uploaded.file.name, "a.txt");
    assert_eq!(uploaded.file.size, 5);

    // List shows exactly one entry.
    let response = app.clone().oneshot(get("/api/session/4444")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let info: SessionInfo = body_json(response).await;
    assert_eq!(info.file_count, 1);
    assert_eq!(info.files[0].name, "a.txt");
    assert_eq!(info.files[0].size, 5);

    // Fetch returns the original bytes with the declared type.
    let uri = format!("/api/session/4444/file/{}", uploaded.file.id);
    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"a.txt\""
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"hello");
}

#[tokio::test]
async fn data_url_upload_roundtrips_binary_content() {
    use base64::{engine::general_purpose::STANDARD, Engine};

    let app = build_router(test_relay());
    let payload: Vec<u8> = (0u8..=255).collect();
    let data_url = format!(
        "data:application/octet-stream;base64,{}",
        STANDARD.encode(&payload)
    );

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/session/7777/upload",
            upload_body("blob.bin", "text/plain", 256, &data_url, "client-1"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let uploaded: UploadResponse = body_json(response).await;

    // The embedded mime tag wins over the declared fileType.
    assert_eq!(uploaded.file.mime_type, "application/octet-stream");

    let uri = format!("/api/session/7777/file/{}", uploaded.file.id);
    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/octet-stream"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], payload.as_slice());
}

#[tokio::test]
async fn fetch_on_never_created_code_is_404() {
    let app = build_router(test_relay());

    let response = app
        .oneshot(get("/api/session/9999/file/any-id"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn auto_create_mints_an_alphanumeric_code() {
    let app = build_router(test_relay());

    let response = app.oneshot(get("/api/session")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created: SessionCreated = body_json(response).await;
    assert_eq!(created.session_id.as_str().len(), 6);
}

#[tokio::test]
async fn explicit_create_rejects_bad_format() {
    let app = build_router(test_relay());

    let response = app
        .oneshot(post_json(
            "/api/session",
            Body::from(r#"{"sessionId":"1234"}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn explicit_create_collision_is_409_and_preserves_files() {
    let app = build_router(test_relay());

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/session",
            Body::from(r#"{"sessionId":"5555"}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    app.clone()
        .oneshot(post_json(
            "/api/session/5555/upload",
            upload_body("keep.txt", "text/plain", 4, "keep", "client-1"),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/session",
            Body::from(r#"{"sessionId":"5555"}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The original session's files survive the failed claim.
    let response = app.clone().oneshot(get("/api/session/5555")).await.unwrap();
    let info: SessionInfo = body_json(response).await;
    assert_eq!(info.file_count, 1);
    assert_eq!(info.files[0].name, "keep.txt");
}

#[tokio::test]
async fn oversized_upload_is_400_and_leaves_list_unchanged() {
    let app = build_router(test_relay());

    app.clone()
        .oneshot(post_json(
            "/api/session",
            Body::from(r#"{"sessionId":"6666"}"#),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/session/6666/upload",
            upload_body(
                "big.bin",
                "application/octet-stream",
                6 * 1024 * 1024,
                "x",
                "client-1",
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.clone().oneshot(get("/api/session/6666")).await.unwrap();
    let info: SessionInfo = body_json(response).await;
    assert_eq!(info.file_count, 0);
}

#[tokio::test]
async fn upload_to_unknown_code_creates_the_session() {
    let app = build_router(test_relay());

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/session/8888/upload",
            upload_body("a.txt", "text/plain", 5, "hello", "client-1"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/session/8888")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let info: SessionInfo = body_json(response).await;
    assert_eq!(info.file_count, 1);
}

#[tokio::test]
async fn corrupt_base64_upload_is_400() {
    let app = build_router(test_relay());

    let response = app
        .oneshot(post_json(
            "/api/session/4444/upload",
            upload_body(
                "x.png",
                "image/png",
                3,
                "data:image/png;base64,@@@",
                "client-1",
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn concurrent_uploads_both_appear_in_list() {
    let app = build_router(test_relay());

    app.clone()
        .oneshot(post_json(
            "/api/session",
            Body::from(r#"{"sessionId":"2222"}"#),
        ))
        .await
        .unwrap();

    let first = app.clone().oneshot(post_json(
        "/api/session/2222/upload",
        upload_body("one.txt", "text/plain", 3, "one", "client-1"),
    ));
    let second = app.clone().oneshot(post_json(
        "/api/session/2222/upload",
        upload_body("two.txt", "text/plain", 3, "two", "client-2"),
    ));

    let (first, second) = tokio::join!(first, second);
    assert_eq!(first.unwrap().status(), StatusCode::OK);
    assert_eq!(second.unwrap().status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/session/2222")).await.unwrap();
    let info: SessionInfo = body_json(response).await;
    assert_eq!(info.file_count, 2);

    let names: Vec<&str> = info.files.iter().map(|f| f.name.as_str()).collect();
    assert!(names.contains(&"one.txt"));
    assert!(names.contains(&"two.txt"));
}

#[tokio::test]
async fn swept_session_vanishes_from_every_endpoint() {
    let relay = test_relay();
    let app = build_router(Arc::clone(&relay));

    app.clone()
        .oneshot(post_json(
            "/api/session",
            Body::from(r#"{"sessionId":"3333"}"#),
        ))
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/session/3333/upload",
            upload_body("a.txt", "text/plain", 5, "hello", "client-1"),
        ))
        .await
        .unwrap();
    let uploaded: UploadResponse = body_json(response).await;

    // Age the session and sweep with a cutoff in the future of its activity.
    let code = drop_types::SessionCode::new("3333");
    relay.registry().get(&code).unwrap().write().touch(1_000);
    let removed = relay.registry().sweep_older_than(2_000);
    assert_eq!(removed, 1);

    let response = app.clone().oneshot(get("/api/session/3333")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let uri = format!("/api/session/3333/file/{}", uploaded.file.id);
    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_response_meta_matches_listing() {
    let app = build_router(test_relay());

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/session/1111/upload",
            upload_body("doc.pdf", "application/pdf", 9, "%PDF-1.4\n", "client-9"),
        ))
        .await
        .unwrap();
    let uploaded: UploadResponse = body_json(response).await;

    let response = app.clone().oneshot(get("/api/session/1111")).await.unwrap();
    let info: SessionInfo = body_json(response).await;

    let listed: &FileMeta = &info.files[0];
    assert_eq!(listed, &uploaded.file);
    assert_eq!(listed.uploaded_by.as_str(), "client-9");
}

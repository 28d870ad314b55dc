//! Integration Tests for the File Cache Server
//!
//! Tests the full request/response cycle through the router, over a
//! temporary fixture directory.

use std::path::Path;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::util::ServiceExt;

use static_cache::{
    api::create_router, AppState, CacheStore, CachedFetcher, FsFetcher, ReadMode, UpdateMode,
    UpdatePolicy,
};

// == Helper Functions ==

fn fixture_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), b"<h1>home</h1>").unwrap();
    std::fs::create_dir(dir.path().join("docs")).unwrap();
    std::fs::write(dir.path().join("docs/index.html"), b"<h1>docs home</h1>").unwrap();
    std::fs::create_dir(dir.path().join("styles")).unwrap();
    std::fs::write(dir.path().join("styles/site.css"), b"body { margin: 0 }").unwrap();
    dir
}

fn create_app(root: &Path, capacity: Option<u64>, update: Option<UpdatePolicy>) -> Router {
    let fetcher = FsFetcher::new(root, ReadMode::Async);
    let files = CachedFetcher::new(fetcher, CacheStore::new(capacity), update);
    create_router(AppState::new(files, true))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

// == Serving Tests ==

#[tokio::test]
async fn test_serves_file_with_content_type() {
    let dir = fixture_tree();
    let app = create_app(dir.path(), None, None);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/styles/site.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body.as_ref(), b"body { margin: 0 }");
}

#[tokio::test]
async fn test_missing_file_returns_404_with_json_error() {
    let dir = fixture_tree();
    let app = create_app(dir.path(), None, None);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/nope.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_root_serves_index() {
    let dir = fixture_tree();
    let app = create_app(dir.path(), None, None);

    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>home</h1>");
}

#[tokio::test]
async fn test_directory_redirects_to_index() {
    let dir = fixture_tree();
    let app = create_app(dir.path(), None, None);

    let (status, body) = get(&app, "/docs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>docs home</h1>");
}

// == Caching Behavior Tests ==

#[tokio::test]
async fn test_caching_disabled_always_reads_through() {
    let dir = fixture_tree();
    let app = create_app(dir.path(), None, None);

    let (_, body) = get(&app, "/index.html").await;
    assert_eq!(body, b"<h1>home</h1>");

    std::fs::write(dir.path().join("index.html"), b"<h1>updated</h1>").unwrap();

    let (_, body) = get(&app, "/index.html").await;
    assert_eq!(body, b"<h1>updated</h1>");
}

#[tokio::test]
async fn test_never_expiring_cache_serves_first_version() {
    let dir = fixture_tree();
    let update = UpdatePolicy::new(-1, UpdateMode::Wait);
    let app = create_app(dir.path(), None, Some(update));

    let (_, body) = get(&app, "/index.html").await;
    assert_eq!(body, b"<h1>home</h1>");

    std::fs::write(dir.path().join("index.html"), b"<h1>updated</h1>").unwrap();

    // The entry never expires, so the original content keeps being served
    let (_, body) = get(&app, "/index.html").await;
    assert_eq!(body, b"<h1>home</h1>");
}

#[tokio::test]
async fn test_wait_mode_revalidates_expired_entries() {
    let dir = fixture_tree();
    // expire_after 0: every access revalidates
    let update = UpdatePolicy::new(0, UpdateMode::Wait);
    let app = create_app(dir.path(), None, Some(update));

    let (_, body) = get(&app, "/index.html").await;
    assert_eq!(body, b"<h1>home</h1>");

    std::fs::write(dir.path().join("index.html"), b"<h1>updated</h1>").unwrap();

    let (_, body) = get(&app, "/index.html").await;
    assert_eq!(body, b"<h1>updated</h1>");
}

#[tokio::test]
async fn test_cache_first_serves_stale_then_updates() {
    let dir = fixture_tree();
    let update = UpdatePolicy::new(0, UpdateMode::CacheFirst);
    let app = create_app(dir.path(), None, Some(update));

    let (_, body) = get(&app, "/index.html").await;
    assert_eq!(body, b"<h1>home</h1>");

    std::fs::write(dir.path().join("index.html"), b"<h1>updated</h1>").unwrap();

    // Stale content is served immediately while revalidation runs behind it
    let (_, body) = get(&app, "/index.html").await;
    assert_eq!(body, b"<h1>home</h1>");

    // The background refresh lands eventually
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let (_, body) = get(&app, "/index.html").await;
        if body == b"<h1>updated</h1>" {
            return;
        }
    }
    panic!("background revalidation never served fresh content");
}

#[tokio::test]
async fn test_eviction_end_to_end() {
    let dir = fixture_tree();
    std::fs::write(dir.path().join("a.bin"), b"aaaaaa").unwrap();
    std::fs::write(dir.path().join("b.bin"), b"bbbbbb").unwrap();

    // 10-byte capacity holds one 6-byte file at a time
    let update = UpdatePolicy::new(-1, UpdateMode::Wait);
    let app = create_app(dir.path(), Some(10), Some(update));

    get(&app, "/a.bin").await;
    get(&app, "/b.bin").await;

    let (status, body) = get(&app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["entries"], 1);
    assert_eq!(json["used_bytes"], 6);
    assert_eq!(json["evictions"], 1);
}

// == Stats Tests ==

#[tokio::test]
async fn test_stats_track_hits_and_misses() {
    let dir = fixture_tree();
    let update = UpdatePolicy::new(-1, UpdateMode::Wait);
    let app = create_app(dir.path(), None, Some(update));

    get(&app, "/index.html").await; // miss
    get(&app, "/index.html").await; // hit

    let (_, body) = get(&app, "/stats").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["misses"], 1);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = fixture_tree();
    let app = create_app(dir.path(), None, None);

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

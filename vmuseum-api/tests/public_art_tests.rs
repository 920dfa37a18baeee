//! Public collection endpoints against a stubbed upstream

mod helpers;

use axum::http::StatusCode;
use helpers::{send, test_app, StubUpstream};
use serde_json::json;
use vmuseum_api::api::AdminPolicy;
use vmuseum_api::services::met::encode_artist_id;

fn museum() -> StubUpstream {
    StubUpstream::new()
        .search("artist", &[1, 2, 3, 4])
        .work(1, "Edgar Degas")
        .work(2, "Claude Monet")
        .work(3, "Edgar Degas")
        .work(4, "Nobody Validated")
        .search("Edgar Degas", &[1, 3])
        .search("Claude Monet", &[2])
        .search("*", &[2, 3, 404])
}

#[tokio::test]
async fn test_artists_are_sorted_validated_and_cached() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path(), museum(), AdminPolicy::default()).await;

    let (status, body) = send(&app.router, "GET", "/api/public-art/artists", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": encode_artist_id("Claude Monet"), "displayName": "Claude Monet" },
            { "id": encode_artist_id("Edgar Degas"), "displayName": "Edgar Degas" },
        ])
    );

    let calls_after_first = app.upstream.calls().len();
    let (status, again) = send(&app.router, "GET", "/api/public-art/artists", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again, body);
    assert_eq!(app.upstream.calls().len(), calls_after_first);

    let (_, health) = send(&app.router, "GET", "/health", None, None).await;
    assert_eq!(health["artist_cache"], "fresh");
}

#[tokio::test]
async fn test_artists_fail_when_nothing_cached() {
    let dir = tempfile::tempdir().unwrap();
    let upstream = StubUpstream::new().failing_search("artist");
    let app = test_app(dir.path(), upstream, AdminPolicy::default()).await;

    let (status, body) = send(&app.router, "GET", "/api/public-art/artists", None, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_works_by_id_and_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path(), museum(), AdminPolicy::default()).await;

    let uri = format!("/api/public-art/artist/{}", encode_artist_id("Edgar Degas"));
    let (status, by_id) = send(&app.router, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    let works = by_id.as_array().unwrap();
    assert_eq!(works.len(), 2);
    assert_eq!(works[0]["artistName"], "Edgar Degas");
    assert_eq!(works[0]["imageUrl"], "https://images.example/1-small.jpg");

    let (status, by_name) = send(
        &app.router,
        "GET",
        "/api/public-art/by-artist?artist=Edgar%20Degas",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_name, by_id);
}

#[tokio::test]
async fn test_works_lookups_never_error() {
    let dir = tempfile::tempdir().unwrap();
    let upstream = StubUpstream::new().failing_search("Edgar Degas");
    let app = test_app(dir.path(), upstream, AdminPolicy::default()).await;

    let uri = format!("/api/public-art/artist/{}", encode_artist_id("Edgar Degas"));
    let (status, body) = send(&app.router, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app.router, "GET", "/api/public-art/artist/%25%25", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let calls_before = app.upstream.calls().len();
    let (status, body) = send(&app.router, "GET", "/api/public-art/by-artist", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert_eq!(app.upstream.calls().len(), calls_before);
}

#[tokio::test]
async fn test_featured_works() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path(), museum(), AdminPolicy::default()).await;

    let (status, body) = send(&app.router, "GET", "/api/public-art", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let works = body.as_array().unwrap();
    assert_eq!(works.len(), 2);
    assert_eq!(works[0]["id"], 2);
    assert_eq!(works[0]["imageUrl"], "https://images.example/2.jpg");
}

#[tokio::test]
async fn test_featured_seed_failure_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path(), StubUpstream::new().failing_search("*"), AdminPolicy::default()).await;

    let (status, body) = send(&app.router, "GET", "/api/public-art", None, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]["message"].is_string());
}

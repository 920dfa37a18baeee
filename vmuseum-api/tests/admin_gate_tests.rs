//! Admin gate integration tests

mod helpers;

use axum::http::StatusCode;
use helpers::{id_token, item_body, send, test_app, StubUpstream};
use vmuseum_api::api::AdminPolicy;

fn gated(allowed: &[&str]) -> AdminPolicy {
    AdminPolicy {
        require_login: true,
        allowed_emails: allowed.iter().map(|e| e.to_string()).collect(),
    }
}

#[tokio::test]
async fn test_reads_are_never_gated() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path(), StubUpstream::new(), gated(&["curator@museum.example"])).await;

    let (status, _) = send(&app.router, "GET", "/api/items", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app.router, "GET", "/api/collections", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_or_malformed_token_is_unauthorized() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path(), StubUpstream::new(), gated(&[])).await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/items",
        Some(item_body("Vase", "Glass")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = send(
        &app.router,
        "DELETE",
        "/api/items/1",
        None,
        Some("garbage"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_email_outside_allow_list_is_forbidden() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path(), StubUpstream::new(), gated(&["curator@museum.example"])).await;

    let token = id_token("visitor@example.com");
    let (status, body) = send(
        &app.router,
        "POST",
        "/api/items",
        Some(item_body("Vase", "Glass")),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_allowed_email_passes() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path(), StubUpstream::new(), gated(&["curator@museum.example"])).await;

    let token = id_token("curator@museum.example");
    let (status, body) = send(
        &app.router,
        "POST",
        "/api/items",
        Some(item_body("Vase", "Glass")),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Vase");

    let (status, _) = send(&app.router, "PUT", "/api/items/1", Some(item_body("Vase", "Glass")), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_gate_disabled_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path(), StubUpstream::new(), AdminPolicy::default()).await;

    let (status, _) = send(
        &app.router,
        "POST",
        "/api/items",
        Some(item_body("Vase", "Glass")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

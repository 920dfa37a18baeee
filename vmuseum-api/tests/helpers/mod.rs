//! Shared fixtures for vmuseum-api integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use reqwest::Url;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use vmuseum_api::api::AdminPolicy;
use vmuseum_api::services::met::{JsonFetcher, MetCatalog, MetSettings, UpstreamError};
use vmuseum_api::store::CatalogStore;
use vmuseum_api::{build_router, AppState};

/// In-memory stand-in for the public collection
///
/// Searches are keyed by their `q` parameter, objects by id. Anything not
/// registered answers 404. Every requested URL is recorded.
#[derive(Default)]
pub struct StubUpstream {
    searches: HashMap<String, Result<Vec<u64>, UpstreamError>>,
    objects: HashMap<u64, Value>,
    calls: Mutex<Vec<Url>>,
}

impl StubUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, q: &str, ids: &[u64]) -> Self {
        self.searches.insert(q.to_string(), Ok(ids.to_vec()));
        self
    }

    pub fn failing_search(mut self, q: &str) -> Self {
        self.searches.insert(
            q.to_string(),
            Err(UpstreamError::Transport("connection refused".into())),
        );
        self
    }

    pub fn work(mut self, id: u64, artist: &str) -> Self {
        self.objects.insert(
            id,
            json!({
                "objectID": id,
                "title": format!("Study {}", id),
                "artistDisplayName": artist,
                "objectDate": "ca. 1870",
                "culture": "French",
                "medium": "Oil on canvas",
                "primaryImage": format!("https://images.example/{}.jpg", id),
                "primaryImageSmall": format!("https://images.example/{}-small.jpg", id),
            }),
        );
        self
    }

    pub fn calls(&self) -> Vec<Url> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonFetcher for StubUpstream {
    async fn fetch_json(&self, url: &Url) -> Result<Value, UpstreamError> {
        self.calls.lock().unwrap().push(url.clone());

        if url.path().ends_with("/search") {
            let q = url
                .query_pairs()
                .find(|(k, _)| k == "q")
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default();
            return match self.searches.get(&q) {
                Some(Ok(ids)) => Ok(json!({ "total": ids.len(), "objectIDs": ids })),
                Some(Err(e)) => Err(e.clone()),
                None => Ok(json!({ "total": 0, "objectIDs": null })),
            };
        }

        url.path()
            .rsplit('/')
            .next()
            .and_then(|id| id.parse::<u64>().ok())
            .and_then(|id| self.objects.get(&id).cloned())
            .ok_or(UpstreamError::Status(404))
    }
}

pub fn test_settings() -> MetSettings {
    let mut settings = MetSettings::default();
    settings.base_url = "https://met.example/public/collection/v1".to_string();
    settings
}

pub struct TestApp {
    pub router: Router,
    pub upstream: Arc<StubUpstream>,
}

pub async fn test_app(dir: &Path, upstream: StubUpstream, admin: AdminPolicy) -> TestApp {
    let upstream = Arc::new(upstream);
    let store = CatalogStore::open(dir.join("museum.json")).await;
    let catalog = MetCatalog::with_fetcher(test_settings(), upstream.clone()).unwrap();
    let state = AppState::new(store, catalog, admin);

    TestApp {
        router: build_router(state),
        upstream,
    }
}

pub async fn open_app(dir: &Path) -> TestApp {
    test_app(dir, StubUpstream::new(), AdminPolicy::default()).await
}

/// Send one request and return status plus parsed JSON body (Null if not JSON)
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    read_response(router, request).await
}

/// Send a raw body with an optional content type, for malformed payloads
pub async fn send_raw(
    router: &Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    read_response(router, request).await
}

async fn read_response(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub fn item_body(title: &str, collection: &str) -> Value {
    json!({
        "title": title,
        "description": "Marble portrait head",
        "category": "Sculpture",
        "collection": collection,
        "photo": "https://images.example/head.jpg",
        "year": 1850,
        "cultural_context": "Roman revival",
        "historical_period": "19th century",
        "material": "Marble",
        "dimensions": "32 x 20 x 22 cm"
    })
}

pub fn collection_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "Works in stone",
        "color": "#A0B1C2"
    })
}

/// Unsigned JWT-shaped token carrying `email`
pub fn id_token(email: &str) -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({ "email": email, "name": "Test" }).to_string());
    format!("{}.{}.signature", header, payload)
}

//! vmuseum-ui library interface
//!
//! Front-end server: public gallery, admin sign-in page and admin panel, all
//! compiled into the binary.

pub mod assets;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use vmuseum_common::config::UiSection;

/// Settings published to the browser through `/static/config.js`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL of the catalog API, e.g. `http://localhost:3000/api`
    pub api_url: String,
    pub google_client_id: Option<String>,
}

impl From<&UiSection> for ClientConfig {
    fn from(section: &UiSection) -> Self {
        Self {
            api_url: section.api_url.trim_end_matches('/').to_string(),
            google_client_id: section.google_client_id.clone(),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct UiState {
    pub client_config: Arc<ClientConfig>,
    pub startup_time: DateTime<Utc>,
}

impl UiState {
    pub fn new(client_config: ClientConfig) -> Self {
        Self {
            client_config: Arc::new(client_config),
            startup_time: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// GET /health
pub async fn health_check(State(state): State<UiState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "vmuseum-ui".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime.num_seconds().max(0) as u64,
    })
}

/// Build application router
pub fn build_router(state: UiState) -> Router {
    Router::new()
        .merge(assets::asset_routes())
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

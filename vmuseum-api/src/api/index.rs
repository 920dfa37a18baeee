//! Root banner and endpoint listing

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

const ENDPOINTS: &[&str] = &[
    "GET /api/items",
    "GET /api/items/:id",
    "POST /api/items",
    "PUT /api/items/:id",
    "DELETE /api/items/:id",
    "GET /api/collections",
    "POST /api/collections",
    "PUT /api/collections/:id",
    "DELETE /api/collections/:id",
    "GET /api/collections/:name/items",
    "GET /api/public-art",
    "GET /api/public-art/artists",
    "GET /api/public-art/artist/:artist_id",
    "GET /api/public-art/by-artist?artist=",
];

#[derive(Debug, Serialize)]
pub struct ApiIndexResponse {
    pub ok: bool,
    pub message: String,
    pub endpoints: Vec<String>,
}

/// GET /
pub async fn banner() -> &'static str {
    "Virtual museum API is running. Endpoints are listed under /api"
}

/// GET /api
pub async fn api_index() -> Json<ApiIndexResponse> {
    Json(ApiIndexResponse {
        ok: true,
        message: "Virtual museum API".to_string(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}

pub fn index_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/api", get(api_index))
}

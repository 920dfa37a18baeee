//! Compiled-in pages, scripts and styles

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::error;

use crate::UiState;

const INDEX_HTML: &str = include_str!("../static/index.html");
const ADMIN_HTML: &str = include_str!("../static/admin.html");
const LOGIN_HTML: &str = include_str!("../static/login.html");
const GALLERY_JS: &str = include_str!("../static/gallery.js");
const ADMIN_JS: &str = include_str!("../static/admin.js");
const LOGIN_JS: &str = include_str!("../static/login.js");
const SESSION_JS: &str = include_str!("../static/session.js");
const MUSEUM_CSS: &str = include_str!("../static/museum.css");

const JS_CONTENT_TYPE: &str = "application/javascript; charset=utf-8";

fn javascript(body: &'static str) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, JS_CONTENT_TYPE)], body).into_response()
}

/// GET / - public gallery
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /admin
pub async fn serve_admin() -> Html<&'static str> {
    Html(ADMIN_HTML)
}

/// GET /login
pub async fn serve_login() -> Html<&'static str> {
    Html(LOGIN_HTML)
}

pub async fn serve_gallery_js() -> Response {
    javascript(GALLERY_JS)
}

pub async fn serve_admin_js() -> Response {
    javascript(ADMIN_JS)
}

pub async fn serve_login_js() -> Response {
    javascript(LOGIN_JS)
}

pub async fn serve_session_js() -> Response {
    javascript(SESSION_JS)
}

pub async fn serve_css() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        MUSEUM_CSS,
    )
        .into_response()
}

/// GET /static/config.js
///
/// Publishes the API base URL and Google client id as `window.VMUSEUM_CONFIG`.
pub async fn serve_config_js(State(state): State<UiState>) -> Response {
    match serde_json::to_string(state.client_config.as_ref()) {
        Ok(json) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, JS_CONTENT_TYPE),
                (header::CACHE_CONTROL, "no-store"),
            ],
            format!("window.VMUSEUM_CONFIG = {};\n", json),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to serialize client config");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub fn asset_routes() -> Router<UiState> {
    Router::new()
        .route("/", get(serve_index))
        .route("/index.html", get(serve_index))
        .route("/admin", get(serve_admin))
        .route("/admin.html", get(serve_admin))
        .route("/login", get(serve_login))
        .route("/login.html", get(serve_login))
        .route("/static/config.js", get(serve_config_js))
        .route("/static/session.js", get(serve_session_js))
        .route("/static/gallery.js", get(serve_gallery_js))
        .route("/static/admin.js", get(serve_admin_js))
        .route("/static/login.js", get(serve_login_js))
        .route("/static/museum.css", get(serve_css))
}

//! Admin gate for mutating routes
//!
//! The admin panel signs in with Google Identity Services and sends the ID
//! token as `Authorization: Bearer <jwt>`. The gate reads the `email` claim
//! from the payload segment and checks it against the allow-list. The token
//! signature is not verified.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};
use vmuseum_common::config::AdminSection;

use crate::AppState;

/// Who may use the admin routes
#[derive(Debug, Clone, Default)]
pub struct AdminPolicy {
    /// When false every request passes
    pub require_login: bool,
    /// Empty means any signed-in email
    pub allowed_emails: Vec<String>,
}

impl From<&AdminSection> for AdminPolicy {
    fn from(section: &AdminSection) -> Self {
        Self {
            require_login: section.require_login,
            allowed_emails: section.allowed_emails.clone(),
        }
    }
}

impl AdminPolicy {
    pub fn allows(&self, email: &str) -> bool {
        self.allowed_emails.is_empty()
            || self
                .allowed_emails
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(email))
    }
}

/// Claims read from an ID token payload
#[derive(Debug, Clone, Deserialize)]
pub struct IdTokenClaims {
    #[serde(default)]
    pub email: Option<String>,
}

/// Decode the payload segment of a JWT without checking its signature
pub fn decode_id_token(token: &str) -> Result<IdTokenClaims, AuthError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if !payload.is_empty() => payload,
        _ => return Err(AuthError::MalformedToken),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| AuthError::MalformedToken)?;
    serde_json::from_slice(&bytes).map_err(|_| AuthError::MalformedToken)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication middleware
///
/// Applied to the admin routes only.
pub async fn admin_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    if !state.admin.require_login {
        return Ok(next.run(request).await);
    }

    let token = bearer_token(&request).ok_or(AuthError::MissingToken)?;
    let claims = decode_id_token(token)?;
    let email = claims
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or(AuthError::MissingEmail)?;

    if !state.admin.allows(&email) {
        warn!(email = %email, "Admin request from email not on the allow-list");
        return Err(AuthError::NotAllowed(email));
    }

    debug!(email = %email, "Admin request authorized");
    Ok(next.run(request).await)
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    MalformedToken,
    MissingEmail,
    NotAllowed(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Sign-in required".to_string(),
            ),
            AuthError::MalformedToken => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid ID token".to_string(),
            ),
            AuthError::MissingEmail => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "ID token carries no email".to_string(),
            ),
            AuthError::NotAllowed(email) => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                format!("{} is not an administrator", email),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

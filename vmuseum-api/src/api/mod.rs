//! HTTP API handlers for vmuseum-api

pub mod auth;
pub mod collections;
pub mod health;
pub mod index;
pub mod items;
pub mod public_art;

pub use auth::{admin_gate, AdminPolicy};
pub use collections::{collection_admin_routes, collection_routes};
pub use health::health_routes;
pub use index::index_routes;
pub use items::{item_admin_routes, item_routes};
pub use public_art::public_art_routes;

use crate::ApiError;

/// Parse a numeric path id, rejecting anything else with 400
pub(crate) fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid id: {}", raw)))
}

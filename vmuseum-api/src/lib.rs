//! vmuseum-api library interface
//!
//! Catalog REST API: local items and collections kept in a JSON file, plus a
//! read-only view over the Metropolitan Museum public collection.

pub mod api;
pub mod error;
pub mod extractors;
pub mod services;
pub mod store;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::AdminPolicy;
use crate::services::met::MetCatalog;
use crate::store::CatalogStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Local catalog
    pub store: Arc<CatalogStore>,
    /// Public collection facade
    pub catalog: Arc<MetCatalog>,
    /// Who may call the mutating routes
    pub admin: Arc<AdminPolicy>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: CatalogStore, catalog: MetCatalog, admin: AdminPolicy) -> Self {
        Self {
            store: Arc::new(store),
            catalog: Arc::new(catalog),
            admin: Arc::new(admin),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// Mutating routes sit behind [`api::admin_gate`]; everything else is public.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;

    // Protected routes (admin only)
    let protected = Router::new()
        .merge(api::item_admin_routes())
        .merge(api::collection_admin_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::admin_gate,
        ));

    // Public routes
    let public = Router::new()
        .merge(api::index_routes())
        .merge(api::item_routes())
        .merge(api::collection_routes())
        .merge(api::public_art_routes())
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

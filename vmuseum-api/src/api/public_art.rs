//! Public collection endpoints
//!
//! Thin wrappers over [`MetCatalog`](crate::services::met::MetCatalog). Works
//! lookups never fail outward; the featured sample and the artist list do when
//! the upstream gives nothing usable.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use crate::services::met::{ArtistEntry, ArtistRef, WorkDetail};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ByArtistQuery {
    pub artist: Option<String>,
}

/// GET /api/public-art
pub async fn featured(State(state): State<AppState>) -> ApiResult<Json<Vec<WorkDetail>>> {
    match state.catalog.featured_works().await {
        Ok(works) => Ok(Json(works)),
        Err(e) => {
            error!(error = %e, "Featured works unavailable");
            Err(ApiError::Upstream(
                "Failed to fetch data from the public collection".to_string(),
            ))
        }
    }
}

/// GET /api/public-art/artists
pub async fn artists(State(state): State<AppState>) -> ApiResult<Json<Vec<ArtistEntry>>> {
    state.catalog.list_artists().await.map(Json).map_err(|e| {
        error!(error = %e, "Artist list unavailable");
        ApiError::Upstream("Failed to load artists from the public collection".to_string())
    })
}

/// GET /api/public-art/artist/:artist_id
pub async fn works_by_artist_id(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> Json<Vec<WorkDetail>> {
    let limit = state.catalog.works_limit_by_id();
    Json(
        state
            .catalog
            .list_works_by_artist(&ArtistRef::Id(artist_id), limit)
            .await,
    )
}

/// GET /api/public-art/by-artist?artist=NAME
pub async fn works_by_artist_name(
    State(state): State<AppState>,
    Query(query): Query<ByArtistQuery>,
) -> Json<Vec<WorkDetail>> {
    let limit = state.catalog.works_limit_by_name();
    let name = query.artist.unwrap_or_default();
    Json(
        state
            .catalog
            .list_works_by_artist(&ArtistRef::Name(name), limit)
            .await,
    )
}

pub fn public_art_routes() -> Router<AppState> {
    Router::new()
        .route("/api/public-art", get(featured))
        .route("/api/public-art/artists", get(artists))
        .route("/api/public-art/artist/:artist_id", get(works_by_artist_id))
        .route("/api/public-art/by-artist", get(works_by_artist_name))
}

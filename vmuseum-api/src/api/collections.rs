//! Collection endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use super::parse_id;
use crate::store::{Collection, CollectionInput, Item};
use crate::extractors::ApiJson;
use crate::{ApiResult, AppState};

/// GET /api/collections
pub async fn list_collections(State(state): State<AppState>) -> Json<Vec<Collection>> {
    Json(state.store.list_collections().await)
}

/// GET /api/collections/:name/items
///
/// Exact name match. An unknown name is an empty list, not a 404.
pub async fn collection_items(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<Vec<Item>> {
    Json(state.store.items_in_collection(&name).await)
}

/// POST /api/collections
pub async fn create_collection(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CollectionInput>,
) -> ApiResult<(StatusCode, Json<Collection>)> {
    let collection = state.store.create_collection(&input).await?;
    Ok((StatusCode::CREATED, Json(collection)))
}

/// PUT /api/collections/:id
pub async fn update_collection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<CollectionInput>,
) -> ApiResult<Json<Collection>> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.update_collection(id, &input).await?))
}

/// DELETE /api/collections/:id
pub async fn delete_collection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    state.store.delete_collection(id).await?;
    Ok(Json(json!({ "message": "Collection deleted" })))
}

pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/api/collections", get(list_collections))
        .route("/api/collections/:name/items", get(collection_items))
}

pub fn collection_admin_routes() -> Router<AppState> {
    use axum::routing::{post, put};

    Router::new()
        .route("/api/collections", post(create_collection))
        .route(
            "/api/collections/:id",
            put(update_collection).delete(delete_collection),
        )
}

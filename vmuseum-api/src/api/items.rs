//! Museum item endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use super::parse_id;
use crate::store::{Item, ItemInput};
use crate::extractors::ApiJson;
use crate::{ApiResult, AppState};

/// GET /api/items
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.store.list_items().await)
}

/// GET /api/items/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Item>> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.get_item(id).await?))
}

/// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ItemInput>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let item = state.store.create_item(&input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/items/:id
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<ItemInput>,
) -> ApiResult<Json<Item>> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.update_item(id, &input).await?))
}

/// DELETE /api/items/:id
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    state.store.delete_item(id).await?;
    Ok(Json(json!({ "message": "Item deleted" })))
}

/// Read-only item routes
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/api/items", get(list_items))
        .route("/api/items/:id", get(get_item))
}

/// Item routes behind the admin gate
pub fn item_admin_routes() -> Router<AppState> {
    use axum::routing::{post, put};

    Router::new()
        .route("/api/items", post(create_item))
        .route("/api/items/:id", put(update_item).delete(delete_item))
}

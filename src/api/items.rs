use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::models::item::Item;
use crate::validate;
use crate::AppState;

const ITEM_DELETED: &str = "Item Deleted.";

/// A missing or unparseable JSON body is treated as an empty object, so the
/// validator reports every required field as blank instead of the framework
/// rejecting the request. Auth guards also stay ahead of body errors this
/// way.
fn lenient_body(body: Option<Json<Value>>) -> Value {
    body.map(|Json(v)| v).unwrap_or_else(|| json!({}))
}

/// GET /item/:name
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Item>, ApiError> {
    match state.db.find_item(&name).await? {
        Some(item) => Ok(Json(item)),
        None => Err(ApiError::ItemNotFound),
    }
}

/// POST /item/:name — requires a fresh access token.
///
/// The duplicate check runs before body validation; a POST to an existing
/// name reports the conflict even when the body is unusable.
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    state.auth.authorize(&headers, &state.blacklist, true)?;

    if state.db.find_item(&name).await?.is_some() {
        return Err(ApiError::ItemExists(name));
    }

    let payload = validate::item_payload(&lenient_body(body)).map_err(ApiError::FieldErrors)?;

    let item = state
        .db
        .insert_item(&name, payload.price, payload.store_id)
        .await
        .map_err(|e| {
            tracing::error!("inserting item '{name}' failed: {e:#}");
            ApiError::ItemInsertFailed
        })?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /item/:name — requires any valid, non-revoked access token.
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    state.auth.authorize(&headers, &state.blacklist, false)?;

    if state.db.delete_item(&name).await? {
        Ok(Json(json!({ "message": ITEM_DELETED })))
    } else {
        Err(ApiError::ItemNotFound)
    }
}

/// PUT /item/:name — upsert, no authentication (carried over from the
/// legacy service). For an existing item only the price changes; `store_id`
/// in the body is accepted but ignored. Returns 200 on both paths.
pub async fn upsert_item(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<Item>, ApiError> {
    let payload = validate::item_payload(&lenient_body(body)).map_err(ApiError::FieldErrors)?;

    let item = match state.db.find_item(&name).await? {
        Some(_) => state.db.update_item_price(&name, payload.price).await?,
        None => {
            state
                .db
                .insert_item(&name, payload.price, payload.store_id)
                .await?
        }
    };

    Ok(Json(item))
}

/// GET /item — unauthenticated, unfiltered listing.
pub async fn list_items(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let items = state.db.list_items().await?;
    Ok(Json(json!({ "items": items })))
}

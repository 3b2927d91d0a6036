use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::models::store::StoreWithItems;
use crate::AppState;

const STORE_DELETED: &str = "Store deleted.";

/// GET /store/:name — the store plus every item it owns.
pub async fn get_store(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<StoreWithItems>, ApiError> {
    match state.db.find_store(&name).await? {
        Some(store) => {
            let items = state.db.items_in_store(store.id).await?;
            Ok(Json(StoreWithItems::new(store, items)))
        }
        None => Err(ApiError::StoreNotFound),
    }
}

/// POST /store/:name — the path name is the only input.
pub async fn create_store(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<(StatusCode, Json<StoreWithItems>), ApiError> {
    if state.db.find_store(&name).await?.is_some() {
        return Err(ApiError::StoreExists(name));
    }

    let store = state.db.insert_store(&name).await.map_err(|e| {
        tracing::error!("inserting store '{name}' failed: {e:#}");
        ApiError::StoreInsertFailed
    })?;

    Ok((
        StatusCode::CREATED,
        Json(StoreWithItems::new(store, Vec::new())),
    ))
}

/// DELETE /store/:name — reports success whether or not the store existed.
pub async fn delete_store(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.db.delete_store(&name).await?;
    Ok(Json(json!({ "message": STORE_DELETED })))
}

/// GET /store — every store with its items.
pub async fn list_stores(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let mut stores = Vec::new();
    for store in state.db.list_stores().await? {
        let items = state.db.items_in_store(store.id).await?;
        stores.push(StoreWithItems::new(store, items));
    }
    Ok(Json(json!({ "stores": stores })))
}

use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod items;
pub mod stores;
pub mod users;

/// Build the resource router. Routes live at the root; the caller adds
/// state and outer middleware.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/item", get(items::list_items))
        .route(
            "/item/:name",
            get(items::get_item)
                .post(items::create_item)
                .put(items::upsert_item)
                .delete(items::delete_item),
        )
        .route("/store", get(stores::list_stores))
        .route(
            "/store/:name",
            get(stores::get_store)
                .post(stores::create_store)
                .delete(stores::delete_store),
        )
        .route("/user/register", post(users::register))
        .route("/user/login", post(users::login))
        .route("/user/logout", post(users::logout))
        .route("/user/token/refresh", post(users::refresh))
        .route("/user/:id", get(users::get_user).delete(users::delete_user))
        .layer(TraceLayer::new_for_http())
        .fallback(fallback_404)
}

async fn fallback_404() -> StatusCode {
    StatusCode::NOT_FOUND
}

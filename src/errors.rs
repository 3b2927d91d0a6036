use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;

/// Every handler failure converges here; `IntoResponse` turns each variant
/// into the wire-contract body and status code. Client-facing messages match
/// the legacy service verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Item not found.")]
    ItemNotFound,

    #[error("An item with name '{0}' already exists.")]
    ItemExists(String),

    #[error("An error occurred while inserting the item.")]
    ItemInsertFailed,

    #[error("Store not found.")]
    StoreNotFound,

    #[error("A store with name '{0}' already exists.")]
    StoreExists(String),

    #[error("An error occurred while inserting the store.")]
    StoreInsertFailed,

    #[error("User not found.")]
    UserNotFound,

    #[error("A user with that username already exists.")]
    UserExists,

    #[error("Invalid credentials!")]
    InvalidCredentials,

    /// Blank-field item validation: every failing field reported at once.
    #[error("invalid request fields")]
    FieldErrors(BTreeMap<String, String>),

    /// Schema-style user validation: `{field: [messages]}` body.
    #[error("schema validation failed")]
    SchemaErrors(BTreeMap<String, Vec<String>>),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::ItemNotFound | ApiError::StoreNotFound | ApiError::UserNotFound => {
                message_response(StatusCode::NOT_FOUND, &self.to_string())
            }

            ApiError::ItemExists(_) | ApiError::StoreExists(_) | ApiError::UserExists => {
                message_response(StatusCode::BAD_REQUEST, &self.to_string())
            }

            ApiError::InvalidCredentials => {
                message_response(StatusCode::UNAUTHORIZED, &self.to_string())
            }

            ApiError::ItemInsertFailed | ApiError::StoreInsertFailed => {
                message_response(StatusCode::INTERNAL_SERVER_ERROR, &self.to_string())
            }

            ApiError::FieldErrors(fields) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": fields }))).into_response()
            }

            ApiError::SchemaErrors(fields) => {
                (StatusCode::BAD_REQUEST, Json(json!(fields))).into_response()
            }

            ApiError::Auth(e) => (
                e.status(),
                Json(json!({ "message": e.to_string(), "error": e.code() })),
            )
                .into_response(),

            ApiError::Internal(e) => {
                tracing::error!("internal error: {e:#}");
                message_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.",
                )
            }
        }
    }
}

fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

// ── Tests ───────────────────────────────────────────────────────

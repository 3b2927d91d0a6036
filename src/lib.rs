//! Stockroom — inventory REST API with JWT authentication.
//!
//! Library surface shared by the binary and the integration tests in
//! `tests/`.

pub mod api;
pub mod auth;
pub mod blacklist;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod store;
pub mod validate;

use auth::JwtAuth;
use blacklist::Blacklist;
use store::postgres::PgStore;

/// Shared application state passed to handlers.
pub struct AppState {
    pub db: PgStore,
    pub auth: JwtAuth,
    pub blacklist: Blacklist,
}

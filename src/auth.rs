//! Token issuing and verification.
//!
//! Access tokens come in two flavors: *fresh* ones issued directly from a
//! password-verified login, and non-fresh ones minted by the refresh
//! endpoint. Refresh tokens are a separate class — they are only accepted by
//! the refresh endpoint and never as an access token (and vice versa).
//!
//! Handlers call the guard methods (`authorize` / `authorize_refresh`)
//! explicitly at the top of each protected route; the guard returns the
//! decoded claims or a typed `AuthError` that maps to a distinct status and
//! machine-checkable `error` code.

use axum::http::{header, HeaderMap, StatusCode};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::blacklist::Blacklist;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// Claims embedded in every token the service issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the numeric user id.
    pub sub: i64,
    /// Unique token identifier; the revocation handle.
    pub jti: String,
    /// "access" or "refresh".
    pub token_type: String,
    /// True only for access tokens issued at login.
    pub fresh: bool,
    /// Issued-at (Unix seconds).
    pub iat: i64,
    /// Expiry (Unix seconds).
    pub exp: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing Authorization Header")]
    MissingToken,

    #[error("Token has expired")]
    Expired,

    #[error("Signature verification failed")]
    InvalidSignature,

    #[error("Invalid token")]
    Malformed,

    #[error("Token has been revoked")]
    Revoked,

    #[error("Fresh token required")]
    NotFresh,

    #[error("Only {expected} tokens are allowed")]
    WrongTokenClass { expected: &'static str },
}

impl AuthError {
    /// Stable machine-checkable code, returned in the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "authorization_required",
            AuthError::Expired => "token_expired",
            AuthError::InvalidSignature | AuthError::Malformed => "invalid_token",
            AuthError::Revoked => "token_revoked",
            AuthError::NotFresh => "fresh_token_required",
            AuthError::WrongTokenClass { .. } => "wrong_token_class",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingToken
            | AuthError::Expired
            | AuthError::Revoked
            | AuthError::NotFresh => StatusCode::UNAUTHORIZED,
            AuthError::InvalidSignature
            | AuthError::Malformed
            | AuthError::WrongTokenClass { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// HS256 signer/verifier plus the TTLs for each token class.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl JwtAuth {
    pub fn new(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    /// Issue a signed access token for `user_id`. `fresh` is true only when
    /// the caller has just verified the user's password.
    pub fn issue_access_token(&self, user_id: i64, fresh: bool) -> anyhow::Result<String> {
        self.issue(user_id, TOKEN_TYPE_ACCESS, fresh, self.access_ttl_secs)
    }

    /// Issue a signed refresh token. Refresh tokens are never fresh.
    pub fn issue_refresh_token(&self, user_id: i64) -> anyhow::Result<String> {
        self.issue(user_id, TOKEN_TYPE_REFRESH, false, self.refresh_ttl_secs)
    }

    fn issue(
        &self,
        user_id: i64,
        token_type: &str,
        fresh: bool,
        ttl_secs: i64,
    ) -> anyhow::Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            jti: Uuid::new_v4().to_string(),
            token_type: token_type.to_string(),
            fresh,
            iat: now,
            exp: now + ttl_secs,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Validate signature and expiry; no class, freshness, or revocation
    /// checks. The guards below layer those on top.
    pub fn decode_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::Malformed,
            })
    }

    /// Guard for routes protected by an access token. Checks, in order:
    /// bearer token present, signature/expiry valid, token class is access,
    /// jti not revoked, and (if `require_fresh`) the fresh flag.
    pub fn authorize(
        &self,
        headers: &HeaderMap,
        blacklist: &Blacklist,
        require_fresh: bool,
    ) -> Result<Claims, AuthError> {
        let claims = self.decode_bearer(headers)?;
        if claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(AuthError::WrongTokenClass {
                expected: "non-refresh",
            });
        }
        if blacklist.contains(&claims.jti) {
            return Err(AuthError::Revoked);
        }
        if require_fresh && !claims.fresh {
            return Err(AuthError::NotFresh);
        }
        Ok(claims)
    }

    /// Guard for the token-refresh route: same checks, but the token must be
    /// a refresh token. Revoked refresh tokens are rejected too.
    pub fn authorize_refresh(
        &self,
        headers: &HeaderMap,
        blacklist: &Blacklist,
    ) -> Result<Claims, AuthError> {
        let claims = self.decode_bearer(headers)?;
        if claims.token_type != TOKEN_TYPE_REFRESH {
            return Err(AuthError::WrongTokenClass {
                expected: "refresh",
            });
        }
        if blacklist.contains(&claims.jti) {
            return Err(AuthError::Revoked);
        }
        Ok(claims)
    }

    fn decode_bearer(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
        self.decode_token(token)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

// ── Tests ───────────────────────────────────────────────────────

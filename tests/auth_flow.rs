//! Token lifecycle tests against the library surface: issue at login,
//! verify, revoke at logout, and the freshness downgrade on refresh.

use stockroom::auth::{AuthError, JwtAuth, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use stockroom::blacklist::Blacklist;

#[test]
fn login_token_is_valid_until_logout() {
    let auth = JwtAuth::new("flow-secret", 900, 86400);
    let blacklist = Blacklist::new();

    // Login: fresh access token.
    let token = auth.issue_access_token(3, true).unwrap();
    let claims = auth.decode_token(&token).unwrap();
    assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
    assert!(claims.fresh);

    // Logout: revoke the jti, after which the same token fails as revoked.
    blacklist.add(&claims.jti);
    let headers = bearer(&token);
    assert_eq!(
        auth.authorize(&headers, &blacklist, false).unwrap_err(),
        AuthError::Revoked
    );
}

#[test]
fn refresh_chain_never_produces_fresh_tokens() {
    let auth = JwtAuth::new("flow-secret", 900, 86400);
    let blacklist = Blacklist::new();

    let refresh = auth.issue_refresh_token(3).unwrap();
    let refresh_claims = auth
        .authorize_refresh(&bearer(&refresh), &blacklist)
        .unwrap();
    assert_eq!(refresh_claims.token_type, TOKEN_TYPE_REFRESH);

    // The exchanged access token is bound to the same subject but not fresh.
    let access = auth.issue_access_token(refresh_claims.sub, false).unwrap();
    let claims = auth.authorize(&bearer(&access), &blacklist, false).unwrap();
    assert_eq!(claims.sub, 3);
    assert!(!claims.fresh);
    assert_eq!(
        auth.authorize(&bearer(&access), &blacklist, true).unwrap_err(),
        AuthError::NotFresh
    );
}

#[test]
fn revoking_a_refresh_token_blocks_further_exchanges() {
    let auth = JwtAuth::new("flow-secret", 900, 86400);
    let blacklist = Blacklist::new();

    let refresh = auth.issue_refresh_token(8).unwrap();
    let jti = auth.decode_token(&refresh).unwrap().jti;
    blacklist.add(&jti);

    assert_eq!(
        auth.authorize_refresh(&bearer(&refresh), &blacklist)
            .unwrap_err(),
        AuthError::Revoked
    );
}

fn bearer(token: &str) -> axum::http::HeaderMap {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        axum::http::header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    headers
}

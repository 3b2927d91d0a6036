//! End-to-end tests that exercise the full request pipeline against a real
//! database: upsert semantics, duplicate handling, and the delete-behavior
//! asymmetry between stores and items.
//!
//! **Requirements:**
//! - PostgreSQL reachable at DATABASE_URL (migrations are applied on setup)
//! - e.g. `DATABASE_URL=postgres://localhost/stockroom_test cargo test --test persistence`
//!
//! Each test skips itself when DATABASE_URL is unset, so the default test
//! run stays green without infrastructure. Test data uses unique names and
//! is left in place.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use stockroom::{api, auth::JwtAuth, blacklist::Blacklist, store::postgres::PgStore, AppState};

const TEST_SECRET: &str = "persistence-secret";

async fn test_state() -> Option<Arc<AppState>> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let db = PgStore::connect(&url).await.expect("connect to DATABASE_URL");
    db.migrate().await.expect("apply migrations");
    Some(Arc::new(AppState {
        db,
        auth: JwtAuth::new(TEST_SECRET, 900, 86400),
        blacklist: Blacklist::new(),
    }))
}

fn app(state: Arc<AppState>) -> axum::Router {
    api::router().with_state(state)
}

fn json_request(method: &str, uri: &str, body: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a store with a unique name and return its id.
async fn create_store(app: &axum::Router) -> i64 {
    let name = format!("store-{}", Uuid::new_v4());
    let resp = app
        .clone()
        .oneshot(json_request("POST", &format!("/store/{name}"), "", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["id"].as_i64().unwrap()
}

#[tokio::test]
async fn put_creates_then_updates_only_price() {
    let Some(state) = test_state().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let app = app(state);
    let store_id = create_store(&app).await;
    let name = format!("item-{}", Uuid::new_v4());

    // First PUT on an absent name creates the item from both fields.
    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/item/{name}"),
            &format!(r#"{{"price": 5.0, "store_id": {store_id}}}"#),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await;
    assert_eq!(created["price"], 5.0);
    assert_eq!(created["store_id"], store_id);

    // Second PUT changes the price; the store_id in the body is ignored.
    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/item/{name}"),
            &format!(r#"{{"price": 9.5, "store_id": {}}}"#, store_id + 12345),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["price"], 9.5);
    assert_eq!(updated["store_id"], store_id);

    let resp = app
        .oneshot(
            Request::get(format!("/item/{name}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = body_json(resp).await;
    assert_eq!(fetched["price"], 9.5);
    assert_eq!(fetched["store_id"], store_id);
}

#[tokio::test]
async fn duplicate_item_post_conflicts_and_preserves_record() {
    let Some(state) = test_state().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let token = state.auth.issue_access_token(1, true).unwrap();
    let app = app(state);
    let store_id = create_store(&app).await;
    let name = format!("item-{}", Uuid::new_v4());

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/item/{name}"),
            &format!(r#"{{"price": 3.25, "store_id": {store_id}}}"#),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/item/{name}"),
            &format!(r#"{{"price": 7.0, "store_id": {store_id}}}"#),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(
        body["message"],
        format!("An item with name '{name}' already exists.")
    );

    // The original record is untouched.
    let resp = app
        .oneshot(
            Request::get(format!("/item/{name}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let fetched = body_json(resp).await;
    assert_eq!(fetched["price"], 3.25);
}

#[tokio::test]
async fn store_delete_is_idempotent_but_item_delete_is_not() {
    let Some(state) = test_state().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let token = state.auth.issue_access_token(1, true).unwrap();
    let app = app(state);

    // Deleting an absent store still reports success.
    let resp = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/store/absent-{}", Uuid::new_v4()),
            "",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["message"], "Store deleted.");

    // Deleting an absent item is a 404.
    let resp = app
        .oneshot(json_request(
            "DELETE",
            &format!("/item/absent-{}", Uuid::new_v4()),
            "",
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["message"], "Item not found.");
}

#[tokio::test]
async fn duplicate_registration_rejected_first_user_survives() {
    let Some(state) = test_state().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let app = app(state);
    let username = format!("user-{}", Uuid::new_v4());
    let creds = format!(r#"{{"username": "{username}", "password": "hunter2"}}"#);

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/user/register", &creds, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(resp).await["message"],
        "User created successfully."
    );

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/user/register", &creds, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["message"],
        "A user with that username already exists."
    );

    // The first record is still there and usable.
    let resp = app
        .oneshot(json_request("POST", "/user/login", &creds, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let tokens = body_json(resp).await;
    assert!(tokens["access_token"].as_str().is_some());
    assert!(tokens["refresh_token"].as_str().is_some());
}

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use hearth_api::{rest, store, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret";

/// Fresh in-memory database. A single connection keeps every query on the
/// same memory instance.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    store::init_schema(&pool).await.unwrap();
    pool
}

pub async fn test_state() -> (AppState, SqlitePool) {
    let pool = test_pool().await;
    let state = AppState::new(pool.clone(), TEST_SECRET).unwrap();
    (state, pool)
}

pub async fn test_app() -> (Router, AppState, SqlitePool) {
    let (state, pool) = test_state().await;
    (rest::router(state.clone()), state, pool)
}

/// Fire one request at the router and decode the JSON response.
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        // Most responses are the app's JSON envelope; axum's built-in extractor
        // rejections (e.g. a malformed request body) reply in plain text, so
        // fall back to the raw string instead of panicking on those.
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

pub async fn register(
    app: &Router,
    email: &str,
    password: &str,
    name: &str,
) -> (StatusCode, Value) {
    request(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "email": email, "password": password, "name": name })),
    )
    .await
}

pub async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    request(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

/// Register and log in, returning a bearer token for `email`.
pub async fn signup(app: &Router, email: &str, password: &str, name: &str) -> String {
    let (status, _) = register(app, email, password, name).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = login(app, email, password).await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

pub async fn user_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}

mod common;

use axum::http::StatusCode;
use common::{login, register, request, test_app, test_state, user_count};
use hearth_api::error::AppError;
use serde_json::json;

// The pre-check in the registration service is an optimization; the UNIQUE
// constraint must reject a duplicate insert on its own.
#[tokio::test]
async fn insert_time_uniqueness_holds_without_the_pre_check() {
    let (state, _pool) = test_state().await;

    state
        .users
        .create("ana@example.com", "Ana", "fake-hash")
        .await
        .unwrap();
    let err = state
        .users
        .create("ana@example.com", "Imposter", "other-hash")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail));
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let (app, state, _pool) = test_app().await;

    let (status, body) = register(&app, "ana@example.com", "hunter2hunter2", "Ana").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "ana@example.com");
    assert_eq!(body["name"], "Ana");
    assert!(body["id"].is_i64());
    assert!(body["created_at"].is_string());

    let (status, body) = login(&app, "ana@example.com", "hunter2hunter2").await;
    assert_eq!(status, StatusCode::OK);

    // The token must verify back to the registered user's id.
    let token = body["access_token"].as_str().unwrap();
    let subject = state.tokens.verify(token).unwrap();
    let user = state
        .users
        .find_by_email("ana@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(subject, user.id);
}

#[tokio::test]
async fn responses_never_contain_the_password_hash() {
    let (app, _state, _pool) = test_app().await;

    let (status, body) = register(&app, "ana@example.com", "hunter2hunter2", "Ana").await;
    assert_eq!(status, StatusCode::CREATED);

    let mut keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    keys.sort();
    assert!(!body.to_string().contains("password"));
    assert_eq!(keys, ["created_at", "email", "id", "name"]);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_regardless_of_case() {
    let (app, _state, pool) = test_app().await;

    let (status, _) = register(&app, "ana@example.com", "hunter2hunter2", "Ana").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register(&app, "ANA@Example.COM", "other-password", "Imposter").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already exists");

    // The rejected attempt must not have written anything.
    assert_eq!(user_count(&pool).await, 1);
}

#[tokio::test]
async fn login_accepts_any_email_casing() {
    let (app, _state, _pool) = test_app().await;

    register(&app, "ana@example.com", "hunter2hunter2", "Ana").await;
    let (status, _) = login(&app, "  ANA@example.com ", "hunter2hunter2").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn bad_password_and_unknown_email_are_indistinguishable() {
    let (app, _state, _pool) = test_app().await;

    register(&app, "ana@example.com", "hunter2hunter2", "Ana").await;

    let (wrong_status, wrong_body) = login(&app, "ana@example.com", "not-the-password").await;
    let (unknown_status, unknown_body) = login(&app, "nobody@example.com", "whatever").await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn malformed_register_body_is_rejected() {
    let (app, _state, pool) = test_app().await;

    let (status, _) = request(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "email": "ana@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(user_count(&pool).await, 0);
}

// The end-to-end scenario: register, duplicate register, good login, bad
// login, unknown login.
#[tokio::test]
async fn account_lifecycle_scenario() {
    let (app, _state, _pool) = test_app().await;

    let (status, body) = register(&app, "a@x.com", "secret1", "A").await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("password_hash").is_none());

    let (status, _) = register(&app, "A@X.com", "other", "A2").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = login(&app, "a@x.com", "secret1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].as_str().is_some());

    let (status, wrong) = login(&app, "a@x.com", "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, missing) = login(&app, "missing@x.com", "anything").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong, missing);
}

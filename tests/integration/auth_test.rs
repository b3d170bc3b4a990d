//! Integration tests for authentication flow.

mod helpers;

use axum::http::StatusCode;
use chrono::Duration;

#[tokio::test]
async fn test_register_returns_account_without_hash() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/register",
            Some(serde_json::json!({ "username": "alice", "password": "secret123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["username"], "alice");
    assert!(response.body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let app = helpers::TestApp::new().await;
    app.register_and_login("alice", "secret123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/register",
            Some(serde_json::json!({ "username": "alice", "password": "another-secret" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_register_short_password_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/register",
            Some(serde_json::json!({ "username": "bob", "password": "short" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = helpers::TestApp::new().await;
    app.register_and_login("alice", "secret123").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(serde_json::json!({ "username": "alice", "password": "wrong-password" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(serde_json::json!({ "username": "nobody", "password": "secret123" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
async fn test_me_requires_bearer_token() {
    let app = helpers::TestApp::new().await;

    let missing = app.request("GET", "/api/v1/auth/me", None, None).await;
    let garbage = app
        .request("GET", "/api/v1/auth/me", None, Some("not-a-token"))
        .await;

    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body, garbage.body);
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = helpers::TestApp::new().await;
    let data = app.register_and_login("alice", "secret123").await;
    let refresh = data["refresh_token"].as_str().unwrap();

    let response = app
        .request("GET", "/api/v1/auth/me", None, Some(refresh))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let access = data["access_token"].as_str().unwrap();
    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(serde_json::json!({ "refresh_token": access })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_lifecycle_with_expiry_and_refresh() {
    let app = helpers::TestApp::new().await;
    let data = app.register_and_login("alice", "secret123").await;
    let access = data["access_token"].as_str().unwrap().to_string();
    let refresh = data["refresh_token"].as_str().unwrap().to_string();
    assert_eq!(data["user"]["username"], "alice");

    let me = app
        .request("GET", "/api/v1/auth/me", None, Some(&access))
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["username"], "alice");

    app.clock.advance(Duration::minutes(15) + Duration::seconds(1));

    let expired = app
        .request("GET", "/api/v1/auth/me", None, Some(&access))
        .await;
    assert_eq!(expired.status, StatusCode::UNAUTHORIZED);

    let refreshed = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);

    let new_access = refreshed.body["data"]["access_token"].as_str().unwrap();
    assert_ne!(new_access, access);

    let me = app
        .request("GET", "/api/v1/auth/me", None, Some(new_access))
        .await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_token_expires_after_seven_days() {
    let app = helpers::TestApp::new().await;
    let data = app.register_and_login("alice", "secret123").await;
    let refresh = data["refresh_token"].as_str().unwrap();

    app.clock.advance(Duration::days(7));

    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/v1/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

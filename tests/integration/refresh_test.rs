//! Integration tests for refresh-token.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{TestApp, TestResponse};

async fn refresh(app: &TestApp, refresh_token: &str) -> TestResponse {
    app.request(
        "POST",
        "/refresh-token",
        Some(json!({ "refresh_token": refresh_token })),
        None,
    )
    .await
}

fn field<'a>(body: &'a Value, key: &str) -> &'a str {
    body[key].as_str().unwrap()
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = TestApp::new().await;
    let login = app.login("alice", "wonderland").await;

    app.advance_secs(1);
    let response = refresh(&app, field(&login, "refresh_token")).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_ne!(response.text("access_token"), field(&login, "access_token"));
    assert_eq!(response.text("refresh_token"), field(&login, "refresh_token"));
    assert_eq!(response.text("token_id"), field(&login, "token_id"));
}

#[tokio::test]
async fn test_refreshed_access_token_verifies() {
    let app = TestApp::new().await;
    let login = app.login("alice", "wonderland").await;

    app.advance_secs(1);
    let refreshed = refresh(&app, field(&login, "refresh_token")).await;
    let access = refreshed.text("access_token").to_string();

    let verify = app.request("GET", "/verify-token", None, Some(&access)).await;

    assert_eq!(verify.status, StatusCode::OK);
    assert_eq!(verify.text("access_token"), access);
}

#[tokio::test]
async fn test_refresh_extends_access_lifetime() {
    let app = TestApp::new().await;
    let login = app.login("alice", "wonderland").await;

    app.advance_secs(3000);
    let refreshed = refresh(&app, field(&login, "refresh_token")).await;
    let access = refreshed.text("access_token").to_string();

    app.advance_secs(3000);
    let old = app
        .request("GET", "/verify-token", None, login["access_token"].as_str())
        .await;
    let new = app.request("GET", "/verify-token", None, Some(&access)).await;

    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rotates_when_enabled() {
    let app = TestApp::with_token_settings("rotate_refresh_token = true").await;
    let login = app.login("alice", "wonderland").await;

    app.advance_secs(1);
    let response = refresh(&app, field(&login, "refresh_token")).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_ne!(response.text("refresh_token"), field(&login, "refresh_token"));
    assert_eq!(response.text("token_id"), field(&login, "token_id"));
}

#[tokio::test]
async fn test_refresh_garbage_token() {
    let app = TestApp::new().await;

    let response = refresh(&app, "not-a-token").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text("error"), "VALIDATION");
}

#[tokio::test]
async fn test_refresh_after_logout() {
    let app = TestApp::new().await;
    let login = app.login("alice", "wonderland").await;

    let logout = app
        .request("GET", "/logout", None, login["access_token"].as_str())
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let response = refresh(&app, field(&login, "refresh_token")).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text("message"), "This token does not exist");
}

#[tokio::test]
async fn test_refresh_expired_token() {
    let app = TestApp::new().await;
    let login = app.login("alice", "wonderland").await;

    app.advance_secs(86401);
    let response = refresh(&app, field(&login, "refresh_token")).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text("message"), "Your refresh token was expired");
}

#[tokio::test]
async fn test_refresh_with_access_token_by_default() {
    let app = TestApp::new().await;
    let login = app.login("alice", "wonderland").await;

    let response = refresh(&app, field(&login, "access_token")).await;

    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_refresh_with_access_token_when_strict() {
    let app = TestApp::with_token_settings("strict_token_kind = true").await;
    let login = app.login("alice", "wonderland").await;

    let response = refresh(&app, field(&login, "access_token")).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text("error"), "VALIDATION");
}

#[tokio::test]
async fn test_refresh_missing_body_field() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/refresh-token", Some(json!({})), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

//! Integration tests for login, verify-token and logout.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;

    let body = app.login("alice", "wonderland").await;

    let keys: Vec<&str> = body
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec!["access_token", "refresh_token", "token_id", "identity.username"]
    );
    assert_eq!(body["identity.username"], "alice");
    assert_eq!(body["token_id"].as_str().unwrap().len(), 32);
}

#[tokio::test]
async fn test_login_twice_issues_distinct_pairs() {
    let app = TestApp::new().await;

    let first = app.login("alice", "wonderland").await;
    let second = app.login("alice", "wonderland").await;

    assert_ne!(first["token_id"], second["token_id"]);
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "username": "alice",
                "password": "looking-glass",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text("error"), "VALIDATION");
    assert_eq!(response.text("message"), "You use wrong credentials");
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "username": "nobody",
                "password": "wonderland",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_missing_field() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "username": "alice" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text("error"), "VALIDATION");
}

#[tokio::test]
async fn test_login_empty_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "username": "alice", "password": "" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_token_echoes_pair() {
    let app = TestApp::new().await;
    let login = app.login("alice", "wonderland").await;
    let access = login["access_token"].as_str().unwrap();

    let response = app.request("GET", "/verify-token", None, Some(access)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, login);
}

#[tokio::test]
async fn test_verify_token_without_header() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/verify-token", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text("error"), "MISSING_CREDENTIAL");
}

#[tokio::test]
async fn test_verify_token_wrong_scheme() {
    let app = TestApp::new().await;
    let login = app.login("alice", "wonderland").await;
    let header = format!("Token {}", login["access_token"].as_str().unwrap());

    let response = app
        .request_with_header("GET", "/verify-token", None, Some(&header))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text("error"), "MISSING_CREDENTIAL");
}

#[tokio::test]
async fn test_verify_token_lowercase_scheme_accepted() {
    let app = TestApp::new().await;
    let login = app.login("alice", "wonderland").await;
    let header = format!("bearer {}", login["access_token"].as_str().unwrap());

    let response = app
        .request_with_header("GET", "/verify-token", None, Some(&header))
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_verify_token_garbage() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/verify-token", None, Some("not-a-token"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text("error"), "MALFORMED_TOKEN");
}

#[tokio::test]
async fn test_verify_token_expiry_boundary() {
    let app = TestApp::new().await;
    let login = app.login("alice", "wonderland").await;
    let access = login["access_token"].as_str().unwrap();

    app.advance_secs(3600);
    let at_expiry = app.request("GET", "/verify-token", None, Some(access)).await;
    assert_eq!(at_expiry.status, StatusCode::OK);

    app.advance_secs(1);
    let past_expiry = app.request("GET", "/verify-token", None, Some(access)).await;
    assert_eq!(past_expiry.status, StatusCode::UNAUTHORIZED);
    assert_eq!(past_expiry.text("error"), "TOKEN_EXPIRED");
    assert_eq!(past_expiry.text("message"), "Your token was expired");
}

#[tokio::test]
async fn test_verify_unknown_token_id() {
    let app = TestApp::new().await;
    let forged = app
        .codec
        .mint_access(&crate::helpers::alice(), "0123456789abcdef0123456789abcdef")
        .unwrap();

    let response = app.request("GET", "/verify-token", None, Some(&forged)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text("error"), "UNKNOWN_TOKEN");
    assert_eq!(response.text("message"), "You use wrong token");
}

#[tokio::test]
async fn test_refresh_token_accepted_as_bearer_by_default() {
    let app = TestApp::new().await;
    let login = app.login("alice", "wonderland").await;
    let refresh = login["refresh_token"].as_str().unwrap();

    let response = app.request("GET", "/verify-token", None, Some(refresh)).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_token_rejected_as_bearer_when_strict() {
    let app = TestApp::with_token_settings("strict_token_kind = true").await;
    let login = app.login("alice", "wonderland").await;
    let refresh = login["refresh_token"].as_str().unwrap();

    let response = app.request("GET", "/verify-token", None, Some(refresh)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text("error"), "MALFORMED_TOKEN");
}

#[tokio::test]
async fn test_logout_revokes_pair() {
    let app = TestApp::new().await;
    let login = app.login("alice", "wonderland").await;
    let access = login["access_token"].as_str().unwrap();

    let logout = app.request("GET", "/logout", None, Some(access)).await;
    assert_eq!(logout.status, StatusCode::OK);

    let verify = app.request("GET", "/verify-token", None, Some(access)).await;
    assert_eq!(verify.status, StatusCode::UNAUTHORIZED);
    assert_eq!(verify.text("error"), "UNKNOWN_TOKEN");

    let again = app.request("GET", "/logout", None, Some(access)).await;
    assert_eq!(again.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_leaves_other_pairs() {
    let app = TestApp::new().await;
    let first = app.login("alice", "wonderland").await;
    let second = app.login("alice", "wonderland").await;

    let logout = app
        .request("GET", "/logout", None, first["access_token"].as_str())
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let verify = app
        .request("GET", "/verify-token", None, second["access_token"].as_str())
        .await;
    assert_eq!(verify.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_without_header() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/logout", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text("error"), "MISSING_CREDENTIAL");
}

#[tokio::test]
async fn test_logout_with_expired_token() {
    let app = TestApp::new().await;
    let login = app.login("alice", "wonderland").await;

    app.advance_secs(3601);
    let response = app
        .request("GET", "/logout", None, login["access_token"].as_str())
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text("error"), "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_health_reports_backend() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text("status"), "ok");
    assert_eq!(response.text("store"), "volatile");
}

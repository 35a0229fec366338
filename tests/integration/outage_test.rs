//! Store outages surface as 503s, never as authentication failures.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;

use tokenward_auth::store::{TokenGrant, TokenStore};
use tokenward_core::config::StoreBackend;
use tokenward_core::error::AppError;
use tokenward_core::result::AppResult;
use tokenward_entity::identity::Identity;

use crate::helpers::{TestApp, alice};

/// Every call fails as if the backend were down.
#[derive(Debug)]
struct UnreachableStore;

#[async_trait]
impl TokenStore for UnreachableStore {
    async fn create(&self, _identity: &Identity) -> AppResult<TokenGrant> {
        Err(AppError::store_unavailable("connection refused"))
    }

    async fn get(&self, _token_id: &str) -> AppResult<TokenGrant> {
        Err(AppError::store_unavailable("connection refused"))
    }

    async fn update(&self, _token_id: &str) -> AppResult<TokenGrant> {
        Err(AppError::store_unavailable("connection refused"))
    }

    async fn delete(&self, _token_id: &str) -> AppResult<()> {
        Err(AppError::store_unavailable("connection refused"))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Err(AppError::store_unavailable("connection refused"))
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Durable
    }
}

/// Every call hangs.
#[derive(Debug)]
struct StalledStore;

#[async_trait]
impl TokenStore for StalledStore {
    async fn create(&self, _identity: &Identity) -> AppResult<TokenGrant> {
        std::future::pending().await
    }

    async fn get(&self, _token_id: &str) -> AppResult<TokenGrant> {
        std::future::pending().await
    }

    async fn update(&self, _token_id: &str) -> AppResult<TokenGrant> {
        std::future::pending().await
    }

    async fn delete(&self, _token_id: &str) -> AppResult<()> {
        std::future::pending().await
    }

    async fn health_check(&self) -> AppResult<bool> {
        std::future::pending().await
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Volatile
    }
}

fn forged_access(app: &TestApp) -> String {
    app.codec
        .mint_access(&alice(), "0123456789abcdef0123456789abcdef")
        .unwrap()
}

#[tokio::test]
async fn test_verify_during_outage() {
    let app = TestApp::with_store(Arc::new(UnreachableStore));
    let token = forged_access(&app);

    let response = app.request("GET", "/verify-token", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.text("error"), "STORE_UNAVAILABLE");
}

#[tokio::test]
async fn test_login_during_outage() {
    let app = TestApp::with_store(Arc::new(UnreachableStore));

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "alice", "password": "wonderland" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_logout_during_outage() {
    let app = TestApp::with_store(Arc::new(UnreachableStore));
    let token = forged_access(&app);

    let response = app.request("GET", "/logout", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_refresh_during_outage() {
    let app = TestApp::with_store(Arc::new(UnreachableStore));
    let token = app
        .codec
        .mint_refresh(&alice(), "0123456789abcdef0123456789abcdef")
        .unwrap();

    let response = app
        .request(
            "POST",
            "/refresh-token",
            Some(json!({ "refresh_token": token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_health_during_outage() {
    let app = TestApp::with_store(Arc::new(UnreachableStore));

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.text("status"), "unavailable");
    assert_eq!(response.text("store"), "durable");
}

#[tokio::test(start_paused = true)]
async fn test_stalled_store_times_out() {
    let app = TestApp::with_store(Arc::new(StalledStore));
    let token = forged_access(&app);

    let response = app.request("GET", "/verify-token", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.text("error"), "STORE_UNAVAILABLE");
}

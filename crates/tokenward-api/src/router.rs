//! Route definitions.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every endpoint bound to `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", get(handlers::auth::logout))
        .route("/verify-token", get(handlers::auth::verify_token))
        .route("/refresh-token", post(handlers::auth::refresh_token))
        .route("/health", get(handlers::health::health))
        .with_state(state)
}

//! Health probe.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

use super::within_timeout;

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store = state.tokens.store();
    let reachable = match within_timeout(&state, store.health_check()).await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e.0.message, "Health check failed");
            false
        }
    };

    let (status, label) = if reachable {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            store: store.backend().to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

//! Request handlers.

pub mod auth;
pub mod health;

use std::future::Future;

use tokenward_core::error::AppError;
use tokenward_core::result::AppResult;

use crate::error::ApiError;
use crate::state::AppState;

/// Run a lifecycle call under the configured request timeout.
///
/// Elapsing is reported as the store being unavailable.
pub async fn within_timeout<T>(
    state: &AppState,
    call: impl Future<Output = AppResult<T>>,
) -> Result<T, ApiError> {
    let timeout = state.request_timeout();
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(_) => {
            tracing::warn!(timeout_secs = timeout.as_secs(), "Token store call timed out");
            Err(AppError::store_unavailable("Token store did not respond in time").into())
        }
    }
}

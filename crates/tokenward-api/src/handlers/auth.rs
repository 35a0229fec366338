//! Token endpoints: login, logout, verify-token, refresh-token.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use tokenward_auth::lifecycle::ResponsePayload;
use tokenward_core::error::AppError;

use super::within_timeout;
use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::error::ApiError;
use crate::extractors::{BearerAuth, BearerToken, ValidatedJson};
use crate::state::AppState;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ResponsePayload>, ApiError> {
    let identity = within_timeout(
        &state,
        state
            .credentials
            .verify_credentials(&req.username, &req.password),
    )
    .await?
    .ok_or_else(|| AppError::validation("You use wrong credentials"))?;

    let payload = within_timeout(&state, state.tokens.login(&identity)).await?;
    Ok(Json(payload))
}

/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    auth: BearerAuth,
) -> Result<StatusCode, ApiError> {
    within_timeout(&state, state.tokens.logout(&auth.token)).await?;
    Ok(StatusCode::OK)
}

/// GET /verify-token
pub async fn verify_token(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<ResponsePayload>, ApiError> {
    let payload = within_timeout(&state, state.tokens.verify(&token)).await?;
    Ok(Json(payload))
}

/// POST /refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<(StatusCode, Json<ResponsePayload>), ApiError> {
    let payload = within_timeout(&state, state.tokens.refresh(&req.refresh_token)).await?;
    Ok((StatusCode::CREATED, Json(payload)))
}

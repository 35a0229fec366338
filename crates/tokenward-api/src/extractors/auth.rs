//! Bearer credential extractors.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use tokenward_auth::authenticator::{AuthenticatedIdentity, bearer_token};

use crate::error::ApiError;
use crate::handlers::within_timeout;
use crate::state::AppState;

fn authorization_header(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

/// The raw token from a `Bearer` header, not yet checked against the store.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(authorization_header(parts))?;
        Ok(Self(token.to_string()))
    }
}

/// A fully authenticated caller: decoded, known to the store, not expired.
#[derive(Debug, Clone)]
pub struct BearerAuth(pub AuthenticatedIdentity);

impl std::ops::Deref for BearerAuth {
    type Target = AuthenticatedIdentity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for BearerAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = authorization_header(parts);
        let authed = within_timeout(
            state,
            state.tokens.authenticator().authenticate(header),
        )
        .await?;
        Ok(Self(authed))
    }
}

//! Login, logout, verify and refresh.

use std::sync::Arc;

use tracing::{debug, info, warn};

use tokenward_core::config::TokenConfig;
use tokenward_core::error::AppError;
use tokenward_core::result::AppResult;
use tokenward_entity::identity::Identity;

use super::response::{ResponseBuilder, ResponsePayload};
use crate::authenticator::RequestAuthenticator;
use crate::expiry::Clock;
use crate::jwt::{TokenCodec, TokenKind};
use crate::store::{TokenGrant, TokenStore};

/// Orchestrates the token lifecycle over the configured store.
#[derive(Clone)]
pub struct TokenLifecycleService {
    store: Arc<dyn TokenStore>,
    codec: Arc<TokenCodec>,
    authenticator: RequestAuthenticator,
    responses: ResponseBuilder,
    clock: Arc<dyn Clock>,
    strict_token_kind: bool,
}

impl std::fmt::Debug for TokenLifecycleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenLifecycleService")
            .field("backend", &self.store.backend())
            .field("strict_token_kind", &self.strict_token_kind)
            .finish()
    }
}

impl TokenLifecycleService {
    /// Wire the service. Fails on unknown response field names.
    pub fn new(
        config: &TokenConfig,
        store: Arc<dyn TokenStore>,
        codec: Arc<TokenCodec>,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        let responses = ResponseBuilder::new(&config.response_fields)?;
        let authenticator = RequestAuthenticator::new(
            codec.clone(),
            store.clone(),
            clock.clone(),
            config.strict_token_kind,
        );

        Ok(Self {
            store,
            codec,
            authenticator,
            responses,
            clock,
            strict_token_kind: config.strict_token_kind,
        })
    }

    /// The authenticator sharing this service's store and codec.
    pub fn authenticator(&self) -> &RequestAuthenticator {
        &self.authenticator
    }

    /// The underlying token store.
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Issue a pair for an already authenticated identity.
    pub async fn login(&self, identity: &Identity) -> AppResult<ResponsePayload> {
        let TokenGrant { record, identity } = self.store.create(identity).await?;
        info!(
            token_id = %record.token_id,
            subject_id = %record.subject_id,
            "Login succeeded"
        );
        Ok(self.responses.build(&record, &identity))
    }

    /// Revoke the pair a bearer token belongs to.
    ///
    /// Revoking a pair that is already gone succeeds.
    pub async fn logout(&self, bearer_token: &str) -> AppResult<()> {
        let claims = self.codec.decode(bearer_token)?;

        match self.store.delete(&claims.token_id).await {
            Ok(()) => {
                info!(token_id = %claims.token_id, "Logout succeeded");
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                info!(token_id = %claims.token_id, "Logout for a pair that is already gone");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Check a bearer token and describe the pair it belongs to.
    pub async fn verify(&self, bearer_token: &str) -> AppResult<ResponsePayload> {
        let authed = self.authenticator.authenticate_token(bearer_token).await?;
        debug!(token_id = %authed.record.token_id, "Token verified");
        Ok(self.responses.build(&authed.record, &authed.identity))
    }

    /// Mint a new access token (and refresh token when rotating) from a refresh token.
    ///
    /// Every reason the presented token cannot be used is a validation
    /// failure; store outages propagate unchanged.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<ResponsePayload> {
        let claims = self
            .codec
            .decode(refresh_token)
            .map_err(|_| AppError::validation("Invalid refresh token"))?;

        if self.strict_token_kind && claims.token_kind != TokenKind::Refresh {
            return Err(AppError::validation("Token is not a refresh token"));
        }

        match self.store.get(&claims.token_id).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                return Err(AppError::validation("This token does not exist"));
            }
            Err(e) => return Err(e),
        }

        if claims.is_expired_at(self.clock.now()) {
            warn!(token_id = %claims.token_id, exp = claims.exp, "Refresh with expired token");
            return Err(AppError::validation("Your refresh token was expired"));
        }

        let TokenGrant { record, identity } =
            self.store.update(&claims.token_id).await.map_err(|e| {
                if e.is_not_found() {
                    AppError::validation("This token does not exist")
                } else {
                    e
                }
            })?;

        info!(token_id = %record.token_id, "Token refreshed");
        Ok(self.responses.build(&record, &identity))
    }
}

//! Bearer credential authentication.

use std::sync::Arc;

use tracing::debug;

use tokenward_core::error::AppError;
use tokenward_core::result::AppResult;
use tokenward_entity::identity::Identity;
use tokenward_entity::token::TokenRecord;

use crate::expiry::Clock;
use crate::jwt::{Claims, TokenCodec, TokenKind};
use crate::store::{TokenGrant, TokenStore};

/// The outcome of a successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    /// Who the token belongs to.
    pub identity: Identity,
    /// The stored pair the token belongs to.
    pub record: TokenRecord,
    /// Decoded claims of the presented token.
    pub claims: Claims,
    /// The presented token string.
    pub token: String,
}

/// Turns an `Authorization` header into an identity.
#[derive(Debug, Clone)]
pub struct RequestAuthenticator {
    codec: Arc<TokenCodec>,
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    strict_token_kind: bool,
}

impl RequestAuthenticator {
    /// Create an authenticator over the configured store.
    pub fn new(
        codec: Arc<TokenCodec>,
        store: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
        strict_token_kind: bool,
    ) -> Self {
        Self {
            codec,
            store,
            clock,
            strict_token_kind,
        }
    }

    /// Authenticate a raw `Authorization` header value.
    pub async fn authenticate(&self, raw_header: Option<&str>) -> AppResult<AuthenticatedIdentity> {
        let token = bearer_token(raw_header)?;
        self.authenticate_token(token).await
    }

    /// Authenticate a bare token string.
    pub async fn authenticate_token(&self, token: &str) -> AppResult<AuthenticatedIdentity> {
        let claims = self.codec.decode(token)?;

        if self.strict_token_kind && claims.token_kind != TokenKind::Access {
            return Err(AppError::malformed_token(
                "Refresh tokens cannot be used as bearer credentials",
            ));
        }

        let TokenGrant { record, identity } = match self.store.get(&claims.token_id).await {
            Ok(grant) => grant,
            Err(e) if e.is_not_found() => {
                debug!(token_id = %claims.token_id, "Bearer token not in store");
                return Err(AppError::unknown_token("You use wrong token"));
            }
            Err(e) => return Err(e),
        };

        if claims.is_expired_at(self.clock.now()) {
            debug!(token_id = %claims.token_id, exp = claims.exp, "Bearer token expired");
            return Err(AppError::token_expired("Your token was expired"));
        }

        Ok(AuthenticatedIdentity {
            identity,
            record,
            claims,
            token: token.to_string(),
        })
    }
}

/// Extract the token from a `Bearer <token>` header value.
pub fn bearer_token(raw_header: Option<&str>) -> AppResult<&str> {
    let header = raw_header
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::missing_credential("Authentication credentials were not provided"))?;

    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AppError::missing_credential(
            "Authorization header must be 'Bearer <token>'",
        )),
    }
}

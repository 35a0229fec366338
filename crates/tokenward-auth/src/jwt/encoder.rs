//! HS256 token signing and claim construction.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use tokenward_core::config::TokenConfig;
use tokenward_core::error::{AppError, ErrorKind};
use tokenward_entity::identity::Identity;

use super::claims::{Claims, TokenKind};
use crate::expiry::Clock;

/// Builds claim sets for a pair and signs them.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    header: Header,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
    extended_claim_fields: Vec<String>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .field("extended_claim_fields", &self.extended_claim_fields)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates an encoder from token configuration.
    ///
    /// Every extended claim field must name an identity attribute.
    pub fn new(config: &TokenConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        if let Some(unknown) = config
            .extended_claim_fields
            .iter()
            .find(|f| !Identity::ATTRIBUTES.contains(&f.as_str()))
        {
            return Err(AppError::configuration(format!(
                "Unknown identity attribute '{unknown}' in token.extended_claim_fields"
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            header: Header::new(Algorithm::HS256),
            access_ttl_seconds: ttl_seconds(config.access_token_ttl_seconds, "access")?,
            refresh_ttl_seconds: ttl_seconds(config.refresh_token_ttl_seconds, "refresh")?,
            extended_claim_fields: config.extended_claim_fields.clone(),
            clock,
        })
    }

    /// Current time according to the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Sign a claim set.
    pub fn encode(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&self.header, claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(
                ErrorKind::Internal,
                format!("Failed to encode {} token", claims.token_kind),
                e,
            )
        })
    }

    /// Build the claim set for one half of a pair, expiring relative to now.
    pub fn claims_for(
        &self,
        identity: &Identity,
        token_id: &str,
        kind: TokenKind,
    ) -> Result<Claims, AppError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl_seconds,
            TokenKind::Refresh => self.refresh_ttl_seconds,
        };

        let extra = self
            .extended_claim_fields
            .iter()
            .filter_map(|field| identity.attribute(field).map(|v| (field.clone(), v)))
            .collect();

        let exp = self.clock.now().timestamp().checked_add(ttl).ok_or_else(|| {
            AppError::internal(format!("{kind} token expiry overflows the timestamp range"))
        })?;

        Ok(Claims {
            subject_id: identity.id,
            exp,
            token_id: token_id.to_string(),
            token_kind: kind,
            extra,
        })
    }

    /// Mint a signed token of the given kind.
    pub fn mint(
        &self,
        identity: &Identity,
        token_id: &str,
        kind: TokenKind,
    ) -> Result<String, AppError> {
        self.encode(&self.claims_for(identity, token_id, kind)?)
    }
}

fn ttl_seconds(seconds: u64, kind: &str) -> Result<i64, AppError> {
    i64::try_from(seconds).map_err(|_| {
        AppError::configuration(format!(
            "token.{kind}_token_ttl_seconds is out of range: {seconds}"
        ))
    })
}

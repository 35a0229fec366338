//! The token codec used by the stores, authenticator and lifecycle service.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use tokenward_core::config::TokenConfig;
use tokenward_core::result::AppResult;
use tokenward_entity::identity::Identity;

use super::claims::{Claims, TokenKind};
use super::decoder::JwtDecoder;
use super::encoder::JwtEncoder;
use crate::expiry::Clock;

/// Encodes and decodes tokens with the configured secret and lifetimes.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl TokenCodec {
    /// Build the codec from token configuration.
    pub fn new(config: &TokenConfig, clock: Arc<dyn Clock>) -> AppResult<Self> {
        Ok(Self {
            encoder: JwtEncoder::new(config, clock)?,
            decoder: JwtDecoder::new(config),
        })
    }

    /// Sign a claim set.
    pub fn encode(&self, claims: &Claims) -> AppResult<String> {
        self.encoder.encode(claims)
    }

    /// Decode a token string into claims.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        self.decoder.decode(token)
    }

    /// Mint both halves of a pair, returned as `(access, refresh)`.
    pub fn mint_pair(&self, identity: &Identity, token_id: &str) -> AppResult<(String, String)> {
        Ok((
            self.mint_access(identity, token_id)?,
            self.mint_refresh(identity, token_id)?,
        ))
    }

    /// Mint an access token for `identity` under `token_id`.
    pub fn mint_access(&self, identity: &Identity, token_id: &str) -> AppResult<String> {
        self.encoder.mint(identity, token_id, TokenKind::Access)
    }

    /// Mint a refresh token for `identity` under `token_id`.
    pub fn mint_refresh(&self, identity: &Identity, token_id: &str) -> AppResult<String> {
        self.encoder.mint(identity, token_id, TokenKind::Refresh)
    }

    /// Current time according to the codec's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.encoder.now()
    }

    /// Whether decoding checks signatures.
    pub fn verifies_signature(&self) -> bool {
        self.decoder.verifies_signature()
    }
}

//! Token issuance and storage configuration.

use serde::{Deserialize, Serialize};

/// Claim names that every token carries and that extended claims may not shadow.
pub const RESERVED_CLAIMS: [&str; 4] = ["subject_id", "exp", "token_id", "token_kind"];

/// Upper bound on either token lifetime: ten years.
pub const MAX_TOKEN_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

/// Which token store implementation backs the lifecycle service.
///
/// Resolved once at startup into a concrete store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// One row per token pair in PostgreSQL; no automatic record expiry.
    Durable,
    /// One cache entry per token pair, expiring with the refresh-token lifetime.
    Volatile,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Durable => write!(f, "durable"),
            Self::Volatile => write!(f, "volatile"),
        }
    }
}

/// Token lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Secret key for HS256 signing. Required.
    #[serde(default)]
    pub secret_key: String,
    /// Token store backend.
    #[serde(default = "default_store_backend")]
    pub store_backend: StoreBackend,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: u64,
    /// Refresh token lifetime in seconds; also the volatile entry TTL.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_seconds: u64,
    /// Whether a refresh also issues a new refresh token.
    #[serde(default)]
    pub rotate_refresh_token: bool,
    /// Ordered response fields. Identity attributes use `identity.<attr>`.
    #[serde(default = "default_response_fields")]
    pub response_fields: Vec<String>,
    /// Identity attributes embedded into both tokens' claims.
    #[serde(default = "default_extended_claim_fields")]
    pub extended_claim_fields: Vec<String>,
    /// Verify HS256 signatures when decoding. Off by default: tokens issued by
    /// earlier deployments were accepted without verification.
    #[serde(default)]
    pub verify_signature: bool,
    /// Reject access tokens on refresh and refresh tokens as bearer credentials.
    #[serde(default)]
    pub strict_token_kind: bool,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            store_backend: default_store_backend(),
            access_token_ttl_seconds: default_access_ttl(),
            refresh_token_ttl_seconds: default_refresh_ttl(),
            rotate_refresh_token: false,
            response_fields: default_response_fields(),
            extended_claim_fields: default_extended_claim_fields(),
            verify_signature: false,
            strict_token_kind: false,
        }
    }
}

fn default_store_backend() -> StoreBackend {
    StoreBackend::Durable
}

fn default_access_ttl() -> u64 {
    3600
}

fn default_refresh_ttl() -> u64 {
    86400
}

fn default_response_fields() -> Vec<String> {
    vec![
        "access_token".to_string(),
        "refresh_token".to_string(),
        "identity.username".to_string(),
    ]
}

fn default_extended_claim_fields() -> Vec<String> {
    vec!["username".to_string()]
}

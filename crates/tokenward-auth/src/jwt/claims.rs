//! Claim set carried by both access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expiry::is_expired;

/// Claims embedded in every token.
///
/// Extended identity attributes are flattened next to the fixed claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// The identity the token was issued to.
    pub subject_id: Uuid,
    /// Expiry, unix seconds.
    pub exp: i64,
    /// Identifier shared by the access/refresh pair.
    pub token_id: String,
    /// Which half of the pair this is.
    pub token_kind: TokenKind,
    /// Configured identity attributes.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived credential for API requests.
    Access,
    /// Longer-lived credential used to mint new access tokens.
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

impl Claims {
    /// Returns the expiration as a `DateTime<Utc>`, if representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Whether the embedded expiry has passed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.exp, now)
    }
}

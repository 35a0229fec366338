//! Issued token pair record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One issued access/refresh token pair.
///
/// The record references its owner by `subject_id` only; resolving the full
/// identity is a separate lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TokenRecord {
    /// Owner of the pair.
    pub subject_id: Uuid,
    /// Identifier shared by both tokens (the `jti`).
    pub token_id: String,
    /// Current access token.
    pub access_token: String,
    /// Current refresh token.
    pub refresh_token: String,
    /// When the pair was first issued. Unchanged by refreshes.
    pub issued_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Generate a fresh, high-entropy token id (32 lowercase hex characters).
    pub fn generate_token_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Value of a record field addressable from response configuration.
    pub fn field(&self, name: &str) -> Option<serde_json::Value> {
        let value = match name {
            "access_token" => serde_json::Value::from(self.access_token.clone()),
            "refresh_token" => serde_json::Value::from(self.refresh_token.clone()),
            "token_id" => serde_json::Value::from(self.token_id.clone()),
            "subject_id" => serde_json::Value::from(self.subject_id.to_string()),
            "issued_at" => serde_json::Value::from(self.issued_at.to_rfc3339()),
            _ => return None,
        };
        Some(value)
    }

    /// Names accepted by [`TokenRecord::field`].
    pub const FIELDS: [&'static str; 5] = [
        "access_token",
        "refresh_token",
        "token_id",
        "subject_id",
        "issued_at",
    ];
}

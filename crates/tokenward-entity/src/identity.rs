//! Authenticated identity as seen by the token lifecycle.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An authenticated user, owned by the user directory.
///
/// Only the attributes the token lifecycle can embed or echo are carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Identity {
    /// Stable subject identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Human-readable display name.
    pub display_name: Option<String>,
}

impl Identity {
    /// Attribute names accepted by [`Identity::attribute`].
    pub const ATTRIBUTES: [&'static str; 4] = ["id", "username", "email", "display_name"];

    /// Look up an attribute by name. Absent optional attributes are JSON null.
    pub fn attribute(&self, name: &str) -> Option<serde_json::Value> {
        let value = match name {
            "id" => serde_json::Value::from(self.id.to_string()),
            "username" => serde_json::Value::from(self.username.clone()),
            "email" => self
                .email
                .clone()
                .map(serde_json::Value::from)
                .unwrap_or(serde_json::Value::Null),
            "display_name" => self
                .display_name
                .clone()
                .map(serde_json::Value::from)
                .unwrap_or(serde_json::Value::Null),
            _ => return None,
        };
        Some(value)
    }
}

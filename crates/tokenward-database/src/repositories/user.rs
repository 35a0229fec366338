//! Read-only access to the `users` directory table.

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use tokenward_core::result::AppResult;
use tokenward_entity::identity::Identity;

use crate::connection::map_sqlx_error;

/// A directory row including the stored password hash.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Display name (optional).
    pub display_name: Option<String>,
    /// Argon2 password hash.
    pub password_hash: String,
}

impl UserCredentials {
    /// Drop the hash and keep the identity.
    pub fn into_identity(self) -> Identity {
        Identity {
            id: self.id,
            username: self.username,
            email: self.email,
            display_name: self.display_name,
        }
    }
}

/// Repository over the user directory. Never writes.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an active identity by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Identity>> {
        sqlx::query_as::<_, Identity>(
            "SELECT id, username, email, display_name FROM users WHERE id = $1 AND is_active",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to find user", e))
    }

    /// Find an active user's credentials by username.
    pub async fn find_credentials(&self, username: &str) -> AppResult<Option<UserCredentials>> {
        sqlx::query_as::<_, UserCredentials>(
            "SELECT id, username, email, display_name, password_hash FROM users \
             WHERE username = $1 AND is_active",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to find user credentials", e))
    }
}

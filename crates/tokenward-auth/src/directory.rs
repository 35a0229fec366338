//! The user directory as seen by the token lifecycle.
//!
//! Identities are owned elsewhere; this crate only reads them.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use tokenward_core::result::AppResult;
use tokenward_database::repositories::UserRepository;
use tokenward_entity::identity::Identity;

use crate::password::PasswordHasher;

/// Resolves the identity a token record refers to.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Look up an identity by subject id. `None` if it no longer exists.
    async fn find_identity(&self, subject_id: Uuid) -> AppResult<Option<Identity>>;
}

/// Checks login credentials.
#[async_trait]
pub trait CredentialVerifier: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the identity if the credentials are valid.
    async fn verify_credentials(&self, username: &str, password: &str)
    -> AppResult<Option<Identity>>;
}

/// Directory backed by the `users` table.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: UserRepository,
    hasher: PasswordHasher,
}

impl UserDirectory {
    /// Create a directory over the given repository.
    pub fn new(users: UserRepository) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl IdentityProvider for UserDirectory {
    async fn find_identity(&self, subject_id: Uuid) -> AppResult<Option<Identity>> {
        self.users.find_by_id(subject_id).await
    }
}

#[async_trait]
impl CredentialVerifier for UserDirectory {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<Option<Identity>> {
        let Some(credentials) = self.users.find_credentials(username).await? else {
            debug!(username, "Login for unknown or inactive user");
            return Ok(None);
        };

        if !self
            .hasher
            .verify_password(password, &credentials.password_hash)?
        {
            debug!(username, "Login with wrong password");
            return Ok(None);
        }

        Ok(Some(credentials.into_identity()))
    }
}

//! PostgreSQL-backed token store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use tokenward_core::config::StoreBackend;
use tokenward_core::error::AppError;
use tokenward_core::result::AppResult;
use tokenward_database::repositories::TokenRepository;
use tokenward_entity::identity::Identity;
use tokenward_entity::token::TokenRecord;

use super::{TokenGrant, TokenStore, issue_record, reissue_record, resolve_identity};
use crate::directory::IdentityProvider;
use crate::jwt::TokenCodec;

/// Row-level access to the `user_tokens` table.
#[async_trait]
pub trait TokenRows: Send + Sync + std::fmt::Debug {
    /// Insert a new row.
    async fn insert(&self, record: &TokenRecord) -> AppResult<()>;

    /// Fetch the row for a pair, if any.
    async fn find_by_token_id(&self, token_id: &str) -> AppResult<Option<TokenRecord>>;

    /// Overwrite both tokens of a row. Returns `false` if no row matched.
    async fn update_tokens(
        &self,
        token_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<bool>;

    /// Delete the rows for a pair, returning how many were removed.
    async fn delete_by_token_id(&self, token_id: &str) -> AppResult<u64>;

    /// Round-trip to the backing database.
    async fn ping(&self) -> AppResult<bool>;
}

#[async_trait]
impl TokenRows for TokenRepository {
    async fn insert(&self, record: &TokenRecord) -> AppResult<()> {
        TokenRepository::insert(self, record).await
    }

    async fn find_by_token_id(&self, token_id: &str) -> AppResult<Option<TokenRecord>> {
        TokenRepository::find_by_token_id(self, token_id).await
    }

    async fn update_tokens(
        &self,
        token_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<bool> {
        TokenRepository::update_tokens(self, token_id, access_token, refresh_token).await
    }

    async fn delete_by_token_id(&self, token_id: &str) -> AppResult<u64> {
        TokenRepository::delete_by_token_id(self, token_id).await
    }

    async fn ping(&self) -> AppResult<bool> {
        TokenRepository::ping(self).await
    }
}

/// One row per pair in `user_tokens`. Rows never expire on their own.
#[derive(Debug, Clone)]
pub struct DurableTokenStore {
    tokens: Arc<dyn TokenRows>,
    codec: Arc<TokenCodec>,
    identities: Arc<dyn IdentityProvider>,
    rotate_refresh_token: bool,
}

impl DurableTokenStore {
    /// Create a durable store.
    pub fn new(
        tokens: impl TokenRows + 'static,
        codec: Arc<TokenCodec>,
        identities: Arc<dyn IdentityProvider>,
        rotate_refresh_token: bool,
    ) -> Self {
        Self {
            tokens: Arc::new(tokens),
            codec,
            identities,
            rotate_refresh_token,
        }
    }

    fn absent(token_id: &str) -> AppError {
        AppError::not_found(format!("Token {token_id} does not exist"))
    }
}

#[async_trait]
impl TokenStore for DurableTokenStore {
    async fn create(&self, identity: &Identity) -> AppResult<TokenGrant> {
        let record = issue_record(&self.codec, identity)?;
        self.tokens.insert(&record).await?;

        info!(
            token_id = %record.token_id,
            subject_id = %record.subject_id,
            "Token pair stored"
        );
        Ok(TokenGrant {
            record,
            identity: identity.clone(),
        })
    }

    async fn get(&self, token_id: &str) -> AppResult<TokenGrant> {
        let record = self
            .tokens
            .find_by_token_id(token_id)
            .await?
            .ok_or_else(|| Self::absent(token_id))?;
        let identity = resolve_identity(self.identities.as_ref(), &record).await?;
        Ok(TokenGrant { record, identity })
    }

    async fn update(&self, token_id: &str) -> AppResult<TokenGrant> {
        let TokenGrant {
            mut record,
            identity,
        } = self.get(token_id).await?;

        reissue_record(&self.codec, &mut record, &identity, self.rotate_refresh_token)?;

        let updated = self
            .tokens
            .update_tokens(token_id, &record.access_token, &record.refresh_token)
            .await?;
        if !updated {
            return Err(Self::absent(token_id));
        }

        debug!(token_id, rotated = self.rotate_refresh_token, "Token pair updated");
        Ok(TokenGrant { record, identity })
    }

    async fn delete(&self, token_id: &str) -> AppResult<()> {
        match self.tokens.delete_by_token_id(token_id).await? {
            0 => Err(Self::absent(token_id)),
            removed => {
                debug!(token_id, removed, "Token pair deleted");
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.tokens.ping().await
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Durable
    }
}

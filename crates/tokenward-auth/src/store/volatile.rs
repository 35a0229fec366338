//! Cache-backed token store.
//!
//! One entry per pair, keyed by `token_id`, holding the JSON record. Each
//! write sets the entry TTL to the refresh-token lifetime, so the entry
//! outlives the access token it carries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use tokenward_cache::CacheManager;
use tokenward_core::config::StoreBackend;
use tokenward_core::error::AppError;
use tokenward_core::result::AppResult;
use tokenward_core::traits::cache::CacheProvider;
use tokenward_entity::identity::Identity;
use tokenward_entity::token::TokenRecord;

use super::{TokenGrant, TokenStore, issue_record, reissue_record, resolve_identity};
use crate::directory::IdentityProvider;
use crate::jwt::TokenCodec;

/// Token store over a key-value cache with per-key TTL.
#[derive(Debug, Clone)]
pub struct VolatileTokenStore {
    cache: CacheManager,
    codec: Arc<TokenCodec>,
    identities: Arc<dyn IdentityProvider>,
    entry_ttl: Duration,
    rotate_refresh_token: bool,
}

impl VolatileTokenStore {
    /// Create a volatile store whose entries live for `refresh_ttl_seconds`.
    pub fn new(
        cache: CacheManager,
        codec: Arc<TokenCodec>,
        identities: Arc<dyn IdentityProvider>,
        refresh_ttl_seconds: u64,
        rotate_refresh_token: bool,
    ) -> Self {
        Self {
            cache,
            codec,
            identities,
            entry_ttl: Duration::from_secs(refresh_ttl_seconds),
            rotate_refresh_token,
        }
    }

    fn absent(token_id: &str) -> AppError {
        AppError::not_found(format!("Token {token_id} does not exist or has expired"))
    }

    async fn load(&self, token_id: &str) -> AppResult<TokenRecord> {
        self.cache
            .get_json::<TokenRecord>(token_id)
            .await?
            .ok_or_else(|| Self::absent(token_id))
    }

    async fn save(&self, record: &TokenRecord) -> AppResult<()> {
        self.cache
            .set_json(&record.token_id, record, self.entry_ttl)
            .await
    }

    /// Overwrite an existing entry. A pair evicted since it was read stays evicted.
    async fn overwrite(&self, record: &TokenRecord) -> AppResult<()> {
        let replaced = self
            .cache
            .replace_json(&record.token_id, record, self.entry_ttl)
            .await?;
        if !replaced {
            return Err(Self::absent(&record.token_id));
        }
        Ok(())
    }
}

#[async_trait]
impl TokenStore for VolatileTokenStore {
    async fn create(&self, identity: &Identity) -> AppResult<TokenGrant> {
        let record = issue_record(&self.codec, identity)?;
        self.save(&record).await?;

        info!(
            token_id = %record.token_id,
            subject_id = %record.subject_id,
            ttl_secs = self.entry_ttl.as_secs(),
            "Token pair cached"
        );
        Ok(TokenGrant {
            record,
            identity: identity.clone(),
        })
    }

    async fn get(&self, token_id: &str) -> AppResult<TokenGrant> {
        let record = self.load(token_id).await?;
        let identity = resolve_identity(self.identities.as_ref(), &record).await?;
        Ok(TokenGrant { record, identity })
    }

    async fn update(&self, token_id: &str) -> AppResult<TokenGrant> {
        let TokenGrant {
            mut record,
            identity,
        } = self.get(token_id).await?;

        reissue_record(&self.codec, &mut record, &identity, self.rotate_refresh_token)?;
        self.overwrite(&record).await?;

        debug!(token_id, rotated = self.rotate_refresh_token, "Token pair updated");
        Ok(TokenGrant { record, identity })
    }

    async fn delete(&self, token_id: &str) -> AppResult<()> {
        if !self.cache.delete(token_id).await? {
            return Err(Self::absent(token_id));
        }
        debug!(token_id, "Token pair evicted");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.cache.health_check().await
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Volatile
    }
}

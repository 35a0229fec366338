//! Token persistence.
//!
//! Both backends satisfy the same contract. They differ in what happens to a
//! record over time: durable rows live until deleted, volatile entries also
//! vanish once the refresh-token lifetime has passed.

pub mod durable;
pub mod volatile;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::SubsecRound;
use tracing::info;

use tokenward_cache::CacheManager;
use tokenward_core::config::{AppConfig, StoreBackend};
use tokenward_core::error::AppError;
use tokenward_core::result::AppResult;
use tokenward_database::DatabasePool;
use tokenward_database::repositories::TokenRepository;
use tokenward_entity::identity::Identity;
use tokenward_entity::token::TokenRecord;

use crate::directory::IdentityProvider;
use crate::jwt::TokenCodec;

pub use durable::{DurableTokenStore, TokenRows};
pub use volatile::VolatileTokenStore;

/// A stored record together with the identity it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    /// The token pair.
    pub record: TokenRecord,
    /// Its owner, resolved from `record.subject_id`.
    pub identity: Identity,
}

/// Storage for issued token pairs.
///
/// Absence is reported as `ErrorKind::NotFound`; backend trouble as
/// `ErrorKind::StoreUnavailable`. Concurrent updates of one `token_id` are
/// not serialized; the last write wins.
#[async_trait]
pub trait TokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Issue and persist a fresh pair for `identity`.
    async fn create(&self, identity: &Identity) -> AppResult<TokenGrant>;

    /// Load the pair with the given id.
    async fn get(&self, token_id: &str) -> AppResult<TokenGrant>;

    /// Re-mint the access token (and the refresh token when rotation is on).
    async fn update(&self, token_id: &str) -> AppResult<TokenGrant>;

    /// Remove the pair.
    async fn delete(&self, token_id: &str) -> AppResult<()>;

    /// Whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Which backend this is.
    fn backend(&self) -> StoreBackend;
}

/// Mint a fresh pair under a new token id.
pub(crate) fn issue_record(codec: &TokenCodec, identity: &Identity) -> AppResult<TokenRecord> {
    let token_id = TokenRecord::generate_token_id();
    let (access_token, refresh_token) = codec.mint_pair(identity, &token_id)?;
    Ok(TokenRecord {
        subject_id: identity.id,
        access_token,
        refresh_token,
        token_id,
        issued_at: codec.now().trunc_subsecs(6),
    })
}

/// Re-mint the tokens of an existing record in place.
pub(crate) fn reissue_record(
    codec: &TokenCodec,
    record: &mut TokenRecord,
    identity: &Identity,
    rotate_refresh_token: bool,
) -> AppResult<()> {
    record.access_token = codec.mint_access(identity, &record.token_id)?;
    if rotate_refresh_token {
        record.refresh_token = codec.mint_refresh(identity, &record.token_id)?;
    }
    Ok(())
}

/// Resolve a record's owner. A dangling reference counts as an absent record.
pub(crate) async fn resolve_identity(
    identities: &dyn IdentityProvider,
    record: &TokenRecord,
) -> AppResult<Identity> {
    identities
        .find_identity(record.subject_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!(
                "Identity for token {} no longer exists",
                record.token_id
            ))
        })
}

/// Construct the configured token store.
pub async fn build_token_store(
    config: &AppConfig,
    db: &DatabasePool,
    codec: Arc<TokenCodec>,
    identities: Arc<dyn IdentityProvider>,
) -> AppResult<Arc<dyn TokenStore>> {
    let rotate = config.token.rotate_refresh_token;
    let store: Arc<dyn TokenStore> = match config.token.store_backend {
        StoreBackend::Durable => Arc::new(DurableTokenStore::new(
            TokenRepository::new(db.pool().clone()),
            codec,
            identities,
            rotate,
        )),
        StoreBackend::Volatile => {
            let cache = CacheManager::new(&config.cache).await?;
            Arc::new(VolatileTokenStore::new(
                cache,
                codec,
                identities,
                config.token.refresh_token_ttl_seconds,
                rotate,
            ))
        }
    };

    info!(
        backend = %config.token.store_backend,
        rotate_refresh_token = rotate,
        "Token store initialized"
    );
    Ok(store)
}

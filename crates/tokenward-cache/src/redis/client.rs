//! Redis connection management.
//!
//! A single multiplexed [`ConnectionManager`] is shared, and a semaphore
//! bounds how many requests may hold it at once. Callers that cannot get a
//! slot within the acquire timeout fail with `StoreUnavailable`.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

use redis::Client;
use redis::aio::ConnectionManager;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{info, warn};

use tokenward_core::config::RedisCacheConfig;
use tokenward_core::error::{AppError, ErrorKind};
use tokenward_core::result::AppResult;

/// Redis client wrapper with a bounded connection pool.
#[derive(Debug, Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
    permits: Arc<Semaphore>,
    acquire_timeout: Duration,
    key_prefix: String,
}

/// A checked-out connection. The pool slot is released on drop.
pub struct PooledConnection {
    conn: ConnectionManager,
    _permit: OwnedSemaphorePermit,
}

impl Deref for PooledConnection {
    type Target = ConnectionManager;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for PooledConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

impl RedisClient {
    /// Create a new Redis client from configuration.
    pub async fn connect(config: &RedisCacheConfig) -> AppResult<Self> {
        info!(
            url = %mask_redis_url(&config.url),
            pool_size = config.pool_size,
            "Connecting to Redis"
        );

        let client = Client::open(config.url.as_str()).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid Redis URL", e)
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to connect to Redis", e)
        })?;

        info!("Successfully connected to Redis");
        Ok(Self {
            conn,
            permits: Arc::new(Semaphore::new(config.pool_size.max(1) as usize)),
            acquire_timeout: Duration::from_secs(config.acquire_timeout_seconds),
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// Check out a connection, waiting at most the configured acquire timeout.
    pub async fn acquire(&self) -> AppResult<PooledConnection> {
        let permit = self.permits.clone().acquire_owned();
        let permit = tokio::time::timeout(self.acquire_timeout, permit)
            .await
            .map_err(|_| {
                warn!(
                    timeout_secs = self.acquire_timeout.as_secs(),
                    "Timed out waiting for a Redis connection"
                );
                AppError::store_unavailable("Timed out waiting for a Redis connection")
            })?
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Redis pool is closed", e)
            })?;

        Ok(PooledConnection {
            conn: self.conn.clone(),
            _permit: permit,
        })
    }

    /// Build a full key with the configured prefix.
    pub fn prefixed_key(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }
}

/// Mask password in Redis URL for safe logging.
fn mask_redis_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme), Some(at)) if at > scheme + 3 => {
            let userinfo = &url[scheme + 3..at];
            match userinfo.find(':') {
                Some(colon) => format!(
                    "{}{}:****{}",
                    &url[..scheme + 3],
                    &userinfo[..colon],
                    &url[at..]
                ),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}

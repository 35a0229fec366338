//! Redis cache provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use tokenward_core::error::{AppError, ErrorKind};
use tokenward_core::result::AppResult;
use tokenward_core::traits::cache::CacheProvider;

use super::client::RedisClient;

/// Redis-backed cache provider.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    client: RedisClient,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::StoreUnavailable, format!("Redis error: {e}"), e)
    }
}

/// Redis expiries are whole seconds; never round a live entry down to zero.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.acquire().await?;
        let result: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.acquire().await?;
        let _: () = conn
            .set_ex(&full_key, value, ttl_seconds(ttl))
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.acquire().await?;
        let removed: u64 = conn.del(&full_key).await.map_err(Self::map_err)?;
        debug!(key = %full_key, removed, "Deleted Redis key");
        Ok(removed > 0)
    }

    async fn replace(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.acquire().await?;
        // XX: only write when the key exists; the reply is nil otherwise.
        let reply: redis::Value = redis::cmd("SET")
            .arg(&full_key)
            .arg(value)
            .arg("EX")
            .arg(ttl_seconds(ttl))
            .arg("XX")
            .query_async(&mut *conn)
            .await
            .map_err(Self::map_err)?;
        let replaced = !matches!(reply, redis::Value::Nil);
        debug!(key = %full_key, replaced, "Conditionally replaced Redis key");
        Ok(replaced)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.acquire().await?;
        let pong: String = redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}

//! Redis cache provider.

pub mod client;
pub mod operations;

pub use client::{PooledConnection, RedisClient};
pub use operations::RedisCacheProvider;

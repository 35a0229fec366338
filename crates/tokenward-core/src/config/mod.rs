//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. The loaded [`AppConfig`] is immutable and handed to each
//! component's constructor.

pub mod app;
pub mod cache;
pub mod database;
pub mod logging;
pub mod token;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::cache::{CacheConfig, MemoryCacheConfig, RedisCacheConfig};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::token::{MAX_TOKEN_TTL_SECONDS, RESERVED_CLAIMS, StoreBackend, TokenConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// (default.toml + environment overlay + `TOKENWARD__*` variables).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Cache provider settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Token lifecycle settings.
    #[serde(default)]
    pub token: TokenConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for an environment from the `config/` directory.
    ///
    /// Merges `config/default` with `config/{env}` and environment variables
    /// prefixed with `TOKENWARD__`, then validates the result.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        Self::finish(builder)
    }

    /// Load configuration from an explicit file path plus environment overrides.
    pub fn load_file(path: &str) -> Result<Self, AppError> {
        let builder =
            config::Config::builder().add_source(config::File::with_name(path).required(true));
        Self::finish(builder)
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        let parsed: Self = config.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix("TOKENWARD")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("token.response_fields")
                    .with_list_parse_key("token.extended_claim_fields")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Reject configurations the server cannot start with.
    ///
    /// Field names in `response_fields` are checked later, when the response
    /// builder is constructed, because the identity attribute set lives in
    /// the entity crate.
    pub fn validate(&self) -> Result<(), AppError> {
        let token = &self.token;

        if token.secret_key.trim().is_empty() {
            return Err(AppError::configuration("token.secret_key must be set"));
        }
        if token.access_token_ttl_seconds == 0 || token.refresh_token_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "token lifetimes must be greater than zero",
            ));
        }
        if token.access_token_ttl_seconds > MAX_TOKEN_TTL_SECONDS
            || token.refresh_token_ttl_seconds > MAX_TOKEN_TTL_SECONDS
        {
            return Err(AppError::configuration(format!(
                "token lifetimes may not exceed {MAX_TOKEN_TTL_SECONDS} seconds"
            )));
        }
        if token.refresh_token_ttl_seconds < token.access_token_ttl_seconds {
            tracing::warn!(
                access_ttl = token.access_token_ttl_seconds,
                refresh_ttl = token.refresh_token_ttl_seconds,
                "Refresh token lifetime is shorter than access token lifetime"
            );
        }
        if let Some(reserved) = token
            .extended_claim_fields
            .iter()
            .find(|f| RESERVED_CLAIMS.contains(&f.as_str()))
        {
            return Err(AppError::configuration(format!(
                "token.extended_claim_fields may not contain reserved claim '{reserved}'"
            )));
        }
        if self.database.url.trim().is_empty() {
            return Err(AppError::configuration("database.url must be set"));
        }
        if token.store_backend == StoreBackend::Volatile
            && !matches!(self.cache.provider.as_str(), "memory" | "redis")
        {
            return Err(AppError::configuration(format!(
                "Unknown cache provider: '{}'. Supported: memory, redis",
                self.cache.provider
            )));
        }

        Ok(())
    }
}

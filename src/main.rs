//! Tokenward server: paired access/refresh token lifecycle over HTTP.
//!
//! Main entry point that wires the crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use tokenward_api::{AppState, build_app, serve};
use tokenward_auth::directory::UserDirectory;
use tokenward_auth::expiry::SystemClock;
use tokenward_auth::jwt::TokenCodec;
use tokenward_auth::lifecycle::TokenLifecycleService;
use tokenward_auth::store::build_token_store;
use tokenward_core::config::AppConfig;
use tokenward_core::error::AppError;
use tokenward_database::repositories::UserRepository;
use tokenward_database::DatabasePool;
use tokenward_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let env = std::env::var("TOKENWARD_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Tokenward v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        run_migrations(db.pool()).await?;
    }

    let directory = Arc::new(UserDirectory::new(UserRepository::new(db.pool().clone())));
    let clock = Arc::new(SystemClock);
    let codec = Arc::new(TokenCodec::new(&config.token, clock.clone())?);

    if !codec.verifies_signature() {
        tracing::warn!(
            "token.verify_signature is off: bearer tokens are decoded without checking their signature"
        );
    }

    let store = build_token_store(&config, &db, codec.clone(), directory.clone()).await?;
    let tokens = TokenLifecycleService::new(&config.token, store, codec, clock)?;

    let config = Arc::new(config);
    let state = AppState::new(config.clone(), Arc::new(tokens), directory);

    serve(build_app(state), &config.server).await?;

    db.close().await;
    tracing::info!("Tokenward shut down gracefully");
    Ok(())
}

//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod password;
pub mod token;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use tokenward_auth::directory::UserDirectory;
use tokenward_auth::expiry::SystemClock;
use tokenward_auth::jwt::TokenCodec;
use tokenward_auth::store::{TokenStore, build_token_store};
use tokenward_core::config::AppConfig;
use tokenward_core::error::AppError;
use tokenward_database::DatabasePool;
use tokenward_database::repositories::UserRepository;

use crate::output::OutputFormat;

/// Tokenward: paired access/refresh token service
#[derive(Debug, Parser)]
#[command(name = "tokenward", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Token inspection and revocation
    Token(token::TokenArgs),
    /// Password hashing for directory seeding
    Password(password::PasswordArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
            Commands::Token(args) => token::execute(args, &self.config, self.format).await,
            Commands::Password(args) => password::execute(args),
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_file(config_path)
}

/// Helper: codec for the loaded configuration
pub fn build_codec(config: &AppConfig) -> Result<Arc<TokenCodec>, AppError> {
    Ok(Arc::new(TokenCodec::new(&config.token, Arc::new(SystemClock))?))
}

/// Helper: the configured token store, wired like the server wires it
pub async fn open_token_store(config: &AppConfig) -> Result<Arc<dyn TokenStore>, AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    let directory = Arc::new(UserDirectory::new(UserRepository::new(db.pool().clone())));
    build_token_store(config, &db, build_codec(config)?, directory).await
}

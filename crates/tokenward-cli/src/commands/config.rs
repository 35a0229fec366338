//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use tokenward_auth::lifecycle::ResponseBuilder;
use tokenward_core::config::AppConfig;
use tokenward_core::error::AppError;
use tokenward_database::connection::mask_password;

use crate::output::{self, FieldRow, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets masked)
    Show,
    /// Validate the configuration file, including field names
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = redacted(super::load_config(config_path)?);
            let rows = vec![
                FieldRow::new("server", format!("{}:{}", config.server.host, config.server.port)),
                FieldRow::new("database.url", &config.database.url),
                FieldRow::new("cache.provider", &config.cache.provider),
                FieldRow::new("token.store_backend", config.token.store_backend),
                FieldRow::new("token.access_ttl", config.token.access_token_ttl_seconds),
                FieldRow::new("token.refresh_ttl", config.token.refresh_token_ttl_seconds),
                FieldRow::new("token.rotate_refresh", config.token.rotate_refresh_token),
                FieldRow::new("token.response_fields", config.token.response_fields.join(", ")),
                FieldRow::new(
                    "token.extended_claims",
                    config.token.extended_claim_fields.join(", "),
                ),
                FieldRow::new("token.verify_signature", config.token.verify_signature),
                FieldRow::new("token.strict_token_kind", config.token.strict_token_kind),
            ];
            output::print_fields(&config, rows, format);
        }
        ConfigCommand::Validate => {
            let result = super::load_config(config_path).and_then(|config| {
                ResponseBuilder::new(&config.token.response_fields)?;
                super::build_codec(&config)?;
                Ok(config)
            });

            match result {
                Ok(config) => {
                    output::print_success(&format!("Configuration '{config_path}' is valid"));
                    output::print_kv(
                        "Server",
                        &format!("{}:{}", config.server.host, config.server.port),
                    );
                    output::print_kv("Database", &mask_password(&config.database.url));
                    output::print_kv("Token store", &config.token.store_backend.to_string());
                    if !config.token.verify_signature {
                        output::print_warning(
                            "token.verify_signature is off: token signatures are not checked",
                        );
                    }
                }
                Err(e) => {
                    output::print_error(&format!("Configuration invalid: {e}"));
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}

fn redacted(mut config: AppConfig) -> AppConfig {
    config.token.secret_key = "****".to_string();
    config.database.url = mask_password(&config.database.url);
    config.cache.redis.url = mask_password(&config.cache.redis.url);
    config
}

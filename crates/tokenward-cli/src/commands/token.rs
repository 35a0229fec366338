//! Token inspection and revocation commands.

use chrono::Utc;
use clap::{Args, Subcommand};
use serde::Serialize;

use tokenward_auth::jwt::Claims;
use tokenward_core::error::AppError;
use tokenward_entity::token::TokenRecord;

use crate::output::{self, FieldRow, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Decode a token string and show its claims (no store lookup)
    Decode {
        /// Access or refresh token
        token: String,
    },
    /// Show the stored pair for a token id
    Inspect {
        /// Token id (jti)
        token_id: String,
    },
    /// Delete the stored pair for a token id
    Revoke {
        /// Token id (jti)
        token_id: String,
    },
}

#[derive(Debug, Serialize)]
struct DecodedToken {
    #[serde(flatten)]
    claims: Claims,
    expired: bool,
}

#[derive(Debug, Serialize)]
struct StoredPair<'a> {
    #[serde(flatten)]
    record: &'a TokenRecord,
    username: &'a str,
}

/// Execute token commands
pub async fn execute(
    args: &TokenArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;

    match &args.command {
        TokenCommand::Decode { token } => {
            let claims = super::build_codec(&config)?.decode(token)?;
            let expired = claims.is_expired_at(Utc::now());

            let mut rows = vec![
                FieldRow::new("token_id", &claims.token_id),
                FieldRow::new("token_kind", claims.token_kind),
                FieldRow::new("subject_id", claims.subject_id),
                FieldRow::new(
                    "exp",
                    claims
                        .expires_at()
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| claims.exp.to_string()),
                ),
                FieldRow::new("expired", expired),
            ];
            rows.extend(
                claims
                    .extra
                    .iter()
                    .map(|(name, value)| FieldRow::new(name.as_str(), value)),
            );

            output::print_fields(&DecodedToken { claims, expired }, rows, format);
            if !config.token.verify_signature {
                output::print_warning("Signature not verified (token.verify_signature is off)");
            }
        }
        TokenCommand::Inspect { token_id } => {
            let store = super::open_token_store(&config).await?;
            let grant = store.get(token_id).await?;
            let record = &grant.record;

            let rows = vec![
                FieldRow::new("token_id", &record.token_id),
                FieldRow::new("subject_id", record.subject_id),
                FieldRow::new("username", &grant.identity.username),
                FieldRow::new("issued_at", record.issued_at.to_rfc3339()),
                FieldRow::new("backend", store.backend()),
            ];
            let pair = StoredPair {
                record,
                username: &grant.identity.username,
            };
            output::print_fields(&pair, rows, format);
        }
        TokenCommand::Revoke { token_id } => {
            let store = super::open_token_store(&config).await?;
            store.delete(token_id).await?;
            output::print_success(&format!("Token {token_id} revoked"));
        }
    }

    Ok(())
}

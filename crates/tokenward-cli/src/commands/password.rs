//! Password hashing for seeding the user directory.

use clap::{Args, Subcommand};

use tokenward_auth::password::PasswordHasher;
use tokenward_core::error::AppError;

/// Arguments for password commands
#[derive(Debug, Args)]
pub struct PasswordArgs {
    /// Password subcommand
    #[command(subcommand)]
    pub command: PasswordCommand,
}

/// Password subcommands
#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    /// Print the Argon2id hash of a password, for `users.password_hash`
    Hash,
}

/// Execute password commands
pub fn execute(args: &PasswordArgs) -> Result<(), AppError> {
    match &args.command {
        PasswordCommand::Hash => {
            let password = dialoguer::Password::new()
                .with_prompt("Password")
                .with_confirmation("Repeat password", "Passwords do not match")
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

            println!("{}", PasswordHasher::new().hash_password(&password)?);
        }
    }

    Ok(())
}

//! # tokenward-auth
//!
//! The token lifecycle core.
//!
//! ## Modules
//!
//! - `jwt` — claim sets and the HS256 token codec
//! - `expiry` — expiry evaluation and injectable clocks
//! - `store` — the `TokenStore` trait with durable (PostgreSQL) and volatile (cache) backends
//! - `authenticator` — bearer credential authentication
//! - `lifecycle` — login, logout, verify and refresh orchestration
//! - `directory` — identity lookup and credential verification against the user table
//! - `password` — Argon2id password hashing

pub mod authenticator;
pub mod directory;
pub mod expiry;
pub mod jwt;
pub mod lifecycle;
pub mod password;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use authenticator::{AuthenticatedIdentity, RequestAuthenticator};
pub use directory::{CredentialVerifier, IdentityProvider, UserDirectory};
pub use expiry::{Clock, ManualClock, SystemClock, is_expired};
pub use jwt::{Claims, TokenCodec, TokenKind};
pub use lifecycle::{ResponseBuilder, ResponsePayload, TokenLifecycleService};
pub use password::PasswordHasher;
pub use store::{DurableTokenStore, TokenGrant, TokenStore, VolatileTokenStore, build_token_store};

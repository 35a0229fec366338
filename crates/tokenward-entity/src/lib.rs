//! # tokenward-entity
//!
//! Domain entity models for Tokenward. Database entities derive
//! `sqlx::FromRow` in addition to the serde traits.

pub mod identity;
pub mod token;

pub use identity::Identity;
pub use token::TokenRecord;

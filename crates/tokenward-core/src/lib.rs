//! # tokenward-core
//!
//! Core crate for Tokenward. Contains the configuration schema, the unified
//! error system, and the cache provider trait shared by the storage crates.
//!
//! This crate has **no** internal dependencies on other Tokenward crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;

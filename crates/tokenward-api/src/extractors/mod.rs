//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::{BearerAuth, BearerToken};
pub use json::ValidatedJson;

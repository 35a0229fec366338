//! # tokenward-api
//!
//! HTTP surface of Tokenward built on Axum: the four token endpoints, a
//! health probe, bearer extractors, error mapping and middleware.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;

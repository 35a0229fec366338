//! Token lifecycle orchestration.

pub mod response;
pub mod service;

pub use response::{ResponseBuilder, ResponsePayload};
pub use service::TokenLifecycleService;

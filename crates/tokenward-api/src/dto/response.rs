//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Health probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"unavailable"`.
    pub status: String,
    /// Configured token store backend.
    pub store: String,
    /// Server version.
    pub version: String,
}

//! Response types for the listings API.

use serde::Serialize;

/// Failure envelope: `{ "success": false, "data": <reason> }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub data: String,
}

impl ErrorResponse {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            data: reason.into(),
        }
    }
}

/// Response from the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub requests: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listings: Option<usize>,
}

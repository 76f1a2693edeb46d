//! HTTP Request/Response Bodies

use qbroker_core::port::BrokerStats;
use serde::{Deserialize, Serialize};

/// PUT /queue/{name} body
#[derive(Debug, Deserialize)]
pub struct PutMessageRequest {
    #[serde(default)]
    pub message: String,
}

/// GET /queue/{name} query string
#[derive(Debug, Default, Deserialize)]
pub struct GetMessageParams {
    /// Raw value; parsed by the handler so a bad value maps to our own 400
    pub timeout: Option<String>,
}

/// GET /queue/{name} success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub broker: BrokerStats,
    pub default_timeout_secs: u64,
    pub uptime_seconds: u64,
}

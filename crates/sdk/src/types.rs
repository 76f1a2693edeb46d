//! SDK Request/Response Types
//!
//! Mirrors the JSON bodies of the api-http crate.

use serde::{Deserialize, Serialize};

/// PUT /queue/{name} body
#[derive(Debug, Clone, Serialize)]
pub struct PutMessageRequest {
    pub message: String,
}

/// GET /queue/{name} success body
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of every non-2xx response
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Occupancy of one queue
#[derive(Debug, Clone, Deserialize)]
pub struct QueueStats {
    pub name: String,
    pub len: usize,
    pub capacity: usize,
}

/// GET /stats
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub queue_count: usize,
    pub max_queues: usize,
    pub queues: Vec<QueueStats>,
    pub default_timeout_secs: u64,
    pub uptime_seconds: u64,
}

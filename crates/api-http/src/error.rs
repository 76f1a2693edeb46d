//! HTTP Error Types
//!
//! Maps broker errors to status codes. This is the only place the mapping
//! lives.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use qbroker_core::domain::DomainError;
use qbroker_core::error::BrokerError;
use std::net::SocketAddr;
use thiserror::Error;

use crate::types::ErrorResponse;

/// Machine-readable error kinds carried in the response body
pub mod kind {
    pub const INVALID_REQUEST: &str = "invalid_request";
    pub const QUEUE_LIMIT_EXCEEDED: &str = "queue_limit_exceeded";
    pub const QUEUE_FULL: &str = "queue_full";
    pub const QUEUE_NOT_FOUND: &str = "queue_not_found";
    pub const TIMEOUT: &str = "timeout";
    pub const METHOD_NOT_ALLOWED: &str = "method_not_allowed";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// Error returned by handlers; renders as `{"error": kind, "message": text}`
#[derive(Debug)]
pub struct ApiError(pub BrokerError);

impl ApiError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        ApiError(BrokerError::InvalidRequest(reason.into()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BrokerError::Timeout { .. } => StatusCode::NOT_FOUND,
            BrokerError::QueueLimitExceeded { .. }
            | BrokerError::QueueFull { .. }
            | BrokerError::QueueNotFound(_)
            | BrokerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            BrokerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match &self.0 {
            BrokerError::QueueLimitExceeded { .. } => kind::QUEUE_LIMIT_EXCEEDED,
            BrokerError::QueueFull { .. } => kind::QUEUE_FULL,
            BrokerError::QueueNotFound(_) => kind::QUEUE_NOT_FOUND,
            BrokerError::Timeout { .. } => kind::TIMEOUT,
            BrokerError::InvalidRequest(_) => kind::INVALID_REQUEST,
            BrokerError::Config(_) => kind::INTERNAL_ERROR,
        }
    }
}

impl From<BrokerError> for ApiError {
    fn from(err: BrokerError) -> Self {
        ApiError(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.0.to_string(),
        });
        (self.status(), body).into_response()
    }
}

/// Errors starting or running the HTTP server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read local address: {0}")]
    LocalAddr(#[source] std::io::Error),

    #[error("server error on {addr}: {source}")]
    Serve {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server task failed: {0}")]
    Join(String),
}

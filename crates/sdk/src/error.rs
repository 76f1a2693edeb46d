//! SDK Error Types

use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK Error
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Connection error: {0}")]
    Connection(String),

    /// The broker answered with a non-success status
    #[error("API error ({status}, {kind}): {message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl SdkError {
    /// `true` for the broker's "queue is full" rejection
    pub fn is_queue_full(&self) -> bool {
        matches!(self, SdkError::Api { kind, .. } if kind == "queue_full")
    }

    /// `true` for a GET on a queue nobody has produced to yet
    pub fn is_queue_not_found(&self) -> bool {
        matches!(self, SdkError::Api { kind, .. } if kind == "queue_not_found")
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            SdkError::Connection(e.to_string())
        } else if e.is_decode() {
            SdkError::Transport(format!("Decode error: {}", e))
        } else {
            SdkError::Transport(e.to_string())
        }
    }
}

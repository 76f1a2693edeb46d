// Central Error Type for the Broker

use std::time::Duration;

use thiserror::Error;

/// Broker-level error type.
///
/// Every variant is a synchronous outcome of the call that produced it;
/// callers branch on the variant, never on the rendered text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrokerError {
    /// A new queue name was requested while the registry is at its ceiling.
    #[error("maximum number of queues reached ({max_queues})")]
    QueueLimitExceeded { max_queues: usize },

    /// The target queue already holds `capacity` messages.
    #[error("queue '{queue}' is full (capacity {capacity})")]
    QueueFull { queue: String, capacity: usize },

    /// Dequeue on a name that was never created by an enqueue.
    #[error("queue '{0}' does not exist")]
    QueueNotFound(String),

    /// No message arrived within the wait window. Not a fault.
    #[error("no message in queue '{queue}' after {waited:?}")]
    Timeout { queue: String, waited: Duration },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<crate::domain::DomainError> for BrokerError {
    fn from(err: crate::domain::DomainError) -> Self {
        match err {
            crate::domain::DomainError::InvalidConfig(msg) => BrokerError::Config(msg),
            other => BrokerError::InvalidRequest(other.to_string()),
        }
    }
}

/// Result type alias using BrokerError
pub type Result<T> = std::result::Result<T, BrokerError>;

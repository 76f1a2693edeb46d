// Domain Layer - Queue engine and its value types

pub mod config;
pub mod error;
pub mod message;
pub mod queue;

// Re-exports
pub use config::BrokerConfig;
pub use error::DomainError;
pub use message::{parse_timeout_secs, validate_message, Message, QueueName};
pub use queue::MessageQueue;

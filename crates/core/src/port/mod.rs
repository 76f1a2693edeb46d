// Port Layer - Interfaces between the engine and its front ends

pub mod broker;

// Re-exports
pub use broker::{BrokerStats, MessageBroker, QueueStats};

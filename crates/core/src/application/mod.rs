// Application Layer - Broker registry

pub mod broker;
pub mod constants;

// Re-exports
pub use broker::Broker;

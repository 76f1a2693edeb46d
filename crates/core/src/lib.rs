// qbroker Core - Queue engine, broker registry & ports
// NO transport dependencies: the HTTP front end lives in qbroker-api-http

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::Broker;
pub use error::{BrokerError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

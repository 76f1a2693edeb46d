//! Startup configuration
//!
//! Every option can come from the command line or from a `QBROKER_*`
//! environment variable; omitted options fall back to fixed defaults.

use clap::Parser;
use qbroker_api_http::HttpServerConfig;
use qbroker_core::application::constants::{
    DEFAULT_MAX_QUEUES, DEFAULT_MAX_QUEUE_SIZE, DEFAULT_TIMEOUT_SECS,
};
use qbroker_core::domain::BrokerConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "qbroker")]
#[command(about = "In-process message broker with named bounded queues", long_about = None)]
#[command(version)]
pub struct Args {
    /// Listen port
    #[arg(long, env = "QBROKER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "QBROKER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Capacity of every queue
    #[arg(
        long,
        env = "QBROKER_MAX_QUEUE_SIZE",
        default_value_t = DEFAULT_MAX_QUEUE_SIZE,
        value_parser = parse_positive
    )]
    pub max_queue_size: usize,

    /// Maximum number of distinct queues
    #[arg(
        long,
        env = "QBROKER_MAX_QUEUES",
        default_value_t = DEFAULT_MAX_QUEUES,
        value_parser = parse_positive
    )]
    pub max_queues: usize,

    /// Seconds a GET waits when the request has no `timeout`
    #[arg(long, env = "QBROKER_DEFAULT_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub default_timeout: u64,
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Args {
    pub fn broker_config(&self) -> BrokerConfig {
        BrokerConfig::new(self.max_queues, self.max_queue_size, self.default_timeout)
    }

    pub fn server_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }
}

// Broker Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{DomainError, Result};
use crate::application::constants::{
    DEFAULT_MAX_QUEUES, DEFAULT_MAX_QUEUE_SIZE, DEFAULT_TIMEOUT_SECS,
};

/// Fixed configuration of a broker, decided once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Upper bound on distinct queue names
    pub max_queues: usize,
    /// Capacity of every queue the broker creates
    pub max_queue_size: usize,
    /// Wait applied when a consumer does not give one
    pub default_timeout_secs: u64,
}

impl BrokerConfig {
    pub fn new(max_queues: usize, max_queue_size: usize, default_timeout_secs: u64) -> Self {
        Self {
            max_queues,
            max_queue_size,
            default_timeout_secs,
        }
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_queues == 0 {
            return Err(DomainError::InvalidConfig(
                "max_queues must be positive".to_string(),
            ));
        }
        if self.max_queue_size == 0 {
            return Err(DomainError::InvalidConfig(
                "max_queue_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_QUEUES, DEFAULT_MAX_QUEUE_SIZE, DEFAULT_TIMEOUT_SECS)
    }
}

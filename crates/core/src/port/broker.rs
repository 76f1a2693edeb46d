// Message Broker Port (Interface)

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{BrokerConfig, Message, QueueName};
use crate::error::Result;

/// Interface the front ends use to reach the broker
#[async_trait]
pub trait MessageBroker: Send + Sync {
    /// Publish `message` to `queue`, creating the queue on first use
    async fn enqueue(&self, queue: &QueueName, message: Message) -> Result<()>;

    /// Take the head message of `queue`, waiting up to `timeout`
    /// (`None` = the broker's default)
    async fn dequeue(&self, queue: &QueueName, timeout: Option<Duration>) -> Result<Message>;

    /// Point-in-time view of the registry
    fn stats(&self) -> BrokerStats;

    fn config(&self) -> &BrokerConfig;
}

/// Occupancy of a single queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub name: String,
    pub len: usize,
    pub capacity: usize,
}

/// Registry snapshot, queues sorted by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerStats {
    pub queue_count: usize,
    pub max_queues: usize,
    pub queues: Vec<QueueStats>,
}

// Broker - name → queue registry with a global queue ceiling

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::{BrokerConfig, Message, MessageQueue, QueueName};
use crate::error::{BrokerError, Result};
use crate::port::{BrokerStats, MessageBroker, QueueStats};

/// Registry of named bounded queues.
///
/// The registry lock only covers lookup and creation. Message transfer runs
/// on the queue's own lock, so traffic on different names never contends.
pub struct Broker {
    config: BrokerConfig,
    queues: RwLock<HashMap<QueueName, Arc<MessageQueue>>>,
}

impl Broker {
    /// Create a broker with a validated configuration
    pub fn new(config: BrokerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            queues: RwLock::new(HashMap::new()),
            config,
        })
    }

    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    /// Number of queues created so far (never decreases)
    pub fn queue_count(&self) -> usize {
        self.queues
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn lookup(&self, name: &QueueName) -> Option<Arc<MessageQueue>> {
        self.queues
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Existing queue for `name`, or a new one if the ceiling allows it.
    ///
    /// The re-check and count check happen under the write lock, so racing
    /// first uses of a name create one queue and racing creations never
    /// exceed `max_queues`.
    fn get_or_create(&self, name: &QueueName) -> Result<Arc<MessageQueue>> {
        if let Some(queue) = self.lookup(name) {
            return Ok(queue);
        }

        let mut queues = self.queues.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(queue) = queues.get(name) {
            return Ok(Arc::clone(queue));
        }

        if queues.len() >= self.config.max_queues {
            warn!(
                queue = %name,
                max_queues = self.config.max_queues,
                "Queue limit reached, refusing to create queue"
            );
            return Err(BrokerError::QueueLimitExceeded {
                max_queues: self.config.max_queues,
            });
        }

        let queue = Arc::new(MessageQueue::new(name.clone(), self.config.max_queue_size));
        queues.insert(name.clone(), Arc::clone(&queue));
        debug!(
            queue = %name,
            capacity = self.config.max_queue_size,
            total = queues.len(),
            "Queue created"
        );
        Ok(queue)
    }

    /// Publish `message` to `name`, creating the queue on first use.
    ///
    /// Fails with `QueueLimitExceeded` for a new name at the ceiling and with
    /// `QueueFull` when the queue is saturated. Never waits.
    pub fn enqueue(&self, name: &QueueName, message: Message) -> Result<()> {
        self.get_or_create(name)?.try_enqueue(message)
    }

    /// Take the head message of `name`, waiting up to `timeout`
    /// (the configured default when `None`).
    ///
    /// An unknown name fails at once with `QueueNotFound`; the queue is not
    /// created.
    pub async fn dequeue(&self, name: &QueueName, timeout: Option<Duration>) -> Result<Message> {
        let queue = self
            .lookup(name)
            .ok_or_else(|| BrokerError::QueueNotFound(name.to_string()))?;

        let timeout = timeout.unwrap_or_else(|| self.config.default_timeout());
        queue.dequeue(timeout).await
    }

    pub fn stats(&self) -> BrokerStats {
        let queues = self.queues.read().unwrap_or_else(PoisonError::into_inner);

        let mut snapshot: Vec<QueueStats> = queues
            .values()
            .map(|q| QueueStats {
                name: q.name().to_string(),
                len: q.len(),
                capacity: q.capacity(),
            })
            .collect();
        snapshot.sort_by(|a, b| a.name.cmp(&b.name));

        BrokerStats {
            queue_count: queues.len(),
            max_queues: self.config.max_queues,
            queues: snapshot,
        }
    }
}

#[async_trait]
impl MessageBroker for Broker {
    async fn enqueue(&self, queue: &QueueName, message: Message) -> Result<()> {
        Broker::enqueue(self, queue, message)
    }

    async fn dequeue(&self, queue: &QueueName, timeout: Option<Duration>) -> Result<Message> {
        Broker::dequeue(self, queue, timeout).await
    }

    fn stats(&self) -> BrokerStats {
        Broker::stats(self)
    }

    fn config(&self) -> &BrokerConfig {
        Broker::config(self)
    }
}

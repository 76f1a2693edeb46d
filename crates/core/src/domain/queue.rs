// Queue Domain Model: bounded FIFO with blocking-with-timeout removal

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::trace;

use super::message::{Message, QueueName};
use crate::error::{BrokerError, Result};

/// Capacity-bounded FIFO buffer of text payloads for one topic.
///
/// The buffer lock is only ever held for a push or a pop, never across an
/// `.await`. Consumers park on `available` while the queue is empty.
#[derive(Debug)]
pub struct MessageQueue {
    name: QueueName,
    capacity: usize,
    buffer: Mutex<VecDeque<Message>>,
    available: Notify,
}

impl MessageQueue {
    pub fn new(name: QueueName, capacity: usize) -> Self {
        Self {
            name,
            capacity,
            buffer: Mutex::new(VecDeque::with_capacity(capacity)),
            available: Notify::new(),
        }
    }

    pub fn name(&self) -> &QueueName {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }

    // A panic while holding the lock cannot leave the VecDeque half-mutated,
    // so a poisoned buffer is still consistent.
    fn buffer(&self) -> MutexGuard<'_, VecDeque<Message>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `message` at the tail, or fail with `QueueFull`. Never waits.
    pub fn try_enqueue(&self, message: Message) -> Result<()> {
        {
            let mut buffer = self.buffer();
            if buffer.len() >= self.capacity {
                return Err(BrokerError::QueueFull {
                    queue: self.name.to_string(),
                    capacity: self.capacity,
                });
            }
            buffer.push_back(message);
            trace!(queue = %self.name, len = buffer.len(), "message enqueued");
        }
        self.available.notify_one();
        Ok(())
    }

    /// Remove the head message if one is present. Never waits.
    pub fn try_dequeue(&self) -> Option<Message> {
        let (message, remaining) = {
            let mut buffer = self.buffer();
            let message = buffer.pop_front();
            (message, buffer.len())
        };
        // Pass the wake-up on so a parked consumer sees what is left
        if message.is_some() && remaining > 0 {
            self.available.notify_one();
        }
        message
    }

    /// Remove the head message, waiting up to `timeout` for one to arrive.
    ///
    /// A zero timeout still returns a message that is already buffered.
    ///
    /// A timeout too large to express as a deadline waits without one.
    pub async fn dequeue(&self, timeout: Duration) -> Result<Message> {
        let deadline = Instant::now().checked_add(timeout);

        loop {
            // Register interest before checking the buffer so an enqueue that
            // lands in between still wakes us.
            let notified = self.available.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(message) = self.try_dequeue() {
                return Ok(message);
            }

            let Some(deadline) = deadline else {
                notified.await;
                continue;
            };

            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                // The wake-up may have raced the deadline
                return self.try_dequeue().ok_or_else(|| BrokerError::Timeout {
                    queue: self.name.to_string(),
                    waited: timeout,
                });
            }
        }
    }
}

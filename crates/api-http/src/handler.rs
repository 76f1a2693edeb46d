//! HTTP Method Handlers
//!
//! Validates requests and forwards them to the broker.

use crate::error::ApiError;
use crate::types::{
    GetMessageParams, HealthResponse, MessageResponse, PutMessageRequest, StatsResponse,
};
use qbroker_core::domain::{parse_timeout_secs, validate_message, QueueName};
use qbroker_core::port::MessageBroker;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// HTTP handler with the injected broker
pub struct HttpHandler {
    broker: Arc<dyn MessageBroker>,
    start_time: Instant,
}

impl HttpHandler {
    pub fn new(broker: Arc<dyn MessageBroker>) -> Self {
        Self {
            broker,
            start_time: Instant::now(),
        }
    }

    /// PUT /queue/{name}
    pub async fn put_message(&self, name: String, body: &[u8]) -> Result<(), ApiError> {
        let queue = QueueName::new(name)?;

        let request: PutMessageRequest = serde_json::from_slice(body)
            .map_err(|e| ApiError::invalid_request(format!("malformed JSON body: {}", e)))?;
        validate_message(&request.message)?;

        self.broker.enqueue(&queue, request.message).await?;
        debug!(queue = %queue, "Message accepted");
        Ok(())
    }

    /// GET /queue/{name}?timeout=<seconds>
    pub async fn get_message(
        &self,
        name: String,
        params: GetMessageParams,
    ) -> Result<MessageResponse, ApiError> {
        let queue = QueueName::new(name)?;

        // An empty `timeout=` counts as absent
        let timeout = match params.timeout.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(parse_timeout_secs(raw)?),
        };

        let message = self.broker.dequeue(&queue, timeout).await?;
        debug!(queue = %queue, "Message delivered");
        Ok(MessageResponse { message })
    }

    /// GET /health
    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "ok".to_string(),
            version: qbroker_core::VERSION.to_string(),
        }
    }

    /// GET /stats
    pub fn stats(&self) -> StatsResponse {
        StatsResponse {
            broker: self.broker.stats(),
            default_timeout_secs: self.broker.config().default_timeout_secs,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbroker_core::domain::BrokerConfig;
    use qbroker_core::error::BrokerError;
    use qbroker_core::Broker;

    fn handler(max_queues: usize, max_queue_size: usize) -> HttpHandler {
        let broker = Broker::new(BrokerConfig::new(max_queues, max_queue_size, 1)).unwrap();
        HttpHandler::new(Arc::new(broker))
    }

    fn params(timeout: Option<&str>) -> GetMessageParams {
        GetMessageParams {
            timeout: timeout.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let h = handler(10, 10);
        h.put_message("pet".into(), br#"{"message":"data"}"#)
            .await
            .unwrap();

        let resp = h.get_message("pet".into(), params(Some("0"))).await.unwrap();
        assert_eq!(resp.message, "data");
    }

    #[tokio::test]
    async fn test_put_rejects_bad_bodies() {
        let h = handler(10, 10);
        let bodies: [&[u8]; 4] = [b"invalid json", br#"{}"#, br#"{"message":""}"#, b"null"];
        for body in bodies {
            let err = h.put_message("q".into(), body).await.unwrap_err();
            assert!(
                matches!(err.0, BrokerError::InvalidRequest(_)),
                "body {:?} gave {:?}",
                String::from_utf8_lossy(body),
                err
            );
        }
        // Nothing was registered by the rejected requests
        assert_eq!(h.stats().broker.queue_count, 0);
    }

    #[tokio::test]
    async fn test_get_rejects_bad_timeout() {
        let h = handler(10, 10);
        h.put_message("q".into(), br#"{"message":"m"}"#).await.unwrap();

        for raw in ["abc", "-1", "1.5"] {
            let err = h.get_message("q".into(), params(Some(raw))).await.unwrap_err();
            assert!(matches!(err.0, BrokerError::InvalidRequest(_)));
        }
        // The message is still there
        assert_eq!(h.stats().broker.queues[0].len, 1);
    }

    #[tokio::test]
    async fn test_empty_name_is_invalid() {
        let h = handler(10, 10);
        let err = h.get_message(String::new(), params(None)).await.unwrap_err();
        assert!(matches!(err.0, BrokerError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_stats_reports_config() {
        let h = handler(3, 7);
        h.put_message("a".into(), br#"{"message":"m"}"#).await.unwrap();

        let stats = h.stats();
        assert_eq!(stats.broker.max_queues, 3);
        assert_eq!(stats.broker.queues[0].capacity, 7);
        assert_eq!(stats.default_timeout_secs, 1);
        assert_eq!(h.health().status, "ok");
    }
}

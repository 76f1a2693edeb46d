//! qbroker Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{ErrorResponse, MessageResponse, PutMessageRequest, StatsResponse};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Budget for the HTTP exchange itself, on top of any broker-side wait
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Broker-side wait assumed for a GET without an explicit timeout
const DEFAULT_WAIT: Duration = Duration::from_secs(10);

/// qbroker Client
///
/// Provides a high-level interface to a qbroker daemon.
///
/// # Example
///
/// ```no_run
/// use qbroker_sdk::QBrokerClient;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = QBrokerClient::connect("http://127.0.0.1:8080")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct QBrokerClient {
    client: Client,
    base_url: Url,
    default_wait: Duration,
}

impl QBrokerClient {
    /// Create a client for the daemon at `url` (e.g. `http://127.0.0.1:8080`)
    pub fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        let base_url =
            Url::parse(url).map_err(|e| SdkError::InvalidUrl(format!("{}: {}", url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SdkError::InvalidUrl(url.to_string()));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            default_wait: DEFAULT_WAIT,
        })
    }

    /// Match the daemon's `--default-timeout` when it is not the stock 10s,
    /// so GETs without a timeout are not cut short.
    pub fn with_default_wait(mut self, wait: Duration) -> Self {
        self.default_wait = wait;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SdkError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn queue_url(&self, queue: &str) -> Result<Url> {
        self.endpoint(std::iter::once("queue").chain(queue.split('/')))
    }

    /// HTTP deadline for a GET: the broker-side wait plus the exchange budget
    fn get_timeout(&self, timeout_secs: Option<u64>) -> Duration {
        timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(self.default_wait)
            .saturating_add(REQUEST_TIMEOUT)
    }

    /// Publish `message` to `queue`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use qbroker_sdk::QBrokerClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = QBrokerClient::connect("http://127.0.0.1:8080")?;
    /// if let Err(e) = client.put("orders", "order #1").await {
    ///     if e.is_queue_full() {
    ///         println!("try again later");
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn put(&self, queue: &str, message: impl Into<String>) -> Result<()> {
        let body = PutMessageRequest {
            message: message.into(),
        };

        let response = self
            .client
            .put(self.queue_url(queue)?)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        check_status(response).await.map(|_| ())
    }

    /// Take the next message from `queue`, waiting up to `timeout_secs`
    /// (the broker's default when `None`).
    ///
    /// Returns `Ok(None)` when nothing arrived within the wait.
    pub async fn get(&self, queue: &str, timeout_secs: Option<u64>) -> Result<Option<String>> {
        let mut request = self
            .client
            .get(self.queue_url(queue)?)
            .timeout(self.get_timeout(timeout_secs));
        if let Some(secs) = timeout_secs {
            request = request.query(&[("timeout", secs)]);
        }

        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = check_status(response).await?;
        let body: MessageResponse = decode(response).await?;
        Ok(Some(body.message))
    }

    /// Registry snapshot
    pub async fn stats(&self) -> Result<StatsResponse> {
        let response = self
            .client
            .get(self.endpoint(["stats"])?)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let response = check_status(response).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response.text().await?;
    parse_body(&text)
}

fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await?;
    let (kind, message) = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(err) => (err.error, err.message),
        Err(_) => ("unknown".to_string(), text),
    };

    Err(SdkError::Api {
        status: status.as_u16(),
        kind,
        message,
    })
}

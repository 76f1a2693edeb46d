//! HTTP Server
//!
//! Serves the queue API over TCP with axum.

use crate::error::{kind, ApiError, ServerError};
use crate::handler::HttpHandler;
use crate::types::{ErrorResponse, GetMessageParams, HealthResponse, MessageResponse, StatsResponse};
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use qbroker_core::error::BrokerError;
use qbroker_core::port::MessageBroker;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 8080;

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl HttpServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

type SharedHandler = Arc<HttpHandler>;

async fn put_message(
    State(handler): State<SharedHandler>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    handler.put_message(name, &body).await?;
    Ok(StatusCode::OK)
}

async fn get_message(
    State(handler): State<SharedHandler>,
    Path(name): Path<String>,
    Query(params): Query<GetMessageParams>,
) -> Result<Json<MessageResponse>, ApiError> {
    handler.get_message(name, params).await.map(Json)
}

async fn missing_queue_name() -> ApiError {
    ApiError(BrokerError::InvalidRequest(
        "queue name must not be empty".to_string(),
    ))
}

// HEAD would otherwise fall through to the GET route and consume a message
async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: kind::METHOD_NOT_ALLOWED.to_string(),
            message: "Method not allowed".to_string(),
        }),
    )
}

async fn health(State(handler): State<SharedHandler>) -> Json<HealthResponse> {
    Json(handler.health())
}

async fn stats(State(handler): State<SharedHandler>) -> Json<StatsResponse> {
    Json(handler.stats())
}

/// Build the router around a broker.
///
/// Any method other than GET/PUT on `/queue/...` answers 405.
pub fn create_router(broker: Arc<dyn MessageBroker>) -> Router {
    let handler: SharedHandler = Arc::new(HttpHandler::new(broker));

    Router::new()
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route(
            "/queue/",
            get(missing_queue_name)
                .put(missing_queue_name)
                .head(method_not_allowed),
        )
        .route(
            "/queue/*name",
            get(get_message)
                .put(put_message)
                .head(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, broker: Arc<dyn MessageBroker>) -> Self {
        Self {
            config,
            router: create_router(broker),
        }
    }

    /// Bind the listener and start serving in a background task
    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let addr = self.config.addr();

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting HTTP server"
        );

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let router = self.router;
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
                .map_err(|source| ServerError::Serve {
                    addr: local_addr,
                    source,
                })
        });

        info!(addr = %local_addr, "HTTP server started successfully");

        Ok(ServerHandle {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            task,
        })
    }
}

/// Handle to a running server
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<(), ServerError>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for in-flight requests.
    ///
    /// Long-poll GETs finish when their own timeout elapses.
    pub async fn stop(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        self.task
            .await
            .map_err(|e| ServerError::Join(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use qbroker_core::domain::BrokerConfig;
    use qbroker_core::Broker;
    use std::time::{Duration, Instant};
    use tower::ServiceExt;

    fn app(max_queues: usize, max_queue_size: usize) -> Router {
        let broker = Broker::new(BrokerConfig::new(max_queues, max_queue_size, 1)).unwrap();
        create_router(Arc::new(broker))
    }

    fn put(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_put_then_get_roundtrip() {
        let app = app(10, 10);

        let response = app
            .clone()
            .oneshot(put("/queue/pet", r#"{"message":"data"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(request(Method::GET, "/queue/pet"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "data");
    }

    #[tokio::test]
    async fn test_get_unknown_queue_is_prompt_bad_request() {
        let app = app(10, 10);
        let start = Instant::now();

        let response = app
            .oneshot(request(Method::GET, "/queue/ghost?timeout=5"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(body_json(response).await["error"], kind::QUEUE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_second_put_into_full_queue_is_rejected() {
        let app = app(10, 1);

        let first = app.clone().oneshot(put("/queue/q", r#"{"message":"a"}"#)).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app.oneshot(put("/queue/q", r#"{"message":"b"}"#)).await.unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(second).await["error"], kind::QUEUE_FULL);
    }

    #[tokio::test]
    async fn test_queue_limit_is_bad_request() {
        let app = app(1, 10);

        let first = app
            .clone()
            .oneshot(put("/queue/queue1", r#"{"message":"m1"}"#))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(put("/queue/queue2", r#"{"message":"m2"}"#))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(second).await["error"], kind::QUEUE_LIMIT_EXCEEDED);
    }

    #[tokio::test]
    async fn test_empty_queue_times_out_with_not_found() {
        let app = app(10, 10);
        app.clone()
            .oneshot(put("/queue/q", r#"{"message":"x"}"#))
            .await
            .unwrap();
        app.clone()
            .oneshot(request(Method::GET, "/queue/q"))
            .await
            .unwrap();

        let start = Instant::now();
        let response = app
            .oneshot(request(Method::GET, "/queue/q?timeout=1"))
            .await
            .unwrap();
        let elapsed = start.elapsed();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_secs(3), "waited {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_invalid_put_bodies() {
        let app = app(10, 10);
        for body in ["invalid json", "{}", r#"{"message":""}"#, r#"{"message":5}"#] {
            let response = app.clone().oneshot(put("/queue/q", body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {}", body);
        }
    }

    #[tokio::test]
    async fn test_invalid_timeout() {
        let app = app(10, 10);
        app.clone()
            .oneshot(put("/queue/q", r#"{"message":"x"}"#))
            .await
            .unwrap();

        for uri in ["/queue/q?timeout=abc", "/queue/q?timeout=-1"] {
            let response = app.clone().oneshot(request(Method::GET, uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {}", uri);
        }
    }

    #[tokio::test]
    async fn test_largest_timeout_still_delivers() {
        let app = app(10, 10);
        app.clone()
            .oneshot(put("/queue/q", r#"{"message":"x"}"#))
            .await
            .unwrap();

        let response = app
            .oneshot(request(Method::GET, "/queue/q?timeout=18446744073709551615"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "x");
    }

    #[tokio::test]
    async fn test_timeout_with_whitespace_is_rejected() {
        let app = app(10, 10);
        app.clone()
            .oneshot(put("/queue/q", r#"{"message":"x"}"#))
            .await
            .unwrap();

        let response = app
            .oneshot(request(Method::GET, "/queue/q?timeout=%205"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_queue_name() {
        let app = app(10, 10);

        let response = app
            .clone()
            .oneshot(put("/queue/", r#"{"message":"x"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app.oneshot(request(Method::GET, "/queue/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_other_methods_not_allowed() {
        let app = app(10, 10);
        for method in [Method::POST, Method::DELETE, Method::PATCH, Method::HEAD] {
            let response = app
                .clone()
                .oneshot(request(method.clone(), "/queue/q"))
                .await
                .unwrap();
            assert_eq!(
                response.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "method {}",
                method
            );
        }
    }

    #[tokio::test]
    async fn test_nested_queue_name() {
        let app = app(10, 10);
        app.clone()
            .oneshot(put("/queue/team/orders", r#"{"message":"n"}"#))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/stats"))
            .await
            .unwrap();
        let stats = body_json(response).await;
        assert_eq!(stats["queue_count"], 1);
        assert_eq!(stats["queues"][0]["name"], "team/orders");
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(1, 1)
            .oneshot(request(Method::GET, "/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_start_and_stop_on_ephemeral_port() {
        let broker = Broker::new(BrokerConfig::default()).unwrap();
        let config = HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        };

        let handle = HttpServer::new(config, Arc::new(broker)).start().await.unwrap();
        assert_ne!(handle.local_addr().port(), 0);
        handle.stop().await.unwrap();
    }
}

//! qbroker SDK - Rust Client Library
//!
//! Provides a convenient client for producing to and consuming from a qbroker
//! daemon over HTTP.
//!
//! # Example
//!
//! ```no_run
//! use qbroker_sdk::QBrokerClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QBrokerClient::connect("http://127.0.0.1:8080")?;
//!
//!     client.put("orders", "order #1").await?;
//!
//!     match client.get("orders", Some(5)).await? {
//!         Some(message) => println!("Got: {}", message),
//!         None => println!("Nothing arrived within 5s"),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::QBrokerClient;
pub use error::{Result, SdkError};
pub use types::{ErrorResponse, MessageResponse, PutMessageRequest, QueueStats, StatsResponse};

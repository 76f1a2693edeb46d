//! HTTP API Layer
//!
//! Maps `PUT /queue/{name}` and `GET /queue/{name}` onto the broker and its
//! outcomes onto status codes.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{create_router, HttpServer, HttpServerConfig, ServerHandle};

//! HTTP transport for the Byte Tools server.
//!
//! Assembles the resource and view routers onto one axum application, adds
//! the CORS and request tracing layers, and serves it on a TCP listener.

mod config;
mod error;
pub mod http;

pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};
pub use http::{HttpTransport, build_router};

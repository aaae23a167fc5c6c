//! Error types and handling for the Byte Tools server.
//!
//! Startup and serving failures surface through this type; request-level
//! failures stay in the domain errors and are answered over HTTP.

use thiserror::Error;

/// A specialized Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the server.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error originating from the HTTP transport.
    #[error("Transport error: {0}")]
    Transport(#[from] crate::core::transport::TransportError),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

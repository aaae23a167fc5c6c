//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the Byte Tools
//! server: configuration, error handling, the storage connection layer, the
//! session gate, shared server state and the HTTP transport.

pub mod config;
pub mod error;
pub mod persistence;
pub mod security;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::ByteToolsServer;
pub use transport::{HttpConfig, HttpTransport};

//! Byte Tools Server Library
//!
//! This crate provides the backend of the Byte Tools marketplace: a JSON API
//! over the Tool collection plus the catalog views built on top of it.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Configuration, error handling, storage connections, the session
//!   gate, shared server state and the HTTP transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: The Tool resource and its storage backends
//!   - **catalog**: Discover, management and add-tool views
//!
//! # Example
//!
//! ```rust,no_run
//! use byte_tools_server::core::{ByteToolsServer, Config, HttpTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = ByteToolsServer::from_config(config.clone())?;
//!     HttpTransport::new(config.http).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{ByteToolsServer, Config, Error, Result};

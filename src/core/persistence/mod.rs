//! Persistence infrastructure.
//!
//! - `connection`: the lazily connected, single-flight handle cache
//! - `mongo`: MongoDB connector (feature: `mongodb`)
//! - `error`: storage error types shared by every backend

mod connection;
mod error;

#[cfg(feature = "mongodb")]
pub mod mongo;

pub use connection::{ConnectionManager, Connector};
pub use error::{StorageError, StorageResult};

#[cfg(feature = "mongodb")]
pub use mongo::MongoConnector;

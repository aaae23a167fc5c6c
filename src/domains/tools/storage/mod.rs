//! Tool storage backends.
//!
//! Supported backends:
//! - Memory (local development and tests)
//! - MongoDB (feature: `mongodb`)

mod memory;
#[cfg(feature = "mongodb")]
mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::model::{NewTool, Tool, ToolId, ToolPatch};
use crate::core::config::{StorageBackend, StorageConfig};
use crate::core::error::{Error, Result};
use crate::core::persistence::StorageResult;

pub use memory::MemoryToolStorage;
#[cfg(feature = "mongodb")]
pub use mongo::{MongoToolStorage, ToolDocument};

/// CRUD interface over the Tool collection.
///
/// Every method performs at most one storage operation. Lookups by id return
/// `None` (or `false` for delete) when no record matches.
#[async_trait]
pub trait ToolStorage: Send + Sync + 'static {
    /// All records, in storage order.
    async fn list(&self) -> StorageResult<Vec<Tool>>;

    /// Up to `limit` records, newest `createdAt` first.
    async fn latest(&self, limit: usize) -> StorageResult<Vec<Tool>>;

    /// Insert a record; storage assigns the id and both timestamps.
    async fn create(&self, input: NewTool) -> StorageResult<Tool>;

    async fn get(&self, id: &ToolId) -> StorageResult<Option<Tool>>;

    /// Replace the submitted fields and return the post-update record.
    async fn update(&self, id: &ToolId, patch: ToolPatch) -> StorageResult<Option<Tool>>;

    async fn delete(&self, id: &ToolId) -> StorageResult<bool>;
}

/// Build the backend selected in the configuration.
pub fn create_storage(config: &StorageConfig) -> Result<Arc<dyn ToolStorage>> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Initializing in-memory Tool storage");
            Ok(Arc::new(MemoryToolStorage::new()))
        }
        #[cfg(feature = "mongodb")]
        StorageBackend::Mongodb => {
            let mongo = config
                .mongodb
                .clone()
                .ok_or_else(|| Error::config("Missing MONGODB_URI"))?;
            info!("Initializing MongoDB Tool storage (database '{}')", mongo.database);
            Ok(Arc::new(MongoToolStorage::new(mongo)))
        }
        #[cfg(not(feature = "mongodb"))]
        StorageBackend::Mongodb => Err(Error::config(
            "MongoDB backend requested but the server was built without the `mongodb` feature",
        )),
    }
}

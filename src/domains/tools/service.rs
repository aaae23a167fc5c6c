//! Tool service.
//!
//! The service sits between the HTTP handlers and the storage backend. It
//! rejects malformed identifiers before any storage call and turns missing
//! records into `ToolError::NotFound`.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::error::{ToolError, ToolResult};
use super::model::{NewTool, Tool, ToolId, ToolPatch};
use super::storage::ToolStorage;

/// Size of the "latest tools" window.
pub const LATEST_LIMIT: usize = 6;

/// CRUD operations on the Tool collection.
#[derive(Clone)]
pub struct ToolService {
    storage: Arc<dyn ToolStorage>,
}

impl ToolService {
    /// Create a service over the given backend.
    pub fn new(storage: Arc<dyn ToolStorage>) -> Self {
        Self { storage }
    }

    /// Every Tool, unpaginated.
    #[instrument(skip(self))]
    pub async fn list(&self) -> ToolResult<Vec<Tool>> {
        let tools = self.storage.list().await?;
        info!("Listed {} tools", tools.len());
        Ok(tools)
    }

    /// The newest Tools, at most `LATEST_LIMIT`.
    #[instrument(skip(self))]
    pub async fn latest(&self) -> ToolResult<Vec<Tool>> {
        Ok(self.storage.latest(LATEST_LIMIT).await?)
    }

    /// Insert a Tool.
    #[instrument(skip_all, fields(title = %input.title))]
    pub async fn create(&self, input: NewTool) -> ToolResult<Tool> {
        let tool = self.storage.create(input).await?;
        info!("Created tool {}", tool.id);
        Ok(tool)
    }

    /// Fetch one Tool by its path identifier.
    #[instrument(skip(self))]
    pub async fn get(&self, raw_id: &str) -> ToolResult<Tool> {
        let id = parse_id(raw_id)?;
        self.storage
            .get(&id)
            .await?
            .ok_or_else(|| ToolError::not_found(raw_id))
    }

    /// Replace the submitted fields on one Tool.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, raw_id: &str, patch: ToolPatch) -> ToolResult<Tool> {
        let id = parse_id(raw_id)?;
        let tool = self
            .storage
            .update(&id, patch)
            .await?
            .ok_or_else(|| ToolError::not_found(raw_id))?;
        info!("Updated tool {}", tool.id);
        Ok(tool)
    }

    /// Remove one Tool.
    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> ToolResult<()> {
        let id = parse_id(raw_id)?;
        if !self.storage.delete(&id).await? {
            return Err(ToolError::not_found(raw_id));
        }
        info!("Deleted tool {}", id);
        Ok(())
    }
}

fn parse_id(raw_id: &str) -> ToolResult<ToolId> {
    ToolId::parse(raw_id).ok_or_else(|| {
        warn!("Rejected malformed tool id '{}'", raw_id);
        ToolError::invalid_id(raw_id)
    })
}

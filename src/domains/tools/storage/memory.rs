//! In-memory Tool storage.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ToolStorage;
use crate::core::persistence::StorageResult;
use crate::domains::tools::model::{
    NewTool, Tool, ToolId, ToolPatch, next_update_timestamp, timestamp_now,
};

/// Process-local Tool collection. Ids sort in creation order, so iteration
/// order matches insertion order.
#[derive(Default)]
pub struct MemoryToolStorage {
    tools: RwLock<BTreeMap<ToolId, Tool>>,
}

impl MemoryToolStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ToolStorage for MemoryToolStorage {
    async fn list(&self) -> StorageResult<Vec<Tool>> {
        Ok(self.tools.read().await.values().cloned().collect())
    }

    async fn latest(&self, limit: usize) -> StorageResult<Vec<Tool>> {
        let mut tools: Vec<Tool> = self.tools.read().await.values().cloned().collect();
        tools.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        tools.truncate(limit);
        Ok(tools)
    }

    async fn create(&self, input: NewTool) -> StorageResult<Tool> {
        input.validate()?;
        let tool = Tool::from_new(ToolId::generate(), input, timestamp_now());
        self.tools.write().await.insert(tool.id, tool.clone());
        Ok(tool)
    }

    async fn get(&self, id: &ToolId) -> StorageResult<Option<Tool>> {
        Ok(self.tools.read().await.get(id).cloned())
    }

    async fn update(&self, id: &ToolId, patch: ToolPatch) -> StorageResult<Option<Tool>> {
        let mut tools = self.tools.write().await;
        let Some(tool) = tools.get_mut(id) else {
            return Ok(None);
        };
        patch.validate()?;
        patch.apply_to(tool);
        tool.updated_at = next_update_timestamp(tool.updated_at);
        Ok(Some(tool.clone()))
    }

    async fn delete(&self, id: &ToolId) -> StorageResult<bool> {
        Ok(self.tools.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::persistence::StorageError;

    fn new_tool(title: &str) -> NewTool {
        NewTool {
            title: title.to_string(),
            description: "d".to_string(),
            category: "Other".to_string(),
            price: 9.99,
            tags: vec!["a".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let storage = MemoryToolStorage::new();
        let created = storage.create(new_tool("X")).await.unwrap();

        let fetched = storage.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[tokio::test]
    async fn test_create_rejects_schema_violation() {
        let storage = MemoryToolStorage::new();
        let mut input = new_tool("X");
        input.price = -3.0;

        let result = storage.create(input).await;
        assert!(matches!(result, Err(StorageError::Validation(_))));
        assert!(storage.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let storage = MemoryToolStorage::new();
        for title in ["one", "two", "three"] {
            storage.create(new_tool(title)).await.unwrap();
        }

        let titles: Vec<_> = storage
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_latest_window_drops_oldest() {
        let storage = MemoryToolStorage::new();
        for i in 1..=6 {
            storage.create(new_tool(&format!("tool-{i}"))).await.unwrap();
        }
        let window = storage.latest(6).await.unwrap();
        assert_eq!(window.len(), 6);
        assert_eq!(window[0].title, "tool-6");
        assert_eq!(window[5].title, "tool-1");

        storage.create(new_tool("tool-7")).await.unwrap();
        let window = storage.latest(6).await.unwrap();
        assert_eq!(window.len(), 6);
        assert_eq!(window[0].title, "tool-7");
        assert!(window.iter().all(|t| t.title != "tool-1"));
        assert!(window.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let storage = MemoryToolStorage::new();
        let result = storage
            .update(&ToolId::generate(), ToolPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_wins_over_schema_violation() {
        let storage = MemoryToolStorage::new();
        let patch = ToolPatch {
            price: Some(-1.0),
            ..Default::default()
        };
        assert!(storage.update(&ToolId::generate(), patch.clone()).await.unwrap().is_none());

        let created = storage.create(new_tool("X")).await.unwrap();
        let result = storage.update(&created.id, patch).await;
        assert!(matches!(result, Err(StorageError::Validation(_))));
        assert_eq!(storage.get(&created.id).await.unwrap().unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_advances_updated_at() {
        let storage = MemoryToolStorage::new();
        let created = storage.create(new_tool("X")).await.unwrap();

        let updated = storage
            .update(
                &created.id,
                ToolPatch {
                    price: Some(19.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.price, 19.0);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let storage = MemoryToolStorage::new();
        let created = storage.create(new_tool("X")).await.unwrap();

        assert!(storage.delete(&created.id).await.unwrap());
        assert!(!storage.delete(&created.id).await.unwrap());
        assert!(storage.get(&created.id).await.unwrap().is_none());
    }
}

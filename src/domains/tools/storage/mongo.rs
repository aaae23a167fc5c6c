//! MongoDB Tool storage.
//!
//! Records live in the `tools` collection. Every operation acquires the shared
//! database handle first, which may wait on the initial connection attempt.

use async_trait::async_trait;
use bson::{Bson, Document, doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Collection, options::ReturnDocument};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ToolStorage;
use crate::core::config::MongoConfig;
use crate::core::persistence::{ConnectionManager, MongoConnector, StorageResult};
use crate::domains::tools::model::{NewTool, Tool, ToolId, ToolPatch, timestamp_now};

/// Collection holding Tool documents.
pub const COLLECTION: &str = "tools";

/// Stored form of a Tool.
///
/// Fields other than `_id`, `title` and the timestamps fall back to defaults so
/// sparse documents written by older clients still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl From<Tool> for ToolDocument {
    fn from(tool: Tool) -> Self {
        Self {
            id: tool.id.object_id(),
            title: tool.title,
            description: tool.description,
            category: tool.category,
            price: tool.price,
            image: tool.image,
            rating: tool.rating,
            tags: tool.tags,
            features: tool.features,
            created_at: bson::DateTime::from_chrono(tool.created_at),
            updated_at: bson::DateTime::from_chrono(tool.updated_at),
        }
    }
}

impl From<ToolDocument> for Tool {
    fn from(document: ToolDocument) -> Self {
        Self {
            id: ToolId::from(document.id),
            title: document.title,
            description: document.description,
            category: document.category,
            price: document.price,
            image: document.image,
            rating: document.rating,
            tags: document.tags,
            features: document.features,
            created_at: document.created_at.to_chrono(),
            updated_at: document.updated_at.to_chrono(),
        }
    }
}

/// Update pipeline for a patch.
///
/// Submitted values are wrapped in `$literal` so strings starting with `$` are
/// stored as written. Keys sent as `null` are unset. `updatedAt` becomes `now`,
/// or 1 ms past the stored value when the clock has not moved past it.
pub fn update_pipeline(patch: &ToolPatch, now: bson::DateTime) -> StorageResult<Vec<Document>> {
    let mut set = Document::new();
    let mut unset = Vec::new();
    for (field, value) in bson::to_document(patch)? {
        if value == Bson::Null {
            unset.push(field);
        } else {
            set.insert(field, doc! { "$literal": value });
        }
    }
    set.insert(
        "updatedAt",
        doc! { "$max": [now, { "$add": ["$updatedAt", 1] }] },
    );

    let mut pipeline = vec![doc! { "$set": set }];
    if !unset.is_empty() {
        pipeline.push(doc! { "$unset": unset });
    }
    Ok(pipeline)
}

/// Tool storage backed by a MongoDB collection.
pub struct MongoToolStorage {
    connections: ConnectionManager<MongoConnector>,
}

impl MongoToolStorage {
    /// Create the storage. The database is not contacted until first use.
    pub fn new(config: MongoConfig) -> Self {
        Self {
            connections: ConnectionManager::new(MongoConnector::new(config)),
        }
    }

    async fn collection(&self) -> StorageResult<Collection<ToolDocument>> {
        let database = self.connections.acquire().await?;
        Ok(database.collection(COLLECTION))
    }
}

#[async_trait]
impl ToolStorage for MongoToolStorage {
    async fn list(&self) -> StorageResult<Vec<Tool>> {
        let cursor = self.collection().await?.find(doc! {}).await?;
        let documents: Vec<ToolDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Tool::from).collect())
    }

    async fn latest(&self, limit: usize) -> StorageResult<Vec<Tool>> {
        let cursor = self
            .collection()
            .await?
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?;
        let documents: Vec<ToolDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Tool::from).collect())
    }

    async fn create(&self, input: NewTool) -> StorageResult<Tool> {
        input.validate()?;
        let tool = Tool::from_new(ToolId::generate(), input, timestamp_now());
        self.collection()
            .await?
            .insert_one(ToolDocument::from(tool.clone()))
            .await?;
        debug!("Inserted tool {}", tool.id);
        Ok(tool)
    }

    async fn get(&self, id: &ToolId) -> StorageResult<Option<Tool>> {
        let document = self
            .collection()
            .await?
            .find_one(doc! { "_id": id.object_id() })
            .await?;
        Ok(document.map(Tool::from))
    }

    async fn update(&self, id: &ToolId, patch: ToolPatch) -> StorageResult<Option<Tool>> {
        if let Err(e) = patch.validate() {
            // A missing record reports as not found, whatever the patch holds.
            return match self.get(id).await? {
                Some(_) => Err(e),
                None => Ok(None),
            };
        }
        let pipeline = update_pipeline(&patch, bson::DateTime::from_chrono(timestamp_now()))?;

        let document = self
            .collection()
            .await?
            .find_one_and_update(doc! { "_id": id.object_id() }, pipeline)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(document.map(Tool::from))
    }

    async fn delete(&self, id: &ToolId) -> StorageResult<bool> {
        let result = self
            .collection()
            .await?
            .delete_one(doc! { "_id": id.object_id() })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

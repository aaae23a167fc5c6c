//! MongoDB connector.

use async_trait::async_trait;
use bson::doc;
use mongodb::{Client, Database};
use tracing::debug;

use super::connection::Connector;
use super::error::{StorageError, StorageResult};
use crate::core::config::MongoConfig;

/// Opens a MongoDB client and verifies the server answers a `ping`.
pub struct MongoConnector {
    config: MongoConfig,
}

impl MongoConnector {
    /// Create a connector for the given settings.
    pub fn new(config: MongoConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Handle = Database;

    async fn connect(&self) -> StorageResult<Database> {
        let client = Client::with_uri_str(&self.config.uri)
            .await
            .map_err(|e| StorageError::connection(e.to_string()))?;

        let database = client.database(&self.config.database);

        // The driver connects lazily; force a round trip so failures surface here.
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StorageError::connection(e.to_string()))?;

        debug!("MongoDB ping succeeded for database '{}'", self.config.database);
        Ok(database)
    }

    fn target(&self) -> String {
        format!("MongoDB database '{}'", self.config.database)
    }
}

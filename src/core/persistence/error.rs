//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by the persistence layer.
///
/// The enum is `Clone` so a single failed connection attempt can be handed
/// to every caller that was waiting on it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    /// Establishing the connection to the document store failed.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The record was rejected by the storage schema.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend failed while executing an operation.
    #[error("Backend error: {0}")]
    Backend(String),

    /// A document could not be converted to or from its stored form.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StorageError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a schema validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for StorageError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<bson::ser::Error> for StorageError {
    fn from(err: bson::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<bson::de::Error> for StorageError {
    fn from(err: bson::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

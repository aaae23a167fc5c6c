//! Tool-specific error types.

use thiserror::Error;

use crate::core::persistence::StorageError;

/// Result type for Tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur while serving Tool requests.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The path identifier is not a well-formed storage key.
    #[error("Invalid Tool ID")]
    InvalidId(String),

    /// No Tool exists for the identifier.
    #[error("Tool not found")]
    NotFound(String),

    /// The request body could not be read as a Tool payload.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The storage layer failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ToolError {
    /// Create a new "invalid id" error.
    pub fn invalid_id(raw: impl Into<String>) -> Self {
        Self::InvalidId(raw.into())
    }

    /// Create a new "not found" error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a new "invalid body" error.
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }
}

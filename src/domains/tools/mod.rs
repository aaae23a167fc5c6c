//! Tools domain module.
//!
//! This module handles the Tool resource: the marketplace listing record, its
//! storage backends, and the CRUD endpoints over it.
//!
//! ## Architecture
//!
//! - `model.rs` - Tool record, create/update payloads, identifier
//! - `storage/` - `ToolStorage` trait with memory and MongoDB backends
//! - `service.rs` - identifier validation and not-found mapping
//! - `handlers.rs` - axum handlers, error to status mapping
//! - `router.rs` - resource routes
//! - `error.rs` - Tool-specific error types

mod error;
mod handlers;
pub mod model;
pub mod router;
mod service;
pub mod storage;

pub use error::{ToolError, ToolResult};
pub use model::{CATEGORIES, NewTool, Tool, ToolId, ToolPatch};
pub use router::build_tool_router;
pub use service::{LATEST_LIMIT, ToolService};
pub use storage::{MemoryToolStorage, ToolStorage, create_storage};

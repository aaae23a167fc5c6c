//! Tool Router - the resource endpoints for the Tool collection.

use axum::{Router, routing::get};

use super::handlers::{create_tool, delete_tool, get_tool, latest_tools, list_tools, update_tool};
use crate::core::ByteToolsServer;

/// Build the Tool resource routes, relative to the API prefix.
pub fn build_tool_router() -> Router<ByteToolsServer> {
    Router::new()
        .route("/tools", get(list_tools).post(create_tool))
        .route("/tools/latest", get(latest_tools))
        .route(
            "/tools/{id}",
            get(get_tool).patch(update_tool).delete(delete_tool),
        )
}

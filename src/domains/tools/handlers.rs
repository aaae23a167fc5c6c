//! HTTP handlers for the Tool resource.
//!
//! Each handler performs one service call and serializes its result. Errors
//! become `{ "error": ... }` bodies with the status from `ToolError`.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, instrument};

use super::error::ToolError;
use super::model::{NewTool, Tool, ToolPatch};
use crate::core::ByteToolsServer;

/// Body returned to clients when storage fails.
const STORAGE_FAILURE: &str = "Something went wrong, please try again";

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        let status = match &self {
            ToolError::InvalidId(_) | ToolError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ToolError::NotFound(_) => StatusCode::NOT_FOUND,
            ToolError::Storage(e) => {
                error!("Storage failure: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match self {
            ToolError::Storage(_) => STORAGE_FAILURE.to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for ToolError {
    fn from(rejection: JsonRejection) -> Self {
        ToolError::invalid_body(rejection.body_text())
    }
}

/// `GET /tools`
#[instrument(skip_all)]
pub async fn list_tools(State(server): State<ByteToolsServer>) -> Result<Json<Vec<Tool>>, ToolError> {
    Ok(Json(server.tools().list().await?))
}

/// `GET /tools/latest`
#[instrument(skip_all)]
pub async fn latest_tools(
    State(server): State<ByteToolsServer>,
) -> Result<Json<Vec<Tool>>, ToolError> {
    Ok(Json(server.tools().latest().await?))
}

/// `POST /tools`
#[instrument(skip_all)]
pub async fn create_tool(
    State(server): State<ByteToolsServer>,
    payload: Result<Json<NewTool>, JsonRejection>,
) -> Result<(StatusCode, Json<Tool>), ToolError> {
    let Json(input) = payload?;
    let tool = server.tools().create(input).await?;
    Ok((StatusCode::CREATED, Json(tool)))
}

/// `GET /tools/{id}`
#[instrument(skip(server))]
pub async fn get_tool(
    State(server): State<ByteToolsServer>,
    Path(id): Path<String>,
) -> Result<Json<Tool>, ToolError> {
    Ok(Json(server.tools().get(&id).await?))
}

/// `PATCH /tools/{id}`
#[instrument(skip(server, payload))]
pub async fn update_tool(
    State(server): State<ByteToolsServer>,
    Path(id): Path<String>,
    payload: Result<Json<ToolPatch>, JsonRejection>,
) -> Result<Json<Tool>, ToolError> {
    let Json(patch) = payload?;
    Ok(Json(server.tools().update(&id, patch).await?))
}

/// `DELETE /tools/{id}`
#[instrument(skip(server))]
pub async fn delete_tool(
    State(server): State<ByteToolsServer>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ToolError> {
    server.tools().delete(&id).await?;
    Ok(Json(json!({ "message": "Deleted" })))
}

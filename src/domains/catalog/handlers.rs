//! HTTP handlers for the catalog views.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tracing::{info, instrument};

use super::filter::{DiscoverQuery, ManageQuery, categories, discover, manage_rows};
use super::form::{AddToolForm, FormError};
use crate::core::ByteToolsServer;
use crate::core::security::GateDecision;
use crate::domains::tools::ToolError;

/// Location of the management view, used as the login callback.
pub const MANAGE_PATH: &str = "/manage-tools";

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": self.to_string(),
                "fields": self.fields(),
            })),
        )
            .into_response()
    }
}

/// `GET /discover?search=&category=`
#[instrument(skip(server))]
pub async fn discover_tools(
    State(server): State<ByteToolsServer>,
    Query(query): Query<DiscoverQuery>,
) -> Result<Json<serde_json::Value>, ToolError> {
    let tools = server.tools().list().await?;
    let matching = discover(&tools, &query);

    Ok(Json(json!({
        "total": tools.len(),
        "count": matching.len(),
        "categories": categories(&tools),
        "tools": matching,
    })))
}

/// `GET /manage-tools?search=`, gated.
#[instrument(skip(server, headers))]
pub async fn manage_tools(
    State(server): State<ByteToolsServer>,
    headers: HeaderMap,
    Query(query): Query<ManageQuery>,
) -> Result<Response, ToolError> {
    let session = match server.gate(&headers, MANAGE_PATH).await {
        GateDecision::Render(session) => session,
        GateDecision::Redirect(location) => return Ok(Redirect::to(&location).into_response()),
    };

    let tools = server.tools().list().await?;
    let rows = manage_rows(&tools, &query.search);
    info!("Management view for '{}': {} rows", session.user, rows.len());

    Ok(Json(json!({
        "user": session.user,
        "count": rows.len(),
        "tools": rows,
    }))
    .into_response())
}

/// `POST /add-tools`
#[instrument(skip_all)]
pub async fn add_tool(
    State(server): State<ByteToolsServer>,
    payload: Result<Json<AddToolForm>, JsonRejection>,
) -> Result<Response, ToolError> {
    let Json(form) = payload?;
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => return Ok(e.into_response()),
    };

    let tool = server.tools().create(input).await?;
    let location = format!("/tools/{}", tool.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(tool),
    )
        .into_response())
}

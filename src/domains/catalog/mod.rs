//! Catalog views.
//!
//! Browsing and management screens built on top of the Tool resource: the
//! public discover view, the session-gated management table and the add-tool
//! form submission.

pub mod filter;
pub mod form;
mod handlers;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ByteToolsServer;

pub use filter::{ALL_CATEGORIES, DiscoverQuery, ManageQuery, ManageRow};
pub use form::{AddToolForm, FieldError, FormError};
pub use handlers::MANAGE_PATH;

/// Build the catalog view routes. These are mounted at the root, not under the
/// API prefix.
pub fn build_catalog_router() -> Router<ByteToolsServer> {
    Router::new()
        .route("/discover", get(handlers::discover_tools))
        .route(MANAGE_PATH, get(handlers::manage_tools))
        .route("/add-tools", post(handlers::add_tool))
}

//! HTTP transport implementation.
//!
//! Serves the Tool resource under the configured API prefix and the catalog
//! views at the root, next to `/health` and an info document at `/`.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::{HttpConfig, TransportError, TransportResult};
use crate::core::ByteToolsServer;
use crate::domains::catalog::{MANAGE_PATH, build_catalog_router};
use crate::domains::tools::build_tool_router;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport until the process receives Ctrl-C.
    pub async fn run(self, server: ByteToolsServer) -> TransportResult<()> {
        let addr = self.address();
        let app = build_router(server, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Tools:    {}/tools", self.config.api_prefix);
        info!("  → Views:    /discover, {}, /add-tools", MANAGE_PATH);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Assemble the full application router.
pub fn build_router(server: ByteToolsServer, config: &HttpConfig) -> Router {
    let resources = build_tool_router();
    let mut app = if config.api_prefix.is_empty() {
        Router::new().merge(resources)
    } else {
        Router::new().nest(&config.api_prefix, resources)
    };

    app = app
        .merge(build_catalog_router())
        .route("/health", get(health_check))
        .route("/", get(root_handler));

    let mut app = app.with_state(server).layer(TraceLayer::new_for_http());

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Root handler - provides API info.
async fn root_handler(State(server): State<ByteToolsServer>) -> impl IntoResponse {
    let prefix = &server.config().http.api_prefix;
    Json(serde_json::json!({
        "name": server.name(),
        "version": server.version(),
        "endpoints": {
            "tools": format!("{prefix}/tools"),
            "latest": format!("{prefix}/tools/latest"),
            "tool": format!("{prefix}/tools/{{id}}"),
            "discover": "/discover",
            "manage": MANAGE_PATH,
            "add": "/add-tools",
            "health": "/health"
        }
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::core::security::NoSessions;
    use crate::domains::tools::MemoryToolStorage;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(http: HttpConfig) -> Router {
        let mut config = Config::in_memory();
        config.http = http.clone();
        let server = ByteToolsServer::new(
            config,
            Arc::new(MemoryToolStorage::new()),
            Arc::new(NoSessions),
        );
        build_router(server, &http)
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health_and_info() {
        let app = app(HttpConfig::default());

        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = get_json(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["tools"], "/api/tools");
        assert_eq!(body["endpoints"]["tool"], "/api/tools/{id}");
    }

    #[tokio::test]
    async fn test_resources_mounted_under_prefix() {
        let app = app(HttpConfig::default());

        let (status, body) = get_json(&app, "/api/tools").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));

        let (status, _) = get_json(&app, "/tools").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_json(&app, "/discover").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_prefix_mounts_at_root() {
        let http = HttpConfig {
            api_prefix: String::new(),
            ..Default::default()
        };
        let app = app(http);

        let (status, _) = get_json(&app, "/tools/latest").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let app = app(HttpConfig::default());
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/tools")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}

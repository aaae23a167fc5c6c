//! Byte Tools server state.
//!
//! `ByteToolsServer` is the shared application state handed to every HTTP
//! handler: configuration, the Tool service, and the session provider used by
//! gated views. Cloning it is cheap.

use std::sync::Arc;

use http::HeaderMap;
use tracing::info;

use super::config::Config;
use super::error::{Error, Result};
use super::security::{GateDecision, SessionProvider, TrustedHeaderSessions, gate};
use crate::domains::tools::{ToolService, ToolStorage, create_storage};

/// The main server handle.
#[derive(Clone)]
pub struct ByteToolsServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service for Tool CRUD requests.
    tools: ToolService,

    /// Session source for gated views.
    sessions: Arc<dyn SessionProvider>,
}

impl ByteToolsServer {
    /// Create a server over an explicit backend and session provider.
    pub fn new(
        config: Config,
        storage: Arc<dyn ToolStorage>,
        sessions: Arc<dyn SessionProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            tools: ToolService::new(storage),
            sessions,
        }
    }

    /// Create a server with the storage backend and session provider named in
    /// the configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let storage = create_storage(&config.storage)?;
        let sessions = TrustedHeaderSessions::new(&config.auth.session_header).map_err(|e| {
            Error::config(format!(
                "invalid session header '{}': {}",
                config.auth.session_header, e
            ))
        })?;
        info!(
            "Session gate trusts the '{}' header",
            config.auth.session_header
        );
        Ok(Self::new(config, storage, Arc::new(sessions)))
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the Tool service.
    pub fn tools(&self) -> &ToolService {
        &self.tools
    }

    /// Check the session gate for the view at `target`.
    pub async fn gate(&self, headers: &HeaderMap, target: &str) -> GateDecision {
        gate(
            self.sessions.as_ref(),
            headers,
            &self.config.auth.login_path,
            target,
        )
        .await
    }
}

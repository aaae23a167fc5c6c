//! HTTP listener configuration.

use serde::{Deserialize, Serialize};

/// HTTP transport configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Prefix the Tool resource routes are mounted under.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: default_host(),
            api_prefix: default_api_prefix(),
            enable_cors: default_cors(),
        }
    }
}

impl HttpConfig {
    /// Load the listener config from environment variables.
    pub fn from_env() -> Self {
        let port = std::env::var("BYTE_TOOLS_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let host = std::env::var("BYTE_TOOLS_HTTP_HOST").unwrap_or_else(|_| default_host());
        let api_prefix =
            std::env::var("BYTE_TOOLS_API_PREFIX").unwrap_or_else(|_| default_api_prefix());
        let enable_cors = std::env::var("BYTE_TOOLS_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        Self {
            port,
            host,
            api_prefix: normalize_prefix(&api_prefix),
            enable_cors,
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get a description of this listener for logging.
    pub fn description(&self) -> String {
        let prefix = if self.api_prefix.is_empty() {
            "/"
        } else {
            &self.api_prefix
        };
        format!("HTTP on {} (resources under {})", self.address(), prefix)
    }
}

/// Leading slash, no trailing slash, empty for the root.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.api_prefix, "/api");
        assert!(config.enable_cors);
    }

    #[test]
    fn test_prefix_normalization() {
        assert_eq!(normalize_prefix("api"), "/api");
        assert_eq!(normalize_prefix("/api/"), "/api");
        assert_eq!(normalize_prefix("/v1/api"), "/v1/api");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix(""), "");
    }
}

//! Configuration management for the Byte Tools server.
//!
//! This module provides a centralized configuration structure that is
//! populated from environment variables (optionally via a `.env` file) on top
//! of built-in defaults.

use super::error::{Error, Result};
use super::transport::HttpConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default MongoDB database name.
pub const DEFAULT_DATABASE: &str = "byteToolsDb";

/// Main configuration structure for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// HTTP listener configuration.
    pub http: HttpConfig,

    /// Storage backend selection and connection settings.
    pub storage: StorageConfig,

    /// Session gate configuration.
    pub auth: AuthConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Which storage backend holds the Tool collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map. Data is lost on restart.
    Memory,
    /// MongoDB document store.
    Mongodb,
}

impl Default for StorageBackend {
    fn default() -> Self {
        if cfg!(feature = "mongodb") {
            Self::Mongodb
        } else {
            Self::Memory
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "mongodb" | "mongo" => Ok(Self::Mongodb),
            other => Err(Error::config(format!("unknown storage backend: {other}"))),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Selected backend.
    pub backend: StorageBackend,

    /// MongoDB settings, present when the MongoDB backend is selected.
    pub mongodb: Option<MongoConfig>,
}

/// MongoDB connection settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// Connection string, may embed credentials.
    pub uri: String,

    /// Database holding the `tools` collection.
    pub database: String,
}

/// Custom Debug implementation to redact the connection string from logs.
impl std::fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConfig")
            .field("uri", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

/// Configuration for the session gate in front of the management views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Header carrying the user name authenticated by the upstream identity proxy.
    pub session_header: String,

    /// Login view that gated views redirect to.
    pub login_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_header: "x-forwarded-user".to_string(),
            login_path: "/login".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "byte-tools".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            http: HttpConfig::default(),
            storage: StorageConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Config {
    /// Configuration backed by the in-memory store, for tests and local runs.
    pub fn in_memory() -> Self {
        let mut config = Self::default();
        config.storage = StorageConfig {
            backend: StorageBackend::Memory,
            mongodb: None,
        };
        config
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `BYTE_TOOLS_` prefix. The document store
    /// connection string is read from `MONGODB_URI`; when the MongoDB backend
    /// is selected a missing connection string is a fatal configuration error.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("BYTE_TOOLS_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("BYTE_TOOLS_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("BYTE_TOOLS_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps.to_lowercase() != "false" && timestamps != "0";
        }

        config.http = HttpConfig::from_env();

        if let Ok(backend) = std::env::var("BYTE_TOOLS_STORAGE") {
            config.storage.backend = backend.parse()?;
        }

        if config.storage.backend == StorageBackend::Mongodb {
            let uri = std::env::var("MONGODB_URI")
                .ok()
                .filter(|uri| !uri.trim().is_empty())
                .ok_or_else(|| Error::config("Missing MONGODB_URI"))?;
            let database = std::env::var("BYTE_TOOLS_MONGODB_DB")
                .unwrap_or_else(|_| DEFAULT_DATABASE.to_string());
            config.storage.mongodb = Some(MongoConfig { uri, database });
        } else {
            warn!("Using the in-memory Tool store - records are lost on restart");
        }

        if let Ok(header) = std::env::var("BYTE_TOOLS_SESSION_HEADER") {
            config.auth.session_header = header.to_lowercase();
        }

        if let Ok(login_path) = std::env::var("BYTE_TOOLS_LOGIN_PATH") {
            config.auth.login_path = login_path;
        }

        info!(
            "Configuration loaded: storage={:?}, http={}:{}",
            config.storage.backend, config.http.host, config.http.port
        );

        Ok(config)
    }
}

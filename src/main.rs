//! Byte Tools Server Entry Point
//!
//! Loads configuration, initializes logging, builds the server state and
//! serves it over HTTP.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use byte_tools_server::core::{ByteToolsServer, Config, HttpTransport};

#[tokio::main]
async fn main() -> Result<()> {
    // Missing settings such as MONGODB_URI are fatal at startup
    let config = Config::from_env()?;

    init_logging(&config.logging.level, config.logging.with_timestamps);

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Storage backend: {:?}", config.storage.backend);

    serve(config).await?;

    info!("Server shutting down");

    Ok(())
}

/// Build the server state and serve it until shutdown.
async fn serve(config: Config) -> byte_tools_server::Result<()> {
    let server = ByteToolsServer::from_config(config.clone())?;

    info!("Server initialized");

    let transport = HttpTransport::new(config.http);
    transport.run(server).await?;

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(level: &str, with_timestamps: bool) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}

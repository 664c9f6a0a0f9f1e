//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the contacts REST API on its own, reading configuration from the process environment.
//!
//! ## Intended use
//! Useful for development and debugging. The workspace's main `contacts-run` binary additionally
//! loads a `.env` file before starting the same server.

use api_rest::ServerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the contacts REST API server
///
/// See [`ServerConfig::from_env`] for the environment variables read at startup.
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration cannot be parsed, or
/// - the server fails to start or while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ServerConfig::from_env()?;
    tracing::info!("-- Starting contacts REST API on {}", cfg.addr);

    api_rest::serve(cfg).await
}

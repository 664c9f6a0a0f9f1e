use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::ServerConfig;
use contacts_core::DatabaseLocation;

/// Main entry point for the contacts service
///
/// Loads a `.env` file if present, then serves the REST API.
///
/// # Environment Variables
/// - `CONTACTS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CONTACTS_DATABASE_PATH`: SQLite database file, or `:memory:` (default: "contacts.db")
/// - `CONTACTS_API_TOKENS`: Comma-separated `token=owner_id` pairs accepted as bearer tokens
/// - `CONTACTS_LIST_LIMIT`: Default page size for contact lists (default: 100)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("contacts_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("contacts_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ServerConfig::from_env()?;

    match cfg.core.database() {
        DatabaseLocation::InMemory => {
            tracing::warn!("++ Using an in-memory database; contacts are lost on shutdown")
        }
        DatabaseLocation::File(path) => {
            tracing::info!("++ Using contacts database {}", path.display())
        }
    }
    tracing::info!("++ Starting contacts REST on {}", cfg.addr);

    api_rest::serve(cfg).await
}

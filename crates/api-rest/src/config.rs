//! Server configuration, resolved from the environment once at startup.

use api_shared::TokenRegistry;
use contacts_core::config::list_limit_from_env_value;
use contacts_core::{CoreConfig, DatabaseLocation, ListDefaults};
use std::sync::Arc;

/// Default listen address when `CONTACTS_REST_ADDR` is unset.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: String,
    pub core: Arc<CoreConfig>,
    pub tokens: TokenRegistry,
}

impl ServerConfig {
    /// Reads the server configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `CONTACTS_REST_ADDR`: Server address (default: "0.0.0.0:3000")
    /// - `CONTACTS_DATABASE_PATH`: SQLite file, or `:memory:` (default: "contacts.db")
    /// - `CONTACTS_LIST_LIMIT`: Default page size for contact lists (default: 100)
    /// - `CONTACTS_API_TOKENS`: Comma-separated `token=owner_id` pairs
    ///
    /// # Errors
    /// Returns an error if the list limit or token table cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        let addr = std::env::var("CONTACTS_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
        let database = DatabaseLocation::from_env_value(std::env::var("CONTACTS_DATABASE_PATH").ok());
        let limit = list_limit_from_env_value(std::env::var("CONTACTS_LIST_LIMIT").ok())?;
        let tokens = TokenRegistry::from_env_value(std::env::var("CONTACTS_API_TOKENS").ok())?;

        let core = CoreConfig::new(
            database,
            ListDefaults {
                limit,
                ..ListDefaults::default()
            },
        )?;

        Ok(Self {
            addr,
            core: Arc::new(core),
            tokens,
        })
    }
}

//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Request
//! handling never reads process-wide environment variables.

use crate::constants::{
    DEFAULT_DATABASE_PATH, DEFAULT_LIST_LIMIT, DEFAULT_LIST_OFFSET, IN_MEMORY_DATABASE,
};
use crate::store::Page;
use crate::{ContactError, ContactResult};
use std::path::PathBuf;

/// Where the contacts database lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// A SQLite database file, created on first open.
    File(PathBuf),
    /// A private in-memory database that disappears with the process.
    InMemory,
}

impl DatabaseLocation {
    /// Parse a database location from an optional string value.
    ///
    /// `None` or an empty/whitespace value selects [`DEFAULT_DATABASE_PATH`]; the literal
    /// `:memory:` selects an in-memory database.
    pub fn from_env_value(value: Option<String>) -> Self {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        match value.as_deref() {
            Some(IN_MEMORY_DATABASE) => Self::InMemory,
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::File(PathBuf::from(DEFAULT_DATABASE_PATH)),
        }
    }
}

/// Pagination applied when a list request leaves `skip` or `limit` out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListDefaults {
    /// Defaults to 0.
    pub offset: u32,
    /// Defaults to 100.
    pub limit: u32,
}

impl Default for ListDefaults {
    fn default() -> Self {
        Self {
            offset: DEFAULT_LIST_OFFSET,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ListDefaults {
    /// Fill in whichever of `offset` and `limit` the caller left out.
    pub fn page(&self, offset: Option<u32>, limit: Option<u32>) -> Page {
        Page {
            offset: offset.unwrap_or(self.offset),
            limit: limit.unwrap_or(self.limit),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database: DatabaseLocation,
    list_defaults: ListDefaults,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(database: DatabaseLocation, list_defaults: ListDefaults) -> ContactResult<Self> {
        if let DatabaseLocation::File(path) = &database {
            if path.as_os_str().is_empty() {
                return Err(ContactError::InvalidInput(
                    "database path cannot be empty".into(),
                ));
            }
        }

        Ok(Self {
            database,
            list_defaults,
        })
    }

    pub fn database(&self) -> &DatabaseLocation {
        &self.database
    }

    pub fn list_defaults(&self) -> ListDefaults {
        self.list_defaults
    }
}

/// Parse the default list limit from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_LIST_LIMIT`].
pub fn list_limit_from_env_value(value: Option<String>) -> ContactResult<u32> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value
        .map(|v| {
            v.parse::<u32>()
                .map_err(|_| ContactError::InvalidInput(format!("invalid list limit: {v}")))
        })
        .transpose()?;

    Ok(parsed.unwrap_or(DEFAULT_LIST_LIMIT))
}

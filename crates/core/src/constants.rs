//! Constants used throughout the contacts core crate.

/// Default SQLite database file when no explicit location is configured.
pub const DEFAULT_DATABASE_PATH: &str = "contacts.db";

/// Database location value that selects a private in-memory database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Number of contacts skipped by a list request that does not say otherwise.
pub const DEFAULT_LIST_OFFSET: u32 = 0;

/// Maximum number of contacts returned by a list request that does not say otherwise.
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// Length of the upcoming-birthdays window in days, today included.
pub const BIRTHDAY_WINDOW_DAYS: u32 = 8;

/// How long a connection waits on a locked database before giving up.
pub const BUSY_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to open contacts database: {0}")]
    Open(rusqlite::Error),
    #[error("failed to apply schema migrations: {0}")]
    Migration(rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    #[error("contact query failed: {0}")]
    Query(#[from] rusqlite::Error),
    #[error("invalid stored data: {0}")]
    InvalidData(String),
    #[error("contact store lock was poisoned")]
    LockPoisoned,
}

pub type ContactResult<T> = std::result::Result<T, ContactError>;

//! Schema migration registry.
//!
//! Applied versions are mirrored to `PRAGMA user_version`. Versions must stay strictly
//! increasing; a database newer than this binary is refused rather than guessed at.

use crate::{ContactError, ContactResult};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_contacts.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations in one transaction.
pub fn apply_migrations(conn: &mut Connection) -> ContactResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(ContactError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        tracing::debug!(version = current_version, "contacts schema up to date");
        return Ok(());
    }

    let tx = conn.transaction().map_err(ContactError::Migration)?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)
            .map_err(ContactError::Migration)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))
            .map_err(ContactError::Migration)?;
        tracing::info!(version = migration.version, "applied contacts schema migration");
    }
    tx.commit().map_err(ContactError::Migration)?;

    Ok(())
}

pub(crate) fn current_user_version(conn: &Connection) -> ContactResult<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .map_err(ContactError::Migration)
}

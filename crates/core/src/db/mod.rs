//! SQLite connection bootstrap.
//!
//! Every connection handed out by this module has had its pragmas set and all pending
//! migrations applied. Nothing reads or writes contacts before that.

pub mod migrations;

use crate::config::DatabaseLocation;
use crate::constants::BUSY_TIMEOUT_SECS;
use crate::{ContactError, ContactResult};
use rusqlite::Connection;
use std::time::{Duration, Instant};

/// Opens the configured database and brings its schema up to date.
pub fn open_connection(location: &DatabaseLocation) -> ContactResult<Connection> {
    let started_at = Instant::now();
    let mode = match location {
        DatabaseLocation::File(_) => "file",
        DatabaseLocation::InMemory => "memory",
    };

    let opened = match location {
        DatabaseLocation::File(path) => Connection::open(path),
        DatabaseLocation::InMemory => Connection::open_in_memory(),
    };
    let mut conn = opened.map_err(|e| {
        tracing::error!(mode, error = %e, "failed to open contacts database");
        ContactError::Open(e)
    })?;

    if let Err(e) = bootstrap_connection(&mut conn) {
        tracing::error!(mode, error = %e, "failed to bootstrap contacts database");
        return Err(e);
    }

    tracing::info!(
        mode,
        duration_ms = started_at.elapsed().as_millis() as u64,
        "contacts database ready"
    );
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection) -> ContactResult<()> {
    conn.busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS))
        .map_err(ContactError::Open)?;
    migrations::apply_migrations(conn)
}

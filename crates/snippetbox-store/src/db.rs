//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// How long a statement waits on a locked database before failing
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(|e| from_rusqlite("db_open", e))
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(|e| from_rusqlite("db_open", e))
}

/// Configure a connection with the settings the store relies on
pub fn configure(conn: &Connection) -> Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(|e| from_rusqlite("db_configure", e))?;

    // journal_mode reports the resulting mode as a row, so run as a batch
    conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL;")
        .map_err(|e| from_rusqlite("db_configure", e))?;

    Ok(())
}

/// Round-trip a trivial query to verify the connection is usable
pub fn ping(conn: &Connection) -> Result<()> {
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
        .map_err(|e| from_rusqlite("db_ping", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_configure_ping_in_memory() {
        let conn = open_in_memory().unwrap();
        configure(&conn).unwrap();
        ping(&conn).unwrap();
    }

    #[test]
    fn test_open_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open(dir.path().join("snippetbox.db")).unwrap();
        configure(&conn).unwrap();

        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }
}

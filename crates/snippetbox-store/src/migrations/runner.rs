//! Migration runner
//!
//! Applies migrations with checksums and idempotency

#![allow(clippy::result_large_err)]

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::get_migrations;
use rusqlite::{Connection, OptionalExtension};

/// Apply all pending migrations to the database
///
/// Already-applied migrations are skipped, but their recorded checksum must
/// match the embedded SQL.
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    create_schema_version_table(conn)?;

    for migration in get_migrations() {
        apply_migration(conn, migration.id, migration.sql)?;
    }

    Ok(())
}

/// Create the schema_version table if it doesn't exist
fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT
        )",
        [],
    )
    .map_err(|e| from_rusqlite("migration", e))?;

    Ok(())
}

/// Apply a single migration if not already applied
fn apply_migration(conn: &mut Connection, migration_id: &str, sql: &str) -> Result<()> {
    let checksum = compute_checksum(sql);

    let recorded: Option<Option<String>> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?",
            [migration_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| from_rusqlite("migration", e))?;

    match recorded {
        Some(Some(existing)) if existing != checksum => {
            return Err(checksum_mismatch(migration_id, &existing, &checksum));
        }
        Some(_) => return Ok(()),
        None => {}
    }

    let tx = conn
        .transaction()
        .map_err(|e| from_rusqlite("migration", e))?;

    tx.execute_batch(sql)
        .map_err(|e| migration_error(migration_id, &e.to_string()))?;

    let now = chrono::Utc::now().timestamp();
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?, ?, ?)",
        rusqlite::params![migration_id, now, checksum],
    )
    .map_err(|e| from_rusqlite("migration", e))?;

    tx.commit().map_err(|e| from_rusqlite("migration", e))?;

    tracing::info!(
        component = module_path!(),
        op = "migration",
        migration_id,
        "applied migration"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_migrations() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert!(apply_migrations(&mut conn).is_ok());
    }

    #[test]
    fn test_idempotency() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        assert!(apply_migrations(&mut conn).is_ok());
    }

    #[test]
    fn test_checksum_mismatch_detected() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn.execute(
            "UPDATE schema_version SET checksum = 'tampered' WHERE migration_id = '001_create_snippets'",
            [],
        )
        .unwrap();

        let err = apply_migrations(&mut conn).unwrap_err();
        assert_eq!(err.op(), Some("migration_checksum"));
        assert!(err.message().contains("001_create_snippets"));
    }
}

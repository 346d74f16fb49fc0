//! SQLite snippet store
//!
//! One connection behind a mutex; each operation is a single statement
//! executed while holding the lock. Visibility is decided in SQL by
//! comparing `expires` with the time reported by the injected clock.

#![allow(clippy::result_large_err)]

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};
use snippetbox_core::clock::Clock;
use snippetbox_core::errors::SnippetError;
use snippetbox_core::model::{NewSnippet, Snippet, LATEST_LIMIT};
use snippetbox_core::{log_op_end, log_op_error, log_op_start};

use crate::db;
use crate::errors::{corrupt_row, from_rusqlite, lock_poisoned, Result};
use crate::migrations::apply_migrations;
use crate::repo::SnippetRepository;

const SELECT_COLUMNS: &str = "SELECT id, title, content, created, expires FROM snippets";

/// SQLite-backed SnippetRepository
#[derive(Clone)]
pub struct SqliteSnippetStore {
    conn: Arc<Mutex<Connection>>,
    clock: Arc<dyn Clock>,
}

impl SqliteSnippetStore {
    /// Wrap an already configured and migrated connection
    pub fn new(conn: Connection, clock: Arc<dyn Clock>) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            clock,
        }
    }

    /// Open, configure and migrate a database file
    pub fn open<P: AsRef<Path>>(path: P, clock: Arc<dyn Clock>) -> Result<Self> {
        let mut conn = db::open(path)?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self::new(conn, clock))
    }

    /// Open a migrated in-memory database (for testing)
    pub fn open_in_memory(clock: Arc<dyn Clock>) -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self::new(conn, clock))
    }

    /// Verify the database answers queries
    pub fn ping(&self) -> Result<()> {
        self.with_conn("db_ping", db::ping)
    }

    fn with_conn<T>(&self, op: &str, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.conn.lock().map_err(|_| lock_poisoned(op))?;
        f(&conn)
    }
}

/// Run a store operation between start and end/error events
fn instrumented<T>(op: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    log_op_start!(op);
    let started = Instant::now();
    let result = f();
    let duration_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = duration_ms);
        }
        Err(err) => {
            log_op_error!(op, err.clone(), duration_ms = duration_ms);
        }
    }
    result
}

impl SnippetRepository for SqliteSnippetStore {
    fn insert(&self, snippet: &NewSnippet) -> Result<i64> {
        const OP: &str = "snippet_insert";
        let (created, expires) = snippet.window_at(self.clock.now());

        instrumented(OP, || {
            self.with_conn(OP, |conn| {
                conn.query_row(
                    "INSERT INTO snippets (title, content, created, expires)
                     VALUES (?1, ?2, ?3, ?4)
                     RETURNING id",
                    rusqlite::params![
                        snippet.title(),
                        snippet.content(),
                        created.timestamp(),
                        expires.timestamp(),
                    ],
                    |row| row.get(0),
                )
                .map_err(|e| from_rusqlite(OP, e))
            })
        })
    }

    fn get(&self, id: i64) -> Result<Snippet> {
        const OP: &str = "snippet_get";
        let now = self.clock.now().timestamp();

        instrumented(OP, || {
            let raw = self.with_conn(OP, |conn| {
                conn.query_row(
                    &format!("{} WHERE expires > ?1 AND id = ?2", SELECT_COLUMNS),
                    rusqlite::params![now, id],
                    RawSnippet::from_row,
                )
                .optional()
                .map_err(|e| from_rusqlite(OP, e))
            })?;

            match raw {
                Some(raw) => raw.into_snippet(OP),
                None => Err(SnippetError::SnippetNotFound { id }.into()),
            }
        })
    }

    fn latest(&self) -> Result<Vec<Snippet>> {
        const OP: &str = "snippet_latest";
        let now = self.clock.now().timestamp();

        instrumented(OP, || {
            let rows = self.with_conn(OP, |conn| {
                let mut stmt = conn
                    .prepare(&format!(
                        "{} WHERE expires > ?1 ORDER BY id DESC LIMIT ?2",
                        SELECT_COLUMNS
                    ))
                    .map_err(|e| from_rusqlite(OP, e))?;

                let rows = stmt
                    .query_map(
                        rusqlite::params![now, LATEST_LIMIT as i64],
                        RawSnippet::from_row,
                    )
                    .map_err(|e| from_rusqlite(OP, e))?
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|e| from_rusqlite(OP, e))?;
                Ok(rows)
            })?;

            rows.into_iter().map(|raw| raw.into_snippet(OP)).collect()
        })
    }
}

/// Column values as stored, before timestamp conversion
struct RawSnippet {
    id: i64,
    title: String,
    content: String,
    created: i64,
    expires: i64,
}

impl RawSnippet {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            created: row.get(3)?,
            expires: row.get(4)?,
        })
    }

    fn into_snippet(self, op: &str) -> Result<Snippet> {
        let created = timestamp(self.created)
            .ok_or_else(|| corrupt_row(op, self.id, "created out of range"))?;
        let expires = timestamp(self.expires)
            .ok_or_else(|| corrupt_row(op, self.id, "expires out of range"))?;

        Ok(Snippet {
            id: self.id,
            title: self.title,
            content: self.content,
            created,
            expires,
        })
    }
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

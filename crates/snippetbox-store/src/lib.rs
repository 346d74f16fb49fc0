//! Snippetbox Store - SQLite persistence for snippets
//!
//! Provides:
//! - Connection opening and configuration
//! - Embedded, checksummed schema migrations
//! - The `SnippetRepository` trait and its SQLite implementation, which
//!   applies the visibility window on every read

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::{SnippetRepository, SqliteSnippetStore};

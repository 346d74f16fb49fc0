//! Snippet repository layer

pub mod sqlite_store;

pub use sqlite_store::SqliteSnippetStore;

use crate::errors::Result;
use snippetbox_core::model::{NewSnippet, Snippet};

/// Persistence operations for snippets
///
/// Implementations must be safe to share between request threads without
/// external locking. Read operations only ever return visible snippets.
pub trait SnippetRepository: Send + Sync {
    /// Persist a new snippet and return its freshly assigned id
    ///
    /// # Errors
    /// * `Persistence` - the record could not be written (nothing is stored)
    fn insert(&self, snippet: &NewSnippet) -> Result<i64>;

    /// Fetch a visible snippet by id
    ///
    /// # Errors
    /// * `NotFound` - no visible snippet has this id (missing or expired)
    /// * `Persistence` - any other read failure
    fn get(&self, id: i64) -> Result<Snippet>;

    /// Up to `LATEST_LIMIT` visible snippets, newest (highest id) first
    ///
    /// # Errors
    /// * `Persistence` - the listing could not be read; no partial result
    fn latest(&self) -> Result<Vec<Snippet>>;
}

//! Domain models

pub mod snippet;

pub use snippet::{NewSnippet, Snippet, LATEST_LIMIT, MAX_LIFETIME_DAYS};

//! Error handling for snippetbox-store
//!
//! Wraps snippetbox-core ExError with store-specific helpers

use snippetbox_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(op: &str, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op(op.to_string())
        .with_message(err.to_string())
}

/// Create an error for a row whose stored values cannot form a Snippet
pub fn corrupt_row(op: &str, id: i64, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op(op.to_string())
        .with_entity_id(id.to_string())
        .with_message(format!("Corrupt snippet row: {}", reason))
}

/// Create an error for a poisoned connection lock
pub fn lock_poisoned(op: &str) -> ExError {
    ExError::new(ExErrorKind::Concurrency)
        .with_op(op.to_string())
        .with_message("Connection lock poisoned")
}

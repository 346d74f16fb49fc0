//! Checksum validation for migrations
//!
//! Computes SHA256 checksums of migration SQL to detect edits to a
//! migration after it has been applied

use sha2::{Digest, Sha256};

/// Compute SHA256 checksum of a string
pub fn compute_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_checksum() {
        let checksum = compute_checksum("SELECT 1");
        assert_eq!(checksum.len(), 64); // SHA256 is 64 hex chars
    }

    #[test]
    fn test_checksum_sensitive_to_content() {
        assert_eq!(compute_checksum("SELECT 1"), compute_checksum("SELECT 1"));
        assert_ne!(compute_checksum("SELECT 1"), compute_checksum("SELECT 2"));
    }
}

use chrono::{DateTime, Duration, DurationRound, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SnippetError};

/// Maximum number of snippets returned by a latest-listing
pub const LATEST_LIMIT: usize = 10;

/// Upper bound on a snippet's lifetime in days (one hundred years)
pub const MAX_LIFETIME_DAYS: u32 = 36_500;

/// Snippet - a stored text record with a visibility window
///
/// `created` and `expires` are assigned by the store at insertion time and
/// are never supplied by a caller. A snippet is visible only while the
/// current time is strictly before `expires`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Store-assigned identifier, positive and never reused
    pub id: i64,

    /// Non-empty title
    pub title: String,

    /// Non-empty body text, may span multiple lines
    pub content: String,

    /// Insertion time (UTC, whole seconds)
    pub created: DateTime<Utc>,

    /// `created` plus the requested lifetime
    pub expires: DateTime<Utc>,
}

impl Snippet {
    /// Check whether this snippet can be returned by read operations at `now`
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires
    }

    /// Length of the visibility window
    pub fn lifetime(&self) -> Duration {
        self.expires - self.created
    }
}

/// Validated payload for creating a snippet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnippet {
    title: String,
    content: String,
    lifetime_days: u32,
}

impl NewSnippet {
    /// Build a creation payload
    ///
    /// # Errors
    /// * `EmptyField` - title or content is empty or whitespace only
    /// * `InvalidLifetime` - lifetime exceeds `MAX_LIFETIME_DAYS`
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        lifetime_days: u32,
    ) -> Result<Self> {
        let title = title.into();
        let content = content.into();

        if title.trim().is_empty() {
            return Err(SnippetError::EmptyField { field: "title" });
        }
        if content.trim().is_empty() {
            return Err(SnippetError::EmptyField { field: "content" });
        }
        if lifetime_days > MAX_LIFETIME_DAYS {
            return Err(SnippetError::InvalidLifetime {
                raw: lifetime_days.to_string(),
            });
        }

        Ok(Self {
            title,
            content,
            lifetime_days,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn lifetime_days(&self) -> u32 {
        self.lifetime_days
    }

    /// Compute the `(created, expires)` pair for an insertion at `now`
    ///
    /// `created` is truncated to whole seconds, the resolution the store
    /// persists, so `expires - created` is exactly the lifetime.
    pub fn window_at(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let created = now
            .duration_trunc(Duration::seconds(1))
            .unwrap_or(now);
        let expires = created + Duration::days(i64::from(self.lifetime_days));
        (created, expires)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_new_snippet_rejects_empty_title() {
        let err = NewSnippet::new("  ", "content", 7).unwrap_err();
        assert_eq!(err, SnippetError::EmptyField { field: "title" });
    }

    #[test]
    fn test_new_snippet_rejects_empty_content() {
        let err = NewSnippet::new("title", "", 7).unwrap_err();
        assert_eq!(err, SnippetError::EmptyField { field: "content" });
    }

    #[test]
    fn test_new_snippet_rejects_oversized_lifetime() {
        let err = NewSnippet::new("t", "c", MAX_LIFETIME_DAYS + 1).unwrap_err();
        assert!(matches!(err, SnippetError::InvalidLifetime { .. }));
    }

    #[test]
    fn test_content_keeps_newlines() {
        let payload = NewSnippet::new("O snail", "line one\nline two", 7).unwrap();
        assert_eq!(payload.content(), "line one\nline two");
    }

    #[test]
    fn test_window_truncates_to_seconds() {
        let now = at(2024, 5, 1) + Duration::milliseconds(750);
        let payload = NewSnippet::new("t", "c", 3).unwrap();
        let (created, expires) = payload.window_at(now);

        assert_eq!(created, at(2024, 5, 1));
        assert_eq!(expires, at(2024, 5, 4));
    }

    #[test]
    fn test_zero_lifetime_is_never_visible() {
        let payload = NewSnippet::new("t", "c", 0).unwrap();
        let (created, expires) = payload.window_at(at(2024, 5, 1));
        let snippet = Snippet {
            id: 1,
            title: "t".to_string(),
            content: "c".to_string(),
            created,
            expires,
        };
        assert!(!snippet.is_visible_at(created));
    }

    #[test]
    fn test_visibility_boundary_is_strict() {
        let snippet = Snippet {
            id: 1,
            title: "t".to_string(),
            content: "c".to_string(),
            created: at(2024, 5, 1),
            expires: at(2024, 5, 2),
        };
        assert!(snippet.is_visible_at(at(2024, 5, 2) - Duration::seconds(1)));
        assert!(!snippet.is_visible_at(at(2024, 5, 2)));
        assert_eq!(snippet.lifetime(), Duration::days(1));
    }

    #[test]
    fn test_snippet_json_uses_utc_timestamps() {
        let snippet = Snippet {
            id: 42,
            title: "O Snail".to_string(),
            content: "Climb Mount Fuji,\nBut slowly".to_string(),
            created: at(2024, 5, 1),
            expires: at(2024, 5, 8),
        };

        let json = serde_json::to_value(&snippet).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["created"], "2024-05-01T09:30:00Z");
        assert_eq!(json["expires"], "2024-05-08T09:30:00Z");

        let decoded: Snippet = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, snippet);
        assert_eq!(decoded.lifetime(), Duration::days(7));
    }
}

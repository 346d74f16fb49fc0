//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names stable across the request log,
//! the operation macros and the failure reporter.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// HTTP request fields
pub const FIELD_METHOD: &str = "method";
pub const FIELD_PATH: &str = "path";
pub const FIELD_STATUS: &str = "status";

// Entity identifiers
pub const FIELD_SNIPPET_ID: &str = "snippet_id";

// Collection sizes
pub const FIELD_SNIPPET_COUNT: &str = "snippet_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_BACKTRACE: &str = "backtrace";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_FAILURE: &str = "failure";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
        assert!(!EVENT_FAILURE.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        let events = [EVENT_START, EVENT_END, EVENT_END_ERROR, EVENT_FAILURE];
        for (i, a) in events.iter().enumerate() {
            for b in events.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}

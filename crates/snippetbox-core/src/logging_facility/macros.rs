//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use snippetbox_core::log_op_start;
/// log_op_start!("snippet_get");
/// log_op_start!("snippet_get", snippet_id = 42);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::snippetbox_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::snippetbox_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use snippetbox_core::log_op_end;
/// log_op_end!("snippet_latest", duration_ms = 3);
/// log_op_end!("snippet_latest", duration_ms = 3, snippet_count = 10);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::snippetbox_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::snippetbox_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation that ended in an error
///
/// Client-facing kinds are logged at `debug`, internal ones at `warn`; the
/// full report of internal failures goes through a `FailureReporter`.
///
/// # Example
///
/// ```
/// # use snippetbox_core::{log_op_error, errors::SnippetError};
/// let err = SnippetError::SnippetNotFound { id: 7 };
/// log_op_error!("snippet_get", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {
        $crate::log_op_error!($op, $err, duration_ms = $duration,)
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        if ex_err.kind().is_internal() {
            tracing::warn!(
                component = module_path!(),
                op = $op,
                event = $crate::snippetbox_core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code(),
                $($field)*
            );
        } else {
            tracing::debug!(
                component = module_path!(),
                op = $op,
                event = $crate::snippetbox_core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code(),
                $($field)*
            );
        }
    }};
}

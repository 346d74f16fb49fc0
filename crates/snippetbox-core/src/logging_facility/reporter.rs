//! Failure reporting collaborator
//!
//! Internal failures (persistence, rendering, I/O) are handed to a
//! `FailureReporter` together with the call stack captured where the failure
//! was translated. Client-facing conditions never reach a reporter.

use std::backtrace::Backtrace;

use crate::errors::ExError;
use snippetbox_core_types::schema::EVENT_FAILURE;

/// Receives internal failures with diagnostic context
pub trait FailureReporter: Send + Sync {
    /// Record a failure of operation `op`
    fn report(&self, op: &str, err: &ExError, backtrace: &Backtrace);
}

/// Reporter that emits an `error` level tracing event per failure
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report(&self, op: &str, err: &ExError, backtrace: &Backtrace) {
        tracing::error!(
            component = module_path!(),
            op = op,
            event = EVENT_FAILURE,
            err_kind = ?err.kind(),
            err_code = err.code(),
            backtrace = %backtrace,
            "{}",
            err
        );
    }
}

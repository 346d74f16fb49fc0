//! Structured logging facility for Snippetbox
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - The `FailureReporter` collaborator that receives internal failures
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use snippetbox_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod reporter;
pub mod test_capture;

pub use init::{init, Profile};
pub use reporter::{FailureReporter, TracingReporter};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

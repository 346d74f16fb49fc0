//! Snippetbox Core - domain model and collaborator seams
//!
//! This crate provides the pieces every other Snippetbox crate builds on:
//! - The `Snippet` entity, its creation payload and visibility rules
//! - The structured error facility (`ExError`, `ExErrorKind`, `SnippetError`)
//! - The `Clock` seam used to decide what "now" means for expiration
//! - The `Renderer` collaborator and the built-in HTML renderer
//! - The logging facility and the `FailureReporter` collaborator

pub mod clock;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod render;

// Re-exported so the logging macros can name schema constants from any crate
pub use snippetbox_core_types;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{ExError, ExErrorKind, Result, SnippetError};
pub use logging_facility::{FailureReporter, TracingReporter};
pub use model::{NewSnippet, Snippet};
pub use render::{HtmlRenderer, Renderer};

//! Snippetbox Web - HTTP surface
//!
//! Provides:
//! - A pure (method, path) → `Route` resolver and request parameter parsing
//! - The response translator, the single place where error kinds become
//!   status codes
//! - `Application`, which wires routes to the store, renderer and failure
//!   reporter it was constructed with
//! - Static asset serving and the tiny_http worker pool

pub mod app;
pub mod config;
pub mod router;
pub mod server;
pub mod static_files;
pub mod translator;

pub use app::Application;
pub use config::{Cli, Config, LogFormat};
pub use router::Route;
pub use server::ServerHandle;
pub use static_files::StaticFiles;
pub use translator::Outcome;

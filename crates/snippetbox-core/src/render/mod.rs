//! Rendering collaborator
//!
//! Operations hand their result data to a `Renderer` and send whatever body
//! it produces. A render failure is an internal error, never a client one.

pub mod html;

pub use html::HtmlRenderer;

use crate::errors::Result;
use crate::model::Snippet;

/// Produces response bodies from operation results
pub trait Renderer: Send + Sync {
    /// Render the latest-snippets listing (may be empty)
    fn render_home(&self, snippets: &[Snippet]) -> Result<String>;

    /// Render a single snippet
    fn render_view(&self, snippet: &Snippet) -> Result<String>;
}

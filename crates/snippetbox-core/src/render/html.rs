use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::model::Snippet;
use crate::render::Renderer;

/// Built-in HTML renderer
///
/// Produces a base page (header, nav, main, footer) around either the
/// listing table or a single snippet. All user text is escaped.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    site_name: String,
}

impl HtmlRenderer {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
        }
    }

    fn page(&self, page_title: &str, main: &str) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "<!doctype html>")?;
        writeln!(out, "<html lang=\"en\">")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(
            out,
            "<title>{} - {}</title>",
            escape_html(page_title),
            escape_html(&self.site_name)
        )?;
        writeln!(out, "<link rel=\"stylesheet\" href=\"/static/css/main.css\">")?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(
            out,
            "<header><h1><a href=\"/\">{}</a></h1></header>",
            escape_html(&self.site_name)
        )?;
        writeln!(out, "<nav><a href=\"/\">Home</a></nav>")?;
        writeln!(out, "<main>")?;
        out.push_str(main);
        writeln!(out, "</main>")?;
        writeln!(out, "<footer>Powered by Rust</footer>")?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(out)
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new("Snippetbox")
    }
}

impl Renderer for HtmlRenderer {
    fn render_home(&self, snippets: &[Snippet]) -> Result<String> {
        let mut main = String::new();
        writeln!(main, "<h2>Latest Snippets</h2>")?;

        if snippets.is_empty() {
            writeln!(main, "<p>There's nothing to see here yet!</p>")?;
        } else {
            writeln!(main, "<table>")?;
            writeln!(main, "<tr><th>Title</th><th>Created</th><th>ID</th></tr>")?;
            for snippet in snippets {
                writeln!(
                    main,
                    "<tr><td><a href=\"/snippet/view?id={id}\">{title}</a></td><td>{created}</td><td>#{id}</td></tr>",
                    id = snippet.id,
                    title = escape_html(&snippet.title),
                    created = human_date(snippet.created),
                )?;
            }
            writeln!(main, "</table>")?;
        }

        self.page("Home", &main)
    }

    fn render_view(&self, snippet: &Snippet) -> Result<String> {
        let mut main = String::new();
        writeln!(main, "<div class=\"snippet\">")?;
        writeln!(
            main,
            "<div class=\"metadata\"><strong>{}</strong><span>#{}</span></div>",
            escape_html(&snippet.title),
            snippet.id
        )?;
        writeln!(main, "<pre><code>{}</code></pre>", escape_html(&snippet.content))?;
        writeln!(
            main,
            "<div class=\"metadata\"><time>Created: {}</time><time>Expires: {}</time></div>",
            human_date(snippet.created),
            human_date(snippet.expires)
        )?;
        writeln!(main, "</div>")?;

        self.page(&format!("Snippet #{}", snippet.id), &main)
    }
}

/// Format a timestamp as e.g. `02 Jan 2024 at 15:04`
pub fn human_date(t: DateTime<Utc>) -> String {
    t.format("%d %b %Y at %H:%M").to_string()
}

/// Escape text for inclusion in HTML element content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

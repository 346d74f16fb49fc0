//! Request routing
//!
//! `resolve` maps a method and path to exactly one `Route` or a
//! client-facing error. Parameter extraction for the individual operations
//! lives here too so that the routing table can be tested without a server.

use http::Method;
use snippetbox_core::errors::{ExError, SnippetError};
use snippetbox_core::model::NewSnippet;
use url::form_urlencoded;

pub const HOME_PATH: &str = "/";
pub const VIEW_PATH: &str = "/snippet/view";
pub const CREATE_PATH: &str = "/snippet/create";
pub const STATIC_PREFIX: &str = "/static/";

/// Payload used when a create request carries no form fields
pub const PLACEHOLDER_TITLE: &str = "O Snail";
pub const PLACEHOLDER_CONTENT: &str =
    "O snail\nClimb Mount Fuji,\nBut slowly, slowly!\n\n- Kobayashi Issa";
pub const PLACEHOLDER_LIFETIME_DAYS: u32 = 7;

/// Operations reachable over HTTP
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Latest visible snippets
    List,
    /// One snippet, id taken from the query string
    View,
    /// Insert a snippet and redirect to it
    Create,
    /// File under the static directory (path relative to it)
    Static(String),
}

impl Route {
    /// Operation name used in logs and failure reports
    pub fn op_name(&self) -> &'static str {
        match self {
            Route::List => "snippet_list",
            Route::View => "snippet_view",
            Route::Create => "snippet_create",
            Route::Static(_) => "static_asset",
        }
    }
}

/// Resolve a request to a route
///
/// # Errors
/// * `RouteNotFound` - no route matches the path
/// * `MethodNotAllowed` - the path is known but the method is not permitted
pub fn resolve(method: &Method, path: &str) -> Result<Route, ExError> {
    match path {
        HOME_PATH => Ok(Route::List),
        VIEW_PATH => Ok(Route::View),
        CREATE_PATH => {
            if *method == Method::POST {
                Ok(Route::Create)
            } else {
                Err(not_allowed(method, &[Method::POST]))
            }
        }
        _ => match path.strip_prefix(STATIC_PREFIX) {
            Some(rest) => {
                if *method == Method::GET || *method == Method::HEAD {
                    Ok(Route::Static(rest.to_string()))
                } else {
                    Err(not_allowed(method, &[Method::GET, Method::HEAD]))
                }
            }
            None => Err(SnippetError::RouteNotFound {
                path: path.to_string(),
            }
            .into()),
        },
    }
}

fn not_allowed(method: &Method, allowed: &[Method]) -> ExError {
    SnippetError::MethodNotAllowed {
        method: method.to_string(),
        allowed: allowed.iter().map(|m| m.to_string()).collect(),
    }
    .into()
}

/// Extract the positive snippet id from a query string
///
/// Only the first `id` parameter counts.
///
/// # Errors
/// * `InvalidIdentifier` - missing, not an integer, or less than 1
pub fn parse_snippet_id(query: Option<&str>) -> Result<i64, SnippetError> {
    let raw = query
        .and_then(|q| {
            form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == "id")
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default();

    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(SnippetError::InvalidIdentifier { raw }),
    }
}

/// Build the creation payload from a form-encoded body
///
/// A body without any of `title`, `content` or `expires` yields the
/// placeholder snippet.
///
/// # Errors
/// * `EmptyField` - title or content missing or blank
/// * `InvalidLifetime` - expires missing, not a non-negative integer, or too large
pub fn parse_create_payload(body: &[u8]) -> Result<NewSnippet, SnippetError> {
    let mut title = None;
    let mut content = None;
    let mut expires = None;

    for (key, value) in form_urlencoded::parse(body) {
        let slot = match &*key {
            "title" => &mut title,
            "content" => &mut content,
            "expires" => &mut expires,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    if title.is_none() && content.is_none() && expires.is_none() {
        return NewSnippet::new(
            PLACEHOLDER_TITLE,
            PLACEHOLDER_CONTENT,
            PLACEHOLDER_LIFETIME_DAYS,
        );
    }

    let expires = expires.unwrap_or_default();
    let lifetime_days = expires
        .trim()
        .parse::<u32>()
        .map_err(|_| SnippetError::InvalidLifetime { raw: expires })?;

    NewSnippet::new(
        title.unwrap_or_default(),
        content.unwrap_or_default(),
        lifetime_days,
    )
}

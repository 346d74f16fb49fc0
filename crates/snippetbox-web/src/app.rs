//! Application wiring
//!
//! `Application` owns the collaborators handed to it at construction and
//! turns one `http::Request` into one `http::Response`. It holds no
//! per-request state, so a single instance serves every worker thread.

use std::sync::Arc;
use std::time::Instant;

use http::header::HeaderValue;
use http::{Request, Response};
use snippetbox_core::errors::{ExError, SnippetError};
use snippetbox_core::logging_facility::FailureReporter;
use snippetbox_core::render::Renderer;
use snippetbox_core::{log_op_end, log_op_error, log_op_start};
use snippetbox_core_types::correlation::{RequestContext, REQUEST_ID_HEADER};
use snippetbox_store::SnippetRepository;

use crate::router::{self, Route, VIEW_PATH};
use crate::static_files::StaticFiles;
use crate::translator::{self, status_for_kind, Outcome};

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub struct Application {
    store: Arc<dyn SnippetRepository>,
    renderer: Arc<dyn Renderer>,
    reporter: Arc<dyn FailureReporter>,
    static_files: Option<StaticFiles>,
}

impl Application {
    pub fn new(
        store: Arc<dyn SnippetRepository>,
        renderer: Arc<dyn Renderer>,
        reporter: Arc<dyn FailureReporter>,
    ) -> Self {
        Self {
            store,
            renderer,
            reporter,
            static_files: None,
        }
    }

    /// Serve `/static/` from a directory
    pub fn with_static_files(mut self, static_files: StaticFiles) -> Self {
        self.static_files = Some(static_files);
        self
    }

    /// Handle a single request
    ///
    /// Never fails: every error is translated into a response here. The
    /// response echoes the request id in `X-Request-Id`.
    pub fn handle(&self, request: &Request<Vec<u8>>) -> Response<Vec<u8>> {
        let supplied = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok());
        let ctx = RequestContext::new(request.method().as_str(), request.uri().path(), supplied);
        let span = tracing::info_span!(
            "request",
            request_id = %ctx.request_id,
            method = %ctx.method,
            path = %ctx.path,
        );
        let _guard = span.enter();

        let started = Instant::now();
        let (op, result) = match router::resolve(request.method(), request.uri().path()) {
            Ok(route) => {
                let op = route.op_name();
                log_op_start!(op);
                (op, self.dispatch(&route, request))
            }
            Err(err) => ("route", Err(err)),
        };
        let duration_ms = started.elapsed().as_millis() as u64;

        if let Err(err) = &result {
            log_op_error!(
                op,
                err.clone(),
                duration_ms = duration_ms,
                status = status_for_kind(err.kind()).as_u16()
            );
        }
        let succeeded = result.is_ok();

        let mut response = translator::translate(op, result, self.reporter.as_ref());
        if let Ok(value) = HeaderValue::from_str(&ctx.request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        if succeeded {
            log_op_end!(
                op,
                duration_ms = duration_ms,
                status = response.status().as_u16()
            );
        }
        response
    }

    fn dispatch(&self, route: &Route, request: &Request<Vec<u8>>) -> Result<Outcome, ExError> {
        match route {
            Route::List => self.list(),
            Route::View => self.view(request.uri().query()),
            Route::Create => self.create(request.body()),
            Route::Static(path) => self.static_asset(path),
        }
    }

    /// Home page listing the latest visible snippets
    ///
    /// # Errors
    /// * `Persistence` / `Render` - internal failures
    pub fn list(&self) -> Result<Outcome, ExError> {
        let snippets = self.store.latest()?;
        let body = self.renderer.render_home(&snippets)?;
        Ok(Outcome::Page(body))
    }

    /// Page for the snippet named by the `id` query parameter
    ///
    /// # Errors
    /// * `InvalidRequest` - id missing or malformed
    /// * `NotFound` - no visible snippet with that id
    pub fn view(&self, query: Option<&str>) -> Result<Outcome, ExError> {
        let id = router::parse_snippet_id(query)?;
        let snippet = self.store.get(id)?;
        let body = self.renderer.render_view(&snippet)?;
        Ok(Outcome::Page(body))
    }

    /// Insert a snippet and redirect to its page
    ///
    /// # Errors
    /// * `InvalidInput` - body too large or form fields invalid
    /// * `Persistence` - the insert failed
    pub fn create(&self, body: &[u8]) -> Result<Outcome, ExError> {
        if body.len() > MAX_BODY_BYTES {
            return Err(SnippetError::PayloadTooLarge {
                limit: MAX_BODY_BYTES,
            }
            .into());
        }
        let payload = router::parse_create_payload(body)?;
        let id = self.store.insert(&payload)?;
        tracing::info!(snippet_id = id, "snippet created");
        Ok(Outcome::Redirect(format!("{}?id={}", VIEW_PATH, id)))
    }

    /// File under the static directory
    ///
    /// # Errors
    /// * `RouteNotFound` - no static directory configured
    /// * `NotFound` / `Io` - see `StaticFiles::load`
    pub fn static_asset(&self, path: &str) -> Result<Outcome, ExError> {
        match &self.static_files {
            Some(files) => files.load(path),
            None => Err(SnippetError::RouteNotFound {
                path: format!("{}{}", router::STATIC_PREFIX, path),
            }
            .into()),
        }
    }
}

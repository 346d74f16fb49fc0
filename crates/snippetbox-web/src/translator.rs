//! Response translation
//!
//! The only place where operation results become HTTP responses.
//! `status_for_kind` is the status table; `translate` applies it and sends
//! internal failures to the failure reporter.

use std::backtrace::Backtrace;

use http::header::{self, HeaderValue};
use http::{Response, StatusCode};
use snippetbox_core::errors::{ExError, ExErrorKind};
use snippetbox_core::logging_facility::FailureReporter;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Successful result of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rendered page body
    Page(String),
    /// See-other redirect to a location
    Redirect(String),
    /// Raw file contents
    Asset {
        content_type: &'static str,
        bytes: Vec<u8>,
    },
}

/// Status code for an error kind
pub fn status_for_kind(kind: ExErrorKind) -> StatusCode {
    match kind {
        ExErrorKind::NotFound | ExErrorKind::InvalidRequest | ExErrorKind::RouteNotFound => {
            StatusCode::NOT_FOUND
        }
        ExErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ExErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ExErrorKind::Persistence
        | ExErrorKind::Render
        | ExErrorKind::Io
        | ExErrorKind::Concurrency
        | ExErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Turn an operation result into a response
///
/// Internal failures are reported with a backtrace; the caller only ever
/// sees the generic reason phrase for the status.
pub fn translate(
    op: &str,
    result: Result<Outcome, ExError>,
    reporter: &dyn FailureReporter,
) -> Response<Vec<u8>> {
    match result.and_then(success) {
        Ok(response) => response,
        Err(err) => {
            if err.kind().is_internal() {
                reporter.report(op, &err, &Backtrace::force_capture());
            }
            failure(&err)
        }
    }
}

/// Build the response for a successful outcome
///
/// # Errors
/// * `Internal` - a redirect location is not a valid header value
pub fn success(outcome: Outcome) -> Result<Response<Vec<u8>>, ExError> {
    match outcome {
        Outcome::Page(body) => Ok(with_content_type(
            StatusCode::OK,
            HTML_CONTENT_TYPE,
            body.into_bytes(),
        )),
        Outcome::Redirect(location) => {
            let value = HeaderValue::from_str(&location).map_err(|e| {
                ExError::new(ExErrorKind::Internal)
                    .with_op("redirect")
                    .with_message(format!("Invalid location {:?}: {}", location, e))
            })?;
            let mut response = plain(StatusCode::SEE_OTHER);
            response.headers_mut().insert(header::LOCATION, value);
            Ok(response)
        }
        Outcome::Asset {
            content_type,
            bytes,
        } => Ok(with_content_type(StatusCode::OK, content_type, bytes)),
    }
}

/// Build the client-facing response for an error
///
/// Never includes error detail. MethodNotAllowed carries an `Allow` header.
pub fn failure(err: &ExError) -> Response<Vec<u8>> {
    let status = status_for_kind(err.kind());
    let mut response = plain(status);

    if let Some(allowed) = err.allowed_methods() {
        if let Ok(value) = HeaderValue::from_str(&allowed.join(", ")) {
            response.headers_mut().insert(header::ALLOW, value);
        }
    }

    response
}

/// Reason-phrase body, the same shape for every status
fn plain(status: StatusCode) -> Response<Vec<u8>> {
    let body = format!("{}\n", status.canonical_reason().unwrap_or_default());
    let mut response = with_content_type(status, TEXT_CONTENT_TYPE, body.into_bytes());
    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response
}

fn with_content_type(
    status: StatusCode,
    content_type: &'static str,
    body: Vec<u8>,
) -> Response<Vec<u8>> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

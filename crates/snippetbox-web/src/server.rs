//! tiny_http worker pool
//!
//! One listening socket shared by `workers` threads, each blocking on
//! `recv` and passing requests to the shared `Application`.

use std::borrow::Cow;
use std::io::{Cursor, Read};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use snippetbox_core::errors::{ExError, ExErrorKind};
use http::header::{HeaderName, HeaderValue};
use tiny_http::{Header, Server};

use crate::app::{Application, MAX_BODY_BYTES};
use crate::translator;

/// Running server and its worker threads
pub struct ServerHandle {
    server: Arc<Server>,
    shutdown: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl ServerHandle {
    /// Bound socket address (useful when listening on port 0)
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Ask every worker to stop after its current request
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        for _ in &self.workers {
            self.server.unblock();
        }
    }

    /// Wait for all workers to exit
    pub fn join(self) {
        for worker in self.workers {
            if worker.join().is_err() {
                tracing::error!("worker thread panicked");
            }
        }
    }
}

/// Bind `addr` and start serving
///
/// # Errors
/// * `Io` - the address could not be bound or a worker could not be spawned
pub fn start(addr: &str, workers: usize, app: Arc<Application>) -> Result<ServerHandle, ExError> {
    let server = Server::http(addr).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("server_bind")
            .with_entity_id(addr)
            .with_message(e.to_string())
    })?;
    let server = Arc::new(server);
    let shutdown = Arc::new(AtomicBool::new(false));

    let mut handles = Vec::with_capacity(workers);
    for n in 0..workers.max(1) {
        let server = Arc::clone(&server);
        let shutdown = Arc::clone(&shutdown);
        let app = Arc::clone(&app);
        let handle = thread::Builder::new()
            .name(format!("snippetbox-worker-{}", n))
            .spawn(move || worker_loop(&server, &shutdown, &app))
            .map_err(|e| ExError::from(e).with_op("server_spawn"))?;
        handles.push(handle);
    }

    Ok(ServerHandle {
        server,
        shutdown,
        workers: handles,
    })
}

fn worker_loop(server: &Server, shutdown: &AtomicBool, app: &Application) {
    loop {
        let request = match server.recv() {
            Ok(request) => request,
            Err(e) => {
                if shutdown.load(Ordering::SeqCst) {
                    break;
                }
                tracing::warn!(error = %e, "http recv error");
                continue;
            }
        };
        serve(request, app);
    }
}

fn serve(mut request: tiny_http::Request, app: &Application) {
    let response = match into_http_request(&mut request) {
        Ok(http_request) => app.handle(&http_request),
        Err(err) => translator::failure(&err),
    };
    if let Err(e) = request.respond(into_tiny_response(response)) {
        tracing::debug!(error = %e, "failed to write response");
    }
}

/// Convert a tiny_http request, reading at most one byte past the body cap
fn into_http_request(request: &mut tiny_http::Request) -> Result<http::Request<Vec<u8>>, ExError> {
    let mut body = Vec::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| ExError::from(e).with_op("read_request"))?;

    let target = encode_target(request.url());
    let mut converted = http::Request::builder()
        .method(request.method().as_str())
        .uri(&*target)
        .body(body)
        .map_err(|e| {
            ExError::new(ExErrorKind::InvalidRequest)
                .with_op("read_request")
                .with_entity_id(request.url())
                .with_message(e.to_string())
        })?;

    for header in request.headers() {
        let name = HeaderName::from_bytes(header.field.as_str().as_str().as_bytes());
        let value = HeaderValue::from_bytes(header.value.as_str().as_bytes());
        if let (Ok(name), Ok(value)) = (name, value) {
            converted.headers_mut().append(name, value);
        }
    }

    Ok(converted)
}

/// Percent-encode request-target bytes that `http::Uri` refuses
///
/// Decoding happens later in form parsing, so `?id=<1>` still reaches the
/// view operation and fails there like any other malformed id.
fn encode_target(target: &str) -> Cow<'_, str> {
    fn keep(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b"-._~!$&'()*+,;=:@/?%".contains(&b)
    }

    if target.bytes().all(keep) {
        return Cow::Borrowed(target);
    }

    let mut out = String::with_capacity(target.len() + 8);
    for b in target.bytes() {
        if keep(b) {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    Cow::Owned(out)
}

fn into_tiny_response(response: http::Response<Vec<u8>>) -> tiny_http::Response<Cursor<Vec<u8>>> {
    let (parts, body) = response.into_parts();
    let mut out = tiny_http::Response::from_data(body).with_status_code(parts.status.as_u16());
    for (name, value) in &parts.headers {
        if let Ok(header) = Header::from_bytes(name.as_str().as_bytes(), value.as_bytes()) {
            out.add_header(header);
        }
    }
    out
}

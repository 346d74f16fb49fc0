//! In-memory event capture for logging assertions
//!
//! Events are recorded together with the `request_id` of the innermost
//! enclosing span that carries one, so tests in a shared binary can pick out
//! the events of a single request.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use snippetbox_core_types::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_OP, FIELD_REQUEST_ID};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    /// Request id inherited from the enclosing request span
    pub request_id: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

#[derive(Default)]
struct Fields(HashMap<String, String>);

impl Fields {
    fn get(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

impl Visit for Fields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

/// Request id stored in a span's extensions
struct SpanRequestId(String);

/// Layer pushing every event into a shared buffer
pub struct TestCaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                events: Arc::clone(&events),
            },
            TestCapture { events },
        )
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        attrs.record(&mut fields);
        if let (Some(request_id), Some(span)) = (fields.get(FIELD_REQUEST_ID), ctx.span(id)) {
            span.extensions_mut().insert(SpanRequestId(request_id));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);

        let request_id = ctx.event_scope(event).and_then(|scope| {
            scope.into_iter().find_map(|span| {
                let extensions = span.extensions();
                extensions.get::<SpanRequestId>().map(|r| r.0.clone())
            })
        });

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: fields.get(FIELD_COMPONENT),
            op: fields.get(FIELD_OP),
            event: fields.get(FIELD_EVENT),
            request_id,
            fields: fields.0,
        };

        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Shared view of the captured events
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// First event with the given operation and event name
    pub fn find(&self, op: &str, event: &str) -> Option<CapturedEvent> {
        self.events().into_iter().find(|e| e.is(op, event))
    }

    /// Events recorded inside the span of one request
    pub fn for_request(&self, request_id: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.request_id.as_deref() == Some(request_id))
            .collect()
    }

    /// # Panics
    ///
    /// Panics if no matching event was captured
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "no event op={} event={} among {} captured",
            op,
            event,
            events.len()
        );
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber (first call only)
///
/// Tests in one binary share the buffer; filter by a unique operation name
/// or by request id.
///
/// # Example
///
/// ```
/// use snippetbox_core::logging_facility::test_capture::init_test_capture;
/// use snippetbox_core::log_op_end;
///
/// let capture = init_test_capture();
/// log_op_end!("doc_example_op", duration_ms = 1);
/// capture.assert_event_exists("doc_example_op", "end");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            tracing_subscriber::registry().with(layer).try_init().ok();
            capture
        })
        .clone()
}

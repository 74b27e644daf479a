//! Custom tracing Layer that hands rendered events to a [`LogSink`].

use std::fmt::Write as FmtWrite;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use super::entry::ConsoleEntry;
use crate::error::{EnhancerError, EnhancerResult};

/// Destination for rendered log entries.
pub trait LogSink: Send + Sync + 'static {
    fn write(&self, level: &Level, entry: &ConsoleEntry);
}

/// Sink that keeps entries in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<ConsoleEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<ConsoleEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Rendered lines, in order.
    pub fn lines(&self) -> Vec<String> {
        self.entries().iter().map(ConsoleEntry::render).collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, _level: &Level, entry: &ConsoleEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}

/// A tracing Layer that renders events and forwards them to a sink.
pub struct ConsoleLayer<S> {
    sink: S,
}

impl<S: LogSink> ConsoleLayer<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S, Sub> Layer<Sub> for ConsoleLayer<S>
where
    S: LogSink,
    Sub: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, Sub>) {
        let metadata = event.metadata();

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut entry = ConsoleEntry::new(
            metadata.level(),
            metadata.target(),
            visitor.message.unwrap_or_default(),
        )
        .with_fields(visitor.fields);

        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
            if !spans.is_empty() {
                entry = entry.with_span(spans.join(" > "));
            }
        }

        self.sink.write(metadata.level(), &entry);
    }
}

/// Collects the message and structured fields of an event.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(&mut buf, "{:?}", value);
        if field.name() == "message" {
            self.message = Some(buf);
        } else {
            self.fields
                .insert(field.name().to_string(), serde_json::Value::String(buf));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(
                field.name().to_string(),
                serde_json::Value::String(value.to_string()),
            );
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), serde_json::Value::Number(value.into()));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), serde_json::Value::Number(value.into()));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), serde_json::Value::Bool(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.fields
                .insert(field.name().to_string(), serde_json::Value::Number(n));
        }
    }
}

/// Install a global subscriber writing to `sink`, filtered by `filter`
/// (an `EnvFilter` directive string such as `"info"`).
pub fn init_logging<S: LogSink>(sink: S, filter: &str) -> EnhancerResult<()> {
    let filter = EnvFilter::try_new(filter).map_err(|e| EnhancerError::Logging(e.to_string()))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(ConsoleLayer::new(sink))
        .try_init()
        .map_err(|e| EnhancerError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::Registry;

    fn capture(f: impl FnOnce()) -> MemorySink {
        let sink = MemorySink::new();
        let subscriber = Registry::default().with(ConsoleLayer::new(sink.clone()));
        tracing::subscriber::with_default(subscriber, f);
        sink
    }

    #[test]
    fn test_captures_message_and_fields() {
        let sink = capture(|| {
            tracing::info!(cards = 3u64, animated = true, "Page enhanced");
        });

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, "info");
        assert_eq!(entries[0].msg, "Page enhanced");
        assert_eq!(entries[0].fields["cards"], serde_json::json!(3));
        assert_eq!(entries[0].fields["animated"], serde_json::json!(true));
    }

    #[test]
    fn test_records_span_path() {
        let sink = capture(|| {
            let outer = tracing::info_span!("enhance");
            let _outer = outer.enter();
            let inner = tracing::info_span!("media");
            let _inner = inner.enter();
            tracing::warn!("listener failed");
        });

        let entries = sink.entries();
        assert_eq!(entries[0].span.as_deref(), Some("enhance > media"));
        assert_eq!(entries[0].level, "warn");
    }
}

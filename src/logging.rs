//! Diagnostics routed through `tracing`.
//!
//! Components log with the ordinary `tracing` macros. [`ConsoleLayer`]
//! collects each event's message and fields and hands one formatted line to a
//! [`LogSink`]; in the browser that sink is the developer console, where
//! `warn!` and `error!` land in `console.warn` / `console.error`.

use std::fmt::Write as _;
#[cfg(test)]
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Destination for formatted log lines.
pub trait LogSink: Send + Sync + 'static {
    fn write(&self, level: Level, line: &str);
}

/// A tracing layer that formats events as `target: message key=value ...`.
pub struct ConsoleLayer<W> {
    sink: W,
    max_level: Level,
}

impl<W: LogSink> ConsoleLayer<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            max_level: Level::INFO,
        }
    }

    /// Let events up to `level` through (e.g. `Level::DEBUG`).
    pub fn with_max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }
}

impl<S, W> Layer<S> for ConsoleLayer<W>
where
    S: Subscriber,
    W: LogSink,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() > self.max_level {
            return;
        }
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let line = visitor.finish(metadata.target());
        self.sink.write(*metadata.level(), &line);
    }
}

/// Collects the `message` field and appends the rest as `key=value`.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self, target: &str) -> String {
        let mut line = format!("{target}: {}", self.message);
        if !self.fields.is_empty() {
            line.push_str(&self.fields);
        }
        line
    }
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }
}

/// Sink that keeps every line in memory.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

#[cfg(test)]
impl MemorySink {
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
impl LogSink for MemorySink {
    fn write(&self, level: Level, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, line.to_string()));
        }
    }
}

//! Rolling Logger
//!
//! A `tracing` layer that formats each event into one line, keeps the most
//! recent lines in a circular buffer, and on wasm32 mirrors them to the
//! browser console.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

pub const DEFAULT_CAPACITY: usize = 500;

/// Fixed-capacity line buffer, oldest entries evicted first
#[derive(Debug)]
pub struct RollingBuffer {
    capacity: usize,
    lines: VecDeque<String>,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { capacity, lines: VecDeque::with_capacity(capacity) }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Oldest to newest
    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Handle on the shared buffer
#[derive(Clone, Debug)]
pub struct RollingLogger {
    buffer: Arc<Mutex<RollingBuffer>>,
}

impl RollingLogger {
    pub fn new(capacity: usize) -> Self {
        Self { buffer: Arc::new(Mutex::new(RollingBuffer::new(capacity))) }
    }

    /// Install as the global subscriber, filtering below `max_level`
    pub fn init(capacity: usize, max_level: Level) -> Result<Self, TryInitError> {
        let logger = Self::new(capacity);
        tracing_subscriber::registry()
            .with(LevelFilter::from_level(max_level))
            .with(logger.layer())
            .try_init()?;
        Ok(logger)
    }

    pub fn layer(&self) -> RollingLayer {
        RollingLayer { buffer: Arc::clone(&self.buffer) }
    }

    /// Buffered lines, oldest to newest
    pub fn recent(&self) -> Vec<String> {
        self.buffer.lock().map(|b| b.lines()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut b) = self.buffer.lock() {
            b.clear();
        }
    }
}

/// The layer feeding a `RollingLogger`
pub struct RollingLayer {
    buffer: Arc<Mutex<RollingBuffer>>,
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let line = format!(
            "{} {} {}: {}{}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            meta.level(),
            meta.target(),
            visitor.message,
            visitor.fields
        );
        write_console(meta.level(), &line);

        if let Ok(mut b) = self.buffer.lock() {
            b.push(line);
        }
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: &Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    if *level == Level::ERROR {
        web_sys::console::error_1(&value);
    } else if *level == Level::WARN {
        web_sys::console::warn_1(&value);
    } else {
        web_sys::console::log_1(&value);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: &Level, _line: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_evicts_oldest() {
        let mut buffer = RollingBuffer::new(3);
        for i in 0..5 {
            buffer.push(format!("line {}", i));
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.lines(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut buffer = RollingBuffer::new(0);
        buffer.push("a".to_string());
        buffer.push("b".to_string());
        assert_eq!(buffer.lines(), vec!["b"]);
    }

    #[test]
    fn test_layer_records_events() {
        let logger = RollingLogger::new(10);
        let subscriber = tracing_subscriber::registry().with(logger.layer());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(card = "c1", "[DND] moved");
            tracing::warn!("[STORE] missing column");
        });

        let lines = logger.recent();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].contains("[DND] moved"));
        assert!(lines[0].contains("card=c1"));
        assert!(lines[1].contains("WARN"));
        assert!(lines[1].contains("[STORE] missing column"));
    }

    #[test]
    fn test_clear() {
        let logger = RollingLogger::new(4);
        let subscriber = tracing_subscriber::registry().with(logger.layer());
        tracing::subscriber::with_default(subscriber, || tracing::debug!("x"));
        assert_eq!(logger.recent().len(), 1);
        logger.clear();
        assert!(logger.recent().is_empty());
    }
}

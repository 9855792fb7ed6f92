//! Injectable diagnostic sink
//!
//! Instrumentation is peripheral to the algorithmic contract, so it goes
//! through an injected observer rather than a process-wide logger. The
//! default sink swallows everything.

/// Receiver for diagnostic events emitted by the core components
pub trait DiagnosticSink: std::fmt::Debug {
    fn event(&self, message: &str);
}

/// Sink that discards all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn event(&self, _message: &str) {}
}

/// Sink that writes events to stderr, used by the CLI
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn event(&self, message: &str) {
        eprintln!("[rsm0] {}", message);
    }
}

/// Sink that collects events in memory, used by tests
#[derive(Debug, Default)]
pub struct MemorySink {
    events: std::sync::Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl DiagnosticSink for MemorySink {
    fn event(&self, message: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push(message.to_string());
        }
    }
}

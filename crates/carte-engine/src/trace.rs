//! Human-readable trace lines, emitted only when the configuration asks for
//! them.

use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

pub const TRACE_TARGET: &str = "carte::trace";

/// Receiver of trace lines. Must not block and cannot fail back into the
/// engine; implementations swallow their own errors.
pub trait TraceSink {
    fn emit(&self, message: &str);
}

impl<T: TraceSink + ?Sized> TraceSink for &T {
    fn emit(&self, message: &str) {
        (**self).emit(message)
    }
}

impl<T: TraceSink + ?Sized> TraceSink for Arc<T> {
    fn emit(&self, message: &str) {
        (**self).emit(message)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&self, _message: &str) {}
}

/// Forwards to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTraceSink;

impl TraceSink for LogTraceSink {
    fn emit(&self, message: &str) {
        log::info!(target: TRACE_TARGET, "{message}");
    }
}

/// Bounded in-memory buffer of recent lines, oldest dropped first.
#[derive(Debug)]
pub struct MemoryTraceSink {
    capacity: usize,
    lines: Mutex<VecDeque<String>>,
}

impl MemoryTraceSink {
    pub const DEFAULT_CAPACITY: usize = 500;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            lines: Mutex::new(VecDeque::new()),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl Default for MemoryTraceSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceSink for MemoryTraceSink {
    fn emit(&self, message: &str) {
        // A poisoned buffer only loses trace lines.
        let Ok(mut lines) = self.lines.lock() else {
            return;
        };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(message.to_string());
    }
}

/// Sends every line to both sinks.
#[derive(Debug, Clone, Default)]
pub struct FanoutTraceSink<A, B>(pub A, pub B);

impl<A: TraceSink, B: TraceSink> TraceSink for FanoutTraceSink<A, B> {
    fn emit(&self, message: &str) {
        self.0.emit(message);
        self.1.emit(message);
    }
}

/// A sink gated on the configuration's debug flag. Messages are only
/// formatted when they will actually be emitted, and a failing sink or
/// message never unwinds into the caller.
pub(crate) struct Tracer<'a> {
    sink: &'a dyn TraceSink,
    enabled: bool,
}

impl<'a> Tracer<'a> {
    pub(crate) fn new(sink: &'a dyn TraceSink, enabled: bool) -> Self {
        Self { sink, enabled }
    }

    pub(crate) fn emit(&self, message: impl FnOnce() -> String) {
        if !self.enabled {
            return;
        }
        let sent = catch_unwind(AssertUnwindSafe(|| self.sink.emit(&message())));
        if sent.is_err() {
            log::debug!("Trace sink failed, line dropped");
        }
    }
}

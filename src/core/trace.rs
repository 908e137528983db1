//! Timed trace entries

use super::field::FieldValue;
use super::log_entry::Entry;
use super::logger::Logger;
use super::pool::Reset;
use chrono::{DateTime, Utc};
use std::time::Instant;

/// Pooled state behind an in-flight [`Trace`].
#[derive(Debug, Default)]
pub struct TraceEntry {
    entry: Option<Entry>,
    start: DateTime<Utc>,
    started: Option<Instant>,
}

impl Reset for TraceEntry {
    fn reset(&mut self) {
        self.entry = None;
        self.started = None;
    }
}

/// An in-flight timing measurement.
///
/// Ending it (explicitly with [`end`](Self::end), or by dropping it) appends
/// `start`, `end` and `duration` fields and dispatches the entry at Trace
/// level. It is emitted exactly once.
///
/// ```
/// # use rust_log_router::Logger;
/// let logger = Logger::new();
/// let mut trace = logger.trace("rebuild index");
/// trace.add_field("segments", 12);
/// trace.end();
/// ```
#[must_use = "a trace is emitted when it ends"]
pub struct Trace<'a> {
    logger: &'a Logger,
    state: Option<TraceEntry>,
}

impl<'a> Trace<'a> {
    pub(crate) fn start(logger: &'a Logger, entry: Entry) -> Self {
        let mut state = logger.trace_pool().get();
        state.entry = Some(entry);
        state.start = Utc::now();
        state.started = Some(Instant::now());
        Self {
            logger,
            state: Some(state),
        }
    }

    /// When the trace started (UTC)
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.state.as_ref().map(|state| state.start)
    }

    pub fn add_field(&mut self, key: &str, value: impl Into<FieldValue>) {
        let field = self.logger.field(key, value);
        if let Some(entry) = self.state.as_mut().and_then(|state| state.entry.as_mut()) {
            entry.push_field(field);
        }
    }

    /// Stop the clock and emit the entry.
    pub fn end(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        let Some(mut state) = self.state.take() else {
            return;
        };

        if let Some(mut entry) = state.entry.take() {
            let elapsed = state.started.map(|at| at.elapsed()).unwrap_or_default();
            let end = Utc::now();
            let logger = self.logger;

            entry.push_field(logger.field("start", logger.format_time(&state.start)));
            entry.push_field(logger.field("end", logger.format_time(&end)));
            entry.push_field(logger.field("duration", logger.format_duration(elapsed)));
            logger.handle_entry(entry);
        }

        self.logger.trace_pool().put(state);
    }
}

impl Drop for Trace<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}

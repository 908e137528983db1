//! Log entry structures
//!
//! An [`Entry`] is owned by the producing call site and usually comes from
//! the logger's entry pool. During dispatch every matching handler receives
//! a [`HandlerEntry`]: a by-value copy of the header (level, timestamp,
//! location) that shares the message and fields with the producer's entry. The
//! shared body is only handed back to the pool once every copy is gone.

use super::barrier::CompletionBarrier;
use super::field::Field;
use super::log_level::LogLevel;
use super::pool::Reset;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Message and fields shared read-only between an entry and its copies.
#[derive(Debug, Clone, Default)]
pub struct EntryBody {
    pub(crate) message: String,
    pub(crate) fields: Vec<Field>,
}

static EMPTY_BODY: EntryBody = EntryBody {
    message: String::new(),
    fields: Vec::new(),
};

#[derive(Debug)]
pub struct Entry {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    /// Source file of the call site, empty when not captured
    pub file: &'static str,
    /// Source line of the call site, 0 when not captured
    pub line: u32,
    body: Arc<EntryBody>,
    completion: Arc<CompletionBarrier>,
}

impl Entry {
    /// Build a standalone entry outside of any pool.
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            file: "",
            line: 0,
            body: Arc::new(EntryBody {
                message: message.into(),
                fields: Vec::new(),
            }),
            completion: Arc::new(CompletionBarrier::new()),
        }
    }

    #[must_use]
    pub fn with_location(mut self, file: &'static str, line: u32) -> Self {
        self.file = file;
        self.line = line;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.push_field(field);
        self
    }

    pub fn message(&self) -> &str {
        &self.body.message
    }

    pub fn fields(&self) -> &[Field] {
        &self.body.fields
    }

    pub fn message_mut(&mut self) -> &mut String {
        &mut self.body_mut().message
    }

    pub fn push_field(&mut self, field: Field) {
        self.body_mut().fields.push(field);
    }

    pub(crate) fn body_mut(&mut self) -> &mut EntryBody {
        Arc::make_mut(&mut self.body)
    }

    /// The body, if no handler copy still references it.
    pub(crate) fn unique_body(&mut self) -> Option<&mut EntryBody> {
        Arc::get_mut(&mut self.body)
    }

    pub(crate) fn completion(&self) -> &CompletionBarrier {
        &self.completion
    }

    /// Shallow copy handed to one handler.
    pub(crate) fn copy_for_handler(&self) -> HandlerEntry {
        HandlerEntry {
            level: self.level,
            timestamp: self.timestamp,
            file: self.file,
            line: self.line,
            body: Some(Arc::clone(&self.body)),
            completion: Arc::clone(&self.completion),
        }
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            timestamp: DateTime::<Utc>::default(),
            file: "",
            line: 0,
            body: Arc::new(EntryBody::default()),
            completion: Arc::new(CompletionBarrier::new()),
        }
    }
}

impl Reset for Entry {
    fn reset(&mut self) {
        self.level = LogLevel::default();
        self.file = "";
        self.line = 0;
        match Arc::get_mut(&mut self.body) {
            Some(body) => {
                body.message.clear();
                body.fields.clear();
            }
            None => self.body = Arc::new(EntryBody::default()),
        }
        self.completion.arm(0);
    }
}

/// The copy of an [`Entry`] a handler receives on its channel.
///
/// Header fields are the handler's own and may be modified freely (for
/// example to shorten `file`). Message and fields are shared and read-only.
///
/// Completion is signalled exactly once, either through
/// [`consumed`](Self::consumed) or when the value is dropped, so a handler
/// that panics mid-entry still releases the producer. Keeping a
/// `HandlerEntry` alive holds up the producing call site.
#[derive(Debug)]
pub struct HandlerEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    pub file: &'static str,
    pub line: u32,
    body: Option<Arc<EntryBody>>,
    completion: Arc<CompletionBarrier>,
}

impl HandlerEntry {
    pub fn message(&self) -> &str {
        &self.body().message
    }

    pub fn fields(&self) -> &[Field] {
        &self.body().fields
    }

    /// `(file, line)` when the call site was captured.
    pub fn location(&self) -> Option<(&'static str, u32)> {
        (self.line != 0).then_some((self.file, self.line))
    }

    /// Signal that this handler is finished with the entry.
    pub fn consumed(self) {}

    fn body(&self) -> &EntryBody {
        self.body.as_deref().unwrap_or(&EMPTY_BODY)
    }
}

impl Drop for HandlerEntry {
    fn drop(&mut self) {
        // Release the shared body first so the producer finds it unique.
        self.body.take();
        self.completion.done();
    }
}

impl From<Entry> for HandlerEntry {
    /// Detached copy, not tied to any dispatch.
    fn from(entry: Entry) -> Self {
        entry.copy_for_handler()
    }
}

//! Fields bound to the next level call

use super::error::PanicSignal;
use super::field::FieldValue;
use super::log_entry::Entry;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::trace::Trace;
use std::fmt;

/// Returned by [`Logger::with_fields`].
///
/// Holds a pooled entry pre-loaded with fields; the first level call fills
/// in level, message, timestamp and location and dispatches it. Dropping it
/// without a level call recycles the entry and fields without logging.
#[must_use = "fields are only logged by a level call"]
pub struct FieldLogger<'a> {
    logger: &'a Logger,
    entry: Option<Entry>,
}

impl<'a> FieldLogger<'a> {
    pub(crate) fn new(logger: &'a Logger, entry: Entry) -> Self {
        Self {
            logger,
            entry: Some(entry),
        }
    }

    /// Add one more field from the logger's pool.
    pub fn field(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        let field = self.logger.field(key, value);
        if let Some(entry) = self.entry.as_mut() {
            entry.push_field(field);
        }
        self
    }

    #[track_caller]
    pub fn log(mut self, level: LogLevel, message: impl fmt::Display) {
        if let Some(mut entry) = self.entry.take() {
            self.logger.fill_entry(&mut entry, level, message);
            self.logger.handle_entry(entry);
        }
    }

    #[track_caller]
    pub fn debug(self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    #[track_caller]
    pub fn info(self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    #[track_caller]
    pub fn notice(self, message: impl fmt::Display) {
        self.log(LogLevel::Notice, message);
    }

    #[track_caller]
    pub fn warn(self, message: impl fmt::Display) {
        self.log(LogLevel::Warn, message);
    }

    #[track_caller]
    pub fn error(self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }

    #[track_caller]
    pub fn alert(self, message: impl fmt::Display) {
        self.log(LogLevel::Alert, message);
    }

    /// See [`Logger::fatal`].
    #[track_caller]
    pub fn fatal(self, message: impl fmt::Display) {
        let logger = self.logger;
        self.log(LogLevel::Fatal, message);
        logger.exit(1);
    }

    /// See [`Logger::panic`].
    #[track_caller]
    pub fn panic(self, message: impl fmt::Display) -> ! {
        let message = message.to_string();
        self.log(LogLevel::Error, &message);
        std::panic::panic_any(PanicSignal { message })
    }

    /// Start a trace that carries the bound fields.
    #[track_caller]
    pub fn trace(mut self, message: impl fmt::Display) -> Trace<'a> {
        let logger = self.logger;
        let mut entry = self.entry.take().unwrap_or_default();
        logger.fill_entry(&mut entry, LogLevel::Trace, message);
        Trace::start(logger, entry)
    }
}

impl Drop for FieldLogger<'_> {
    fn drop(&mut self) {
        if let Some(entry) = self.entry.take() {
            self.logger.reclaim(entry);
        }
    }
}

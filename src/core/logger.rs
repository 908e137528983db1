//! Main logger implementation: routing, fan-out dispatch and the leveled API

use super::{
    error::{LoggerError, PanicSignal, Result},
    field::{Field, FieldValue},
    field_logger::FieldLogger,
    handler::Handler,
    log_entry::Entry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    pool::{Pool, PoolStats, DEFAULT_POOL_CAPACITY},
    routing::RoutingTable,
    timestamp::TimestampFormat,
    trace::{Trace, TraceEntry},
};
use chrono::{DateTime, Utc};
use crossbeam_channel::SendTimeoutError;
use parking_lot::RwLock;
use std::fmt::{self, Write as _};
use std::panic::Location;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Renders the elapsed time of a finished [`Trace`].
pub type DurationFormatFn = Arc<dyn Fn(Duration) -> String + Send + Sync>;

/// Called with the exit status after a fatal entry has been delivered.
pub type ExitHook = Arc<dyn Fn(i32) + Send + Sync>;

/// Appended to a message whose `Display` implementation failed.
const BAD_MESSAGE: &str = "%!(BADMESSAGE)";

/// Default trace duration rendering, e.g. `1.5ms` or `2.000013s`
pub fn default_duration_format(elapsed: Duration) -> String {
    format!("{:?}", elapsed)
}

/// The event router.
///
/// Entries built through the leveled methods are delivered to every handler
/// registered for their level. A call returns once every one of those
/// handlers has released its copy, after which the entry and its fields go
/// back to the logger's pools.
///
/// One logger is normally built at startup and shared (`Arc<Logger>`, or
/// [`set_global_logger`](crate::set_global_logger)).
///
/// # Example
///
/// ```
/// use rust_log_router::prelude::*;
///
/// let logger = Logger::new();
/// logger.register_handler(
///     ConsoleHandler::new().with_writer(std::io::sink()),
///     &[LogLevel::Info, LogLevel::Warn, LogLevel::Error],
/// ).unwrap();
///
/// logger.info("server started");
/// logger.with_fields([logger.field("port", 8080)]).info("listening");
///
/// let trace = logger.trace("warm cache");
/// trace.end();
/// ```
pub struct Logger {
    routes: RoutingTable,
    field_pool: Pool<Field>,
    entry_pool: Pool<Entry>,
    trace_pool: Pool<TraceEntry>,
    duration_fn: RwLock<DurationFormatFn>,
    time_format: RwLock<TimestampFormat>,
    capture_location: bool,
    completion_timeout: Option<Duration>,
    exit_hook: ExitHook,
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        let builder = LoggerBuilder::new();
        Self::configured(
            builder.time_format,
            builder.duration_fn,
            builder.capture_location,
            builder.completion_timeout,
            builder.exit_hook,
            builder.pool_capacity,
        )
    }

    fn configured(
        time_format: TimestampFormat,
        duration_fn: DurationFormatFn,
        capture_location: bool,
        completion_timeout: Option<Duration>,
        exit_hook: ExitHook,
        pool_capacity: usize,
    ) -> Self {
        Self {
            routes: RoutingTable::new(),
            field_pool: Pool::new(pool_capacity),
            entry_pool: Pool::new(pool_capacity),
            trace_pool: Pool::new(pool_capacity),
            duration_fn: RwLock::new(duration_fn),
            time_format: RwLock::new(time_format),
            capture_location,
            completion_timeout,
            exit_hook,
            metrics: LoggerMetrics::new(),
        }
    }

    /// Start `handler` and route the given levels to it.
    ///
    /// `Handler::run` is called exactly once. Registering while other threads
    /// log is allowed; entries already in flight keep the route list they
    /// started with.
    pub fn register_handler<H: Handler>(&self, mut handler: H, levels: &[LogLevel]) -> Result<()> {
        let sender = handler.run(self)?;
        self.routes.register(&sender, levels);
        Ok(())
    }

    /// Number of handlers an entry at `level` is delivered to
    pub fn handler_count(&self, level: LogLevel) -> usize {
        self.routes.handler_count(level)
    }

    /// Replace the function used to render trace durations.
    pub fn register_duration_func<F>(&self, format: F)
    where
        F: Fn(Duration) -> String + Send + Sync + 'static,
    {
        *self.duration_fn.write() = Arc::new(format);
    }

    /// Set the format of the `start`/`end` fields attached to traces.
    pub fn set_time_format(&self, format: TimestampFormat) {
        *self.time_format.write() = format;
    }

    pub fn time_format(&self) -> TimestampFormat {
        self.time_format.read().clone()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn pool_stats(&self) -> PoolStats {
        PoolStats {
            idle_fields: self.field_pool.idle(),
            idle_entries: self.entry_pool.idle(),
            idle_traces: self.trace_pool.idle(),
            entry_hits: self.entry_pool.hits(),
            entry_misses: self.entry_pool.misses(),
        }
    }

    /// A field taken from the field pool.
    pub fn field(&self, key: &str, value: impl Into<FieldValue>) -> Field {
        let mut field = self.field_pool.get();
        field.key.push_str(key);
        field.value = value.into();
        field
    }

    /// A pooled entry for callers that build entries by hand and pass them
    /// to [`handle_entry`](Self::handle_entry).
    #[track_caller]
    pub fn new_entry(&self, level: LogLevel, message: impl fmt::Display) -> Entry {
        let mut entry = self.entry_pool.get();
        self.fill_entry(&mut entry, level, message);
        entry
    }

    #[track_caller]
    pub(crate) fn fill_entry(&self, entry: &mut Entry, level: LogLevel, message: impl fmt::Display) {
        entry.level = level;
        entry.timestamp = Utc::now();
        if self.capture_location {
            let caller = Location::caller();
            entry.file = caller.file();
            entry.line = caller.line();
        }

        let buf = entry.message_mut();
        buf.clear();
        if write!(buf, "{}", message).is_err() {
            buf.push_str(BAD_MESSAGE);
        }
    }

    /// Deliver `entry` to every handler registered for its level, wait for
    /// all of them to finish with it, then recycle it.
    ///
    /// With no handler on the level the entry is dropped and recycled at once.
    /// Sends block while a handler's channel is full.
    pub fn handle_entry(&self, entry: Entry) {
        let channels = self.routes.channels(entry.level);
        if channels.is_empty() {
            self.metrics.record_unrouted();
            self.reclaim(entry);
            return;
        }

        let deadline = self.completion_timeout.map(|timeout| Instant::now() + timeout);
        let mut delivered_all = true;

        entry.completion().arm(channels.len());
        for channel in channels.iter() {
            // A copy that comes back undelivered is dropped here, which
            // counts as its completion.
            let copy = entry.copy_for_handler();
            match deadline {
                None => {
                    let _ = channel.send(copy);
                }
                Some(deadline) => {
                    if let Err(SendTimeoutError::Timeout(_)) = channel.send_deadline(copy, deadline) {
                        delivered_all = false;
                    }
                }
            }
        }

        let completed = match deadline {
            None => {
                entry.completion().wait();
                true
            }
            Some(deadline) => entry
                .completion()
                .wait_timeout(deadline.saturating_duration_since(Instant::now())),
        };

        if completed && delivered_all {
            self.metrics.record_dispatched(channels.len());
        } else {
            self.report_stall(&entry);
        }

        if completed {
            self.reclaim(entry);
        }
        // Otherwise the stalled handlers still share the body; it is freed
        // when the last of them lets go.
    }

    fn report_stall(&self, entry: &Entry) {
        let stalled = self.metrics.record_stalled();
        if stalled == 0 || (stalled + 1) % 1000 == 0 {
            eprintln!(
                "[LOGGER WARNING] {} (stalled dispatches so far: {}).",
                LoggerError::handler_stalled(entry.level, entry.completion().pending()),
                stalled + 1
            );
        }
    }

    /// Return the entry's fields and the entry itself to their pools.
    pub(crate) fn reclaim(&self, mut entry: Entry) {
        match entry.unique_body() {
            Some(body) => {
                for field in body.fields.drain(..) {
                    self.field_pool.put(field);
                }
            }
            None => return,
        }
        self.entry_pool.put(entry);
    }

    pub(crate) fn trace_pool(&self) -> &Pool<TraceEntry> {
        &self.trace_pool
    }

    pub(crate) fn format_time(&self, datetime: &DateTime<Utc>) -> String {
        self.time_format.read().format(datetime)
    }

    pub(crate) fn format_duration(&self, elapsed: Duration) -> String {
        (self.duration_fn.read())(elapsed)
    }

    pub(crate) fn exit(&self, code: i32) {
        (self.exit_hook)(code);
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        let entry = self.new_entry(level, message);
        self.handle_entry(entry);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn notice(&self, message: impl fmt::Display) {
        self.log(LogLevel::Notice, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    #[track_caller]
    pub fn alert(&self, message: impl fmt::Display) {
        self.log(LogLevel::Alert, message);
    }

    /// Log at Fatal level, then terminate the process with status 1.
    ///
    /// Termination happens only after every handler has released the entry.
    /// The default exit hook is `std::process::exit`; this method returns only
    /// when a custom [`LoggerBuilder::exit_hook`] does.
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(LogLevel::Fatal, message);
        self.exit(1);
    }

    /// Log at Error level, then unwind with a [`PanicSignal`] carrying the
    /// message.
    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display) -> ! {
        let message = message.to_string();
        self.log(LogLevel::Error, &message);
        std::panic::panic_any(PanicSignal { message })
    }

    /// Start timing an operation. The Trace entry is emitted when the
    /// returned handle ends.
    #[track_caller]
    pub fn trace(&self, message: impl fmt::Display) -> Trace<'_> {
        let entry = self.new_entry(LogLevel::Trace, message);
        Trace::start(self, entry)
    }

    /// Bind fields to the next level call.
    ///
    /// ```
    /// # use rust_log_router::Logger;
    /// let logger = Logger::new();
    /// logger
    ///     .with_fields([logger.field("user", "ada")])
    ///     .field("attempt", 3)
    ///     .warn("login failed");
    /// ```
    pub fn with_fields<I>(&self, fields: I) -> FieldLogger<'_>
    where
        I: IntoIterator<Item = Field>,
    {
        let mut entry = self.entry_pool.get();
        for field in fields {
            entry.push_field(field);
        }
        FieldLogger::new(self, entry)
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let stalled = self.metrics.stalled();
        if stalled > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down after {} stalled dispatches",
                stalled
            );
        }
    }
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// # Example
/// ```
/// use rust_log_router::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .time_format(TimestampFormat::Iso8601Micros)
///     .completion_timeout(Duration::from_secs(5))
///     .handler(ConsoleHandler::new().with_colors(false), &LogLevel::ALL)
///     .build()
///     .unwrap();
/// logger.info("ready");
/// ```
pub struct LoggerBuilder {
    time_format: TimestampFormat,
    duration_fn: DurationFormatFn,
    capture_location: bool,
    completion_timeout: Option<Duration>,
    exit_hook: ExitHook,
    pool_capacity: usize,
    handlers: Vec<(Box<dyn Handler>, Vec<LogLevel>)>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            time_format: TimestampFormat::default(),
            duration_fn: Arc::new(default_duration_format),
            capture_location: true,
            completion_timeout: None,
            exit_hook: Arc::new(|code: i32| {
                std::process::exit(code);
            }),
            pool_capacity: DEFAULT_POOL_CAPACITY,
            handlers: Vec::new(),
        }
    }

    /// Format of the `start`/`end` trace fields
    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: TimestampFormat) -> Self {
        self.time_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn duration_func<F>(mut self, format: F) -> Self
    where
        F: Fn(Duration) -> String + Send + Sync + 'static,
    {
        self.duration_fn = Arc::new(format);
        self
    }

    /// Record the caller's file and line on each entry (default: on)
    #[must_use = "builder methods return a new value"]
    pub fn capture_location(mut self, capture: bool) -> Self {
        self.capture_location = capture;
        self
    }

    /// Bound how long a call waits for its handlers.
    ///
    /// Without a timeout (the default) a handler that never releases an entry
    /// blocks its producers forever. With one, the call gives up after
    /// `timeout`, counts a stalled dispatch and abandons the entry to the
    /// handlers instead of recycling it.
    #[must_use = "builder methods return a new value"]
    pub fn completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = Some(timeout);
        self
    }

    /// Replace `std::process::exit` as the action taken after a fatal entry
    #[must_use = "builder methods return a new value"]
    pub fn exit_hook(mut self, hook: ExitHook) -> Self {
        self.exit_hook = hook;
        self
    }

    /// Maximum idle items kept by each pool
    #[must_use = "builder methods return a new value"]
    pub fn pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// Register `handler` for `levels` when the logger is built
    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(mut self, handler: H, levels: &[LogLevel]) -> Self {
        self.handlers.push((Box::new(handler), levels.to_vec()));
        self
    }

    /// Build the logger and start its handlers in registration order
    pub fn build(self) -> Result<Logger> {
        let logger = Logger::configured(
            self.time_format,
            self.duration_fn,
            self.capture_location,
            self.completion_timeout,
            self.exit_hook,
            self.pool_capacity,
        );
        for (handler, levels) in self.handlers {
            logger.register_handler(handler, &levels)?;
        }
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Console handler
//!
//! Entries are formatted by a pool of worker threads sharing one bounded
//! channel. Each rendered line reaches the writer with a single `write_all`
//! under the writer lock, so lines from different workers never interleave.

use super::format::{text_formatter_factory, FormatSettings, Formatter, FormatterFactory};
use crate::core::{
    Handler, HandlerEntry, HandlerMetrics, LogLevel, Logger, LoggerError, Result, TimestampFormat,
};
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

const INVALID_WORKERS: &str = "Invalid number of workers specified, setting to 1";

/// Environment variable consulted for the root prefix in [`FileDisplay::Long`] mode
pub const SOURCE_ROOT_ENV: &str = "CARGO_MANIFEST_DIR";

/// How the call-site file is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileDisplay {
    /// No file or line
    Omit,
    /// Last path segment, e.g. `conn.rs:42`
    #[default]
    Short,
    /// Path relative to the source root, e.g. `src/net/conn.rs:42`
    Long,
}

impl FileDisplay {
    /// The file name to print for `file` in this mode.
    pub fn apply(self, file: &'static str, root: &str) -> &'static str {
        match self {
            FileDisplay::Omit => "",
            FileDisplay::Short => file.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(file),
            FileDisplay::Long => file.strip_prefix(root).unwrap_or(file),
        }
    }
}

/// Console handler settings, loadable from JSON
///
/// ```
/// use rust_log_router::handlers::console::{ConsoleConfig, FileDisplay};
///
/// let config = ConsoleConfig::from_json(r#"{"workers": 4, "file_display": "long"}"#).unwrap();
/// assert_eq!(config.workers, 4);
/// assert_eq!(config.file_display, FileDisplay::Long);
/// assert!(config.display_color);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub timestamp_format: TimestampFormat,
    pub display_color: bool,
    pub file_display: FileDisplay,
    /// Channel capacity; 0 hands each entry directly to a worker
    pub buffer_size: usize,
    pub workers: usize,
    /// Prefix stripped in [`FileDisplay::Long`] mode
    pub source_root: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            timestamp_format: TimestampFormat::Rfc3339Nanos,
            display_color: true,
            file_display: FileDisplay::Short,
            buffer_size: 0,
            workers: 1,
            source_root: None,
        }
    }
}

impl ConsoleConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.timestamp_format.is_valid() {
            return Err(LoggerError::config(
                "ConsoleConfig",
                format!("unknown specifier in timestamp format {:?}", self.timestamp_format),
            ));
        }
        Ok(())
    }
}

/// Escape sequences for every level: the level's foreground color, with
/// underline on Alert and underline plus blink on Fatal.
pub fn default_level_colors() -> [String; LogLevel::COUNT] {
    LogLevel::ALL.map(|level| {
        let mut codes = level.color_code().to_fg_str().into_owned();
        match level {
            LogLevel::Alert => codes.push_str(";4"),
            LogLevel::Fatal => codes.push_str(";4;5"),
            _ => {}
        }
        format!("\x1b[{}m", codes)
    })
}

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Writes formatted entries to a terminal (stderr by default) or any writer.
///
/// # Example
///
/// ```
/// use rust_log_router::prelude::*;
/// use rust_log_router::handlers::console::FileDisplay;
///
/// let console = ConsoleHandler::new()
///     .with_colors(false)
///     .with_file_display(FileDisplay::Omit)
///     .with_buffers_and_workers(64, 2)
///     .with_writer(std::io::sink());
///
/// let logger = Logger::new();
/// logger.register_handler(console, &LogLevel::ALL).unwrap();
/// logger.info("ready");
/// ```
pub struct ConsoleHandler {
    config: ConsoleConfig,
    colors: [String; LogLevel::COUNT],
    writer: SharedWriter,
    formatter_factory: FormatterFactory,
    metrics: Arc<HandlerMetrics>,
    workers_corrected: bool,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self {
            config: ConsoleConfig::default(),
            colors: default_level_colors(),
            writer: Arc::new(Mutex::new(Box::new(io::stderr()))),
            formatter_factory: text_formatter_factory(),
            metrics: Arc::new(HandlerMetrics::new()),
            workers_corrected: false,
        }
    }

    pub fn from_config(config: ConsoleConfig) -> Self {
        let (buffer_size, workers) = (config.buffer_size, config.workers);
        let handler = Self {
            config,
            ..Self::new()
        };
        handler.with_buffers_and_workers(buffer_size, workers)
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Shared counters of this handler's workers
    pub fn metrics(&self) -> Arc<HandlerMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Replace the output stream.
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.writer = Arc::new(Mutex::new(Box::new(writer)));
        self
    }

    #[must_use]
    pub fn with_colors(mut self, display_color: bool) -> Self {
        self.config.display_color = display_color;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    /// Set a custom strftime timestamp format
    ///
    /// ```
    /// use rust_log_router::handlers::ConsoleHandler;
    ///
    /// let console = ConsoleHandler::new().with_custom_timestamp("%d/%b/%Y:%H:%M:%S %z");
    /// ```
    #[must_use]
    pub fn with_custom_timestamp(mut self, format: &str) -> Self {
        self.config.timestamp_format = TimestampFormat::Custom(format.to_string());
        self
    }

    #[must_use]
    pub fn with_file_display(mut self, display: FileDisplay) -> Self {
        self.config.file_display = display;
        self
    }

    #[must_use]
    pub fn with_source_root(mut self, root: impl Into<String>) -> Self {
        self.config.source_root = Some(root.into());
        self
    }

    /// Channel capacity and number of worker threads.
    ///
    /// Zero workers is corrected to one, with a warning on stderr now and
    /// through the logger once the handler is registered.
    #[must_use]
    pub fn with_buffers_and_workers(mut self, size: usize, workers: usize) -> Self {
        self.config.buffer_size = size;
        self.workers_corrected = workers == 0;
        if self.workers_corrected {
            eprintln!("[LOGGER WARNING] {}", INVALID_WORKERS);
            self.config.workers = 1;
        } else {
            self.config.workers = workers;
        }
        self
    }

    #[must_use]
    pub fn with_formatter_factory(mut self, factory: FormatterFactory) -> Self {
        self.formatter_factory = factory;
        self
    }

    /// Replace the escape sequence used for one level.
    #[must_use]
    pub fn with_level_color(mut self, level: LogLevel, escape: impl Into<String>) -> Self {
        self.colors[level.index()] = escape.into();
        self
    }

    fn source_root(&self) -> String {
        if self.config.file_display != FileDisplay::Long {
            return String::new();
        }
        let mut root = self
            .config
            .source_root
            .clone()
            .or_else(|| std::env::var(SOURCE_ROOT_ENV).ok())
            .unwrap_or_default();
        if !root.is_empty() && !root.ends_with('/') {
            root.push('/');
        }
        root
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn run(&mut self, logger: &Logger) -> Result<Sender<HandlerEntry>> {
        if self.workers_corrected {
            logger.warn(INVALID_WORKERS);
        }

        let settings = Arc::new(FormatSettings {
            timestamp_format: self.config.timestamp_format.clone(),
            display_color: self.config.display_color,
            colors: self.colors.clone(),
        });
        let output = Arc::new(ConsoleOutput {
            writer: Arc::clone(&self.writer),
            file_display: self.config.file_display,
            source_root: self.source_root(),
            metrics: Arc::clone(&self.metrics),
        });

        let (tx, rx) = bounded(self.config.buffer_size);
        for id in 0..self.config.workers.max(1) {
            let formatter = (self.formatter_factory)(Arc::clone(&settings));
            let entries = rx.clone();
            let output = Arc::clone(&output);
            thread::Builder::new()
                .name(format!("console-log-{}", id))
                .spawn(move || output.drain(entries, formatter))
                .map_err(|e| LoggerError::handler_start(self.name(), e))?;
        }
        Ok(tx)
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// State shared by the workers of one console handler
struct ConsoleOutput {
    writer: SharedWriter,
    file_display: FileDisplay,
    source_root: String,
    metrics: Arc<HandlerMetrics>,
}

impl ConsoleOutput {
    fn drain(&self, entries: Receiver<HandlerEntry>, mut formatter: Box<dyn Formatter>) {
        for mut entry in entries.iter() {
            entry.file = self.file_display.apply(entry.file, &self.source_root);
            if self.file_display == FileDisplay::Omit {
                entry.line = 0;
            }

            let urgent = entry.level >= LogLevel::Error;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                let line = formatter.format(&entry);
                self.write_line(line, urgent, &entries)
            }));

            match outcome {
                Ok(Ok(())) => {
                    self.metrics.record_written();
                }
                Ok(Err(e)) => self.report_write_error(&e),
                Err(panic_info) => {
                    self.metrics.record_format_panic();
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Console formatter panicked: {}. Entry skipped.",
                        panic_msg
                    );
                }
            }

            entry.consumed();
        }
    }

    /// Writes one line, flushing for urgent entries or when nothing is queued.
    ///
    /// The queue is checked after the write while the lock is held, so the
    /// last worker to write always flushes.
    fn write_line(
        &self,
        line: &[u8],
        urgent: bool,
        entries: &Receiver<HandlerEntry>,
    ) -> Result<()> {
        let mut writer = self.writer.lock();
        writer
            .write_all(line)
            .map_err(|e| LoggerError::io_operation("write", "console output", e))?;
        if urgent || entries.is_empty() {
            writer
                .flush()
                .map_err(|e| LoggerError::io_operation("flush", "console output", e))?;
        }
        Ok(())
    }

    fn report_write_error(&self, err: &LoggerError) {
        let failures = self.metrics.record_write_error();
        if failures == 0 || (failures + 1) % 1000 == 0 {
            eprintln!(
                "[LOGGER ERROR] Console write failed ({} failures so far): {}",
                failures + 1,
                err
            );
        }
    }
}

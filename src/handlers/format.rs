//! Entry formatters
//!
//! A handler asks its [`FormatterFactory`] for one [`Formatter`] per worker,
//! so each formatter owns its scratch buffer and reuses it for every entry.

use crate::core::{HandlerEntry, LogLevel, TimestampFormat};
use std::io::Write;
use std::sync::Arc;

/// ANSI reset sequence written after a colored token
pub const RESET: &str = "\x1b[0m";

/// Column width of the level name
pub const LEVEL_WIDTH: usize = 6;

pub trait Formatter: Send {
    /// Render `entry` as one complete output line, including the newline.
    fn format(&mut self, entry: &HandlerEntry) -> &[u8];
}

/// Builds a fresh formatter for each worker of a handler.
pub type FormatterFactory = Arc<dyn Fn(Arc<FormatSettings>) -> Box<dyn Formatter> + Send + Sync>;

/// Settings shared by every formatter of one handler
#[derive(Debug, Clone, PartialEq)]
pub struct FormatSettings {
    pub timestamp_format: TimestampFormat,
    pub display_color: bool,
    /// Escape sequence per level, indexed by [`LogLevel::index`]
    pub colors: [String; LogLevel::COUNT],
}

impl FormatSettings {
    /// Plain (uncolored) settings
    pub fn plain(timestamp_format: TimestampFormat) -> Self {
        Self {
            timestamp_format,
            display_color: false,
            colors: Default::default(),
        }
    }
}

pub fn text_formatter_factory() -> FormatterFactory {
    Arc::new(|settings: Arc<FormatSettings>| -> Box<dyn Formatter> {
        Box::new(TextFormatter::new(settings))
    })
}

pub fn json_formatter_factory() -> FormatterFactory {
    Arc::new(|settings: Arc<FormatSettings>| -> Box<dyn Formatter> {
        Box::new(JsonFormatter::new(settings))
    })
}

/// `<timestamp> <LEVEL > <file:line >message key=value...`
pub struct TextFormatter {
    settings: Arc<FormatSettings>,
    buf: Vec<u8>,
}

impl TextFormatter {
    pub fn new(settings: Arc<FormatSettings>) -> Self {
        Self {
            settings,
            buf: Vec::with_capacity(256),
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&mut self, entry: &HandlerEntry) -> &[u8] {
        let settings = &self.settings;
        let buf = &mut self.buf;
        buf.clear();

        let color = settings
            .display_color
            .then(|| settings.colors[entry.level.index()].as_bytes());

        settings.timestamp_format.write_to(&entry.timestamp, buf);
        buf.push(b' ');

        let level = entry.level.to_str();
        if let Some(color) = color {
            buf.extend_from_slice(color);
        }
        buf.extend_from_slice(level.as_bytes());
        buf.resize(buf.len() + LEVEL_WIDTH.saturating_sub(level.len()), b' ');
        if color.is_some() {
            buf.extend_from_slice(RESET.as_bytes());
        }
        buf.push(b' ');

        if let Some((file, line)) = entry.location() {
            buf.extend_from_slice(file.as_bytes());
            buf.push(b':');
            let _ = write!(buf, "{}", line);
            buf.push(b' ');
        }

        buf.extend_from_slice(entry.message().as_bytes());

        for field in entry.fields() {
            buf.push(b' ');
            if let Some(color) = color {
                buf.extend_from_slice(color);
                buf.extend_from_slice(field.key.as_bytes());
                buf.extend_from_slice(RESET.as_bytes());
            } else {
                buf.extend_from_slice(field.key.as_bytes());
            }
            buf.push(b'=');
            let _ = field.value.write_to(buf);
        }

        buf.push(b'\n');
        buf
    }
}

/// One JSON object per line
pub struct JsonFormatter {
    settings: Arc<FormatSettings>,
    buf: Vec<u8>,
}

impl JsonFormatter {
    pub fn new(settings: Arc<FormatSettings>) -> Self {
        Self {
            settings,
            buf: Vec::with_capacity(256),
        }
    }
}

impl Formatter for JsonFormatter {
    fn format(&mut self, entry: &HandlerEntry) -> &[u8] {
        use serde_json::{Map, Value};

        self.buf.clear();

        let format = &self.settings.timestamp_format;
        let timestamp = format.format(&entry.timestamp);
        let timestamp = match timestamp.parse::<i64>() {
            Ok(numeric) if format.is_numeric() => Value::from(numeric),
            _ => Value::String(timestamp),
        };

        let mut object = Map::new();
        object.insert("timestamp".to_string(), timestamp);
        object.insert("level".to_string(), Value::from(entry.level.to_str()));
        object.insert("message".to_string(), Value::from(entry.message()));
        if let Some((file, line)) = entry.location() {
            object.insert("file".to_string(), Value::from(file));
            object.insert("line".to_string(), Value::from(line));
        }
        if !entry.fields().is_empty() {
            let fields: Map<String, Value> = entry
                .fields()
                .iter()
                .map(|field| (field.key.clone(), field.value.to_json_value()))
                .collect();
            object.insert("fields".to_string(), Value::Object(fields));
        }

        if serde_json::to_writer(&mut self.buf, &Value::Object(object)).is_err() {
            self.buf.clear();
            self.buf.extend_from_slice(br#"{"message":"unserializable entry"}"#);
        }
        self.buf.push(b'\n');
        &self.buf
    }
}

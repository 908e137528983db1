//! Timestamp formatting
//!
//! Formats are written straight into a caller-provided byte buffer so that
//! handler workers can render timestamps without allocating.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Written in place of a timestamp whose custom format string is invalid.
pub const BAD_FORMAT: &str = "%!(BADTIMEFORMAT)";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use rust_log_router::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::default().format(&at), "2025-01-08T10:30:45.000000000Z");
///
/// let date_only = TimestampFormat::Custom("%Y-%m-%d".to_string());
/// assert_eq!(date_only.format(&at), "2025-01-08");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with nanoseconds: `2025-01-08T10:30:45.123456789Z`
    #[default]
    Rfc3339Nanos,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 with offset: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, e.g. `%Y-%m-%dT%H:%M:%SZ`
    Custom(String),
}

impl TimestampFormat {
    /// Append the formatted `datetime` to `buf`.
    ///
    /// An invalid custom format leaves [`BAD_FORMAT`] in the buffer instead.
    pub fn write_to(&self, datetime: &DateTime<Utc>, buf: &mut Vec<u8>) {
        let start = buf.len();
        let written = match self {
            TimestampFormat::Rfc3339Nanos => {
                write!(buf, "{}", datetime.format("%Y-%m-%dT%H:%M:%S%.9fZ"))
            }
            TimestampFormat::Iso8601 => {
                write!(buf, "{}", datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
            }
            TimestampFormat::Iso8601Micros => {
                write!(buf, "{}", datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ"))
            }
            TimestampFormat::Rfc3339 => {
                write!(buf, "{}", datetime.format("%Y-%m-%dT%H:%M:%S%.f%:z"))
            }
            TimestampFormat::Unix => write!(buf, "{}", datetime.timestamp()),
            TimestampFormat::UnixMillis => write!(buf, "{}", datetime.timestamp_millis()),
            TimestampFormat::Custom(format_str) if self.is_valid() => {
                write!(buf, "{}", datetime.format(format_str))
            }
            TimestampFormat::Custom(_) => Err(io::ErrorKind::InvalidInput.into()),
        };

        if written.is_err() {
            buf.truncate(start);
            buf.extend_from_slice(BAD_FORMAT.as_bytes());
        }
    }

    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        let mut buf = Vec::with_capacity(32);
        self.write_to(datetime, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Whether a custom format string only uses known specifiers
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            TimestampFormat::Custom(format_str) => StrftimeItems::new(format_str)
                .all(|item| !matches!(item, Item::Error)),
            _ => true,
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_rfc3339_nanos_format() {
        let result = TimestampFormat::Rfc3339Nanos.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123456000Z");
    }

    #[test]
    fn test_rfc3339_shapes_match_chrono() {
        use chrono::SecondsFormat;

        let whole = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).single().unwrap();
        for datetime in [fixed_datetime(), whole, whole + chrono::Duration::nanoseconds(7)] {
            assert_eq!(
                TimestampFormat::Rfc3339Nanos.format(&datetime),
                datetime.to_rfc3339_opts(SecondsFormat::Nanos, true)
            );
            assert_eq!(TimestampFormat::Rfc3339.format(&datetime), datetime.to_rfc3339());
        }
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_iso8601_micros_format() {
        let result = TimestampFormat::Iso8601Micros.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123456Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.ends_with("+00:00"));
    }

    #[test]
    fn test_unix_formats() {
        let seconds: i64 = TimestampFormat::Unix.format(&fixed_datetime()).parse().unwrap();
        let millis: i64 = TimestampFormat::UnixMillis
            .format(&fixed_datetime())
            .parse()
            .unwrap();
        assert_eq!(seconds, 1736332245);
        assert_eq!(millis, 1736332245123);
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y-%m-%dT%H:%M:%SZ".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025-01-08T10:30:45Z");
    }

    #[test]
    fn test_invalid_custom_format_is_inline_diagnostic() {
        let format = TimestampFormat::Custom("%Y %Q".to_string());
        let mut buf = b"prefix ".to_vec();
        format.write_to(&fixed_datetime(), &mut buf);
        assert_eq!(buf, format!("prefix {}", BAD_FORMAT).into_bytes());
    }

    #[test]
    fn test_is_valid() {
        assert!(TimestampFormat::Rfc3339Nanos.is_valid());
        assert!(TimestampFormat::Custom("%H:%M:%S%.3f".to_string()).is_valid());
        assert!(!TimestampFormat::Custom("%Y %Q".to_string()).is_valid());
    }

    #[test]
    fn test_write_to_appends() {
        let mut buf = b"[".to_vec();
        TimestampFormat::Unix.write_to(&fixed_datetime(), &mut buf);
        buf.push(b']');
        assert_eq!(buf, b"[1736332245]");
    }

    #[test]
    fn test_is_numeric() {
        assert!(TimestampFormat::Unix.is_numeric());
        assert!(TimestampFormat::UnixMillis.is_numeric());
        assert!(!TimestampFormat::Rfc3339Nanos.is_numeric());
        assert!(!TimestampFormat::Custom("%s".to_string()).is_numeric());
    }

    #[test]
    fn test_serde_roundtrip_shapes() {
        let json = serde_json::to_string(&TimestampFormat::Iso8601).unwrap();
        assert_eq!(json, "\"Iso8601\"");

        let format: TimestampFormat = serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).unwrap();
        assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    }
}

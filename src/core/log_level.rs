//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of an entry, also the routing key of the handler table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Trace = 1,
    #[default]
    Info = 2,
    Notice = 3,
    Warn = 4,
    Error = 5,
    Panic = 6,
    Alert = 7,
    Fatal = 8,
}

impl LogLevel {
    pub const COUNT: usize = 9;

    pub const ALL: [LogLevel; LogLevel::COUNT] = [
        LogLevel::Debug,
        LogLevel::Trace,
        LogLevel::Info,
        LogLevel::Notice,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Panic,
        LogLevel::Alert,
        LogLevel::Fatal,
    ];

    /// Stable slot of this level in per-level tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
            LogLevel::Info => "INFO",
            LogLevel::Notice => "NOTICE",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Panic => "PANIC",
            LogLevel::Alert => "ALERT",
            LogLevel::Fatal => "FATAL",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Green,
            LogLevel::Trace => White,
            LogLevel::Info => Blue,
            LogLevel::Notice => BrightCyan,
            LogLevel::Warn => Yellow,
            LogLevel::Error => BrightRed,
            LogLevel::Panic | LogLevel::Alert | LogLevel::Fatal => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            "INFO" => Ok(LogLevel::Info),
            "NOTICE" => Ok(LogLevel::Notice),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "PANIC" => Ok(LogLevel::Panic),
            "ALERT" => Ok(LogLevel::Alert),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, level) in LogLevel::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
        }
    }

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Debug < LogLevel::Trace);
        assert!(LogLevel::Info < LogLevel::Notice);
        assert!(LogLevel::Panic < LogLevel::Alert);
        assert!(LogLevel::Alert < LogLevel::Fatal);
    }

    #[test]
    fn test_parse() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("Notice".parse::<LogLevel>().unwrap(), LogLevel::Notice);
        assert!(matches!(
            "verbose".parse::<LogLevel>(),
            Err(LoggerError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_names_fit_console_column() {
        for level in LogLevel::ALL {
            assert!(level.to_str().len() <= 6, "{} too wide", level);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&LogLevel::Alert).unwrap();
        assert_eq!(json, "\"ALERT\"");
        let level: LogLevel = serde_json::from_str("\"NOTICE\"").unwrap();
        assert_eq!(level, LogLevel::Notice);
    }
}

//! Error types for the logger system

use super::log_level::LogLevel;
use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown level name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A handler could not start its consumers
    #[error("Handler '{handler}' failed to start: {source}")]
    HandlerStart {
        handler: String,
        #[source]
        source: std::io::Error,
    },

    /// Handlers did not acknowledge an entry within the completion timeout
    #[error("{pending} handler(s) stalled on a {level} entry")]
    HandlerStalled { level: LogLevel, pending: usize },

    /// The process-wide logger was already installed
    #[error("Global logger already set")]
    GlobalLoggerAlreadySet,
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn handler_start(handler: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::HandlerStart {
            handler: handler.into(),
            source,
        }
    }

    pub fn handler_stalled(level: LogLevel, pending: usize) -> Self {
        LoggerError::HandlerStalled { level, pending }
    }
}

/// Payload raised by [`Logger::panic`](crate::Logger::panic) once the
/// entry has been delivered to every handler.
///
/// Recover it with `std::panic::catch_unwind` and
/// `payload.downcast_ref::<PanicSignal>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanicSignal {
    pub message: String,
}

impl fmt::Display for PanicSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("ConsoleHandler", "buffer too large");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::handler_stalled(LogLevel::Warn, 2);
        assert!(matches!(err, LoggerError::HandlerStalled { pending: 2, .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::handler_stalled(LogLevel::Error, 3);
        assert_eq!(err.to_string(), "3 handler(s) stalled on a ERROR entry");

        let err = LoggerError::InvalidLevel("LOUD".to_string());
        assert_eq!(err.to_string(), "Invalid log level: 'LOUD'");

        let err = LoggerError::config("ConsoleHandler", "bad root");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for ConsoleHandler: bad root"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LoggerError::io_operation("writing console line", "sink rejected write", io_err);

        assert!(err.to_string().contains("writing console line"));
        assert!(err.to_string().contains("sink rejected write"));
    }

    #[test]
    fn test_panic_signal_display() {
        let signal = PanicSignal {
            message: "disk gone".to_string(),
        };
        assert_eq!(signal.to_string(), "disk gone");
    }
}

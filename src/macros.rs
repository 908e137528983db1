//! Logging macros for formatted messages.
//!
//! Each macro forwards `format_args!` to the matching [`Logger`](crate::Logger)
//! method, so the message is rendered straight into the pooled entry buffer
//! and format strings are checked at compile time.
//!
//! # Examples
//!
//! ```
//! use rust_log_router::prelude::*;
//! use rust_log_router::info;
//!
//! let logger = Logger::new();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a formatted message at the given level.
///
/// ```
/// # use rust_log_router::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_router::log;
/// log!(logger, LogLevel::Notice, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::format_args!($($arg)+))
    };
}

/// Start a [`Trace`](crate::Trace) with a formatted message.
///
/// ```
/// # use rust_log_router::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_router::trace;
/// let trace = trace!(logger, "Rebuilding shard {}", 3);
/// trace.end();
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace(::std::format_args!($($arg)+))
    };
}

/// ```
/// # use rust_log_router::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_router::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(::std::format_args!($($arg)+))
    };
}

/// ```
/// # use rust_log_router::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_router::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $logger.notice(::std::format_args!($($arg)+))
    };
}

/// ```
/// # use rust_log_router::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_router::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(::std::format_args!($($arg)+))
    };
}

/// ```
/// # use rust_log_router::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_router::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $logger.alert(::std::format_args!($($arg)+))
    };
}

/// Log at Fatal level, then run the logger's exit hook.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(::std::format_args!($($arg)+))
    };
}

/// Log at Error level, then unwind with a [`PanicSignal`](crate::PanicSignal).
#[macro_export]
macro_rules! log_panic {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panic(::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Handler, HandlerEntry, LogLevel, Logger, PanicSignal, Result};
    use crossbeam_channel::{bounded, Sender};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;
    use std::thread;

    type Seen = Arc<Mutex<Vec<(LogLevel, String)>>>;

    struct Collect(Seen);

    impl Handler for Collect {
        fn run(&mut self, _logger: &Logger) -> Result<Sender<HandlerEntry>> {
            let (tx, rx) = bounded::<HandlerEntry>(0);
            let seen = Arc::clone(&self.0);
            thread::spawn(move || {
                for entry in rx {
                    seen.lock().push((entry.level, entry.message().to_string()));
                }
            });
            Ok(tx)
        }
    }

    fn collecting() -> (Logger, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::builder()
            .exit_hook(Arc::new(|_: i32| {}))
            .handler(Collect(Arc::clone(&seen)), &LogLevel::ALL)
            .build()
            .unwrap();
        (logger, seen)
    }

    #[test]
    fn test_log_macro() {
        let (logger, seen) = collecting();
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Alert, "Formatted: {}", 42);

        let seen = seen.lock();
        assert_eq!(seen[0], (LogLevel::Info, "Test message".to_string()));
        assert_eq!(seen[1], (LogLevel::Alert, "Formatted: 42".to_string()));
    }

    #[test]
    fn test_level_macros() {
        let (logger, seen) = collecting();
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        notice!(logger, "Notice {}", "me");
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        alert!(logger, "Disk {}%", 99);
        fatal!(logger, "Critical failure: {}", "system");

        let seen = seen.lock();
        let levels: Vec<_> = seen.iter().map(|(level, _)| *level).collect();
        assert_eq!(
            levels,
            vec![
                LogLevel::Debug,
                LogLevel::Info,
                LogLevel::Notice,
                LogLevel::Warn,
                LogLevel::Error,
                LogLevel::Alert,
                LogLevel::Fatal,
            ]
        );
        assert_eq!(seen[3].1, "Retry 1 of 3");
        assert_eq!(seen[6].1, "Critical failure: system");
    }

    #[test]
    fn test_fatal_macro_runs_exit_hook() {
        let code = Arc::new(AtomicI32::new(0));
        let observed = Arc::clone(&code);
        let logger = Logger::builder()
            .exit_hook(Arc::new(move |c: i32| observed.store(c, Ordering::SeqCst)))
            .build()
            .unwrap();

        fatal!(logger, "bye {}", 1);
        assert_eq!(code.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_trace_macro() {
        let (logger, seen) = collecting();
        let trace = trace!(logger, "Value: {}", 10);
        trace.end();

        assert_eq!(seen.lock()[0], (LogLevel::Trace, "Value: 10".to_string()));
    }

    #[test]
    fn test_log_panic_macro() {
        let (logger, seen) = collecting();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            log_panic!(logger, "invariant {} broken", "x");
        }));

        let payload = result.unwrap_err();
        assert_eq!(
            payload.downcast_ref::<PanicSignal>().unwrap().message,
            "invariant x broken"
        );
        assert_eq!(seen.lock()[0], (LogLevel::Error, "invariant x broken".to_string()));
    }
}

//! # Rust Log Router
//!
//! A structured logging core that routes each entry to every handler
//! registered for its level and returns only once all of them are done
//! with it.
//!
//! ## Features
//!
//! - **Level routing**: handlers subscribe to any subset of nine levels
//! - **Fan-out with completion**: a log call returns after every matching
//!   handler has released the entry, so nothing is lost on exit
//! - **Pooled entries**: entries, fields and traces are recycled
//! - **Console handler**: colored, aligned output from a pool of workers
//!
//! ```
//! use rust_log_router::prelude::*;
//!
//! let logger = Logger::builder()
//!     .handler(ConsoleHandler::new().with_writer(std::io::sink()), &LogLevel::ALL)
//!     .build()
//!     .unwrap();
//!
//! logger.info("server started");
//! logger.with_fields([logger.field("port", 8080)]).notice("listening");
//! ```

pub mod core;
pub mod handlers;
pub mod macros;

pub use crossbeam_channel;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::handlers::{ConsoleConfig, ConsoleHandler, FileDisplay};
    pub use crate::core::{
        Entry, Field, FieldLogger, FieldValue, Handler, HandlerEntry, LogLevel, Logger,
        LoggerBuilder, LoggerError, PanicSignal, Result, TimestampFormat, Trace,
    };
}

#[cfg(feature = "console")]
pub use crate::handlers::ConsoleHandler;
pub use crate::core::{
    global_logger, set_global_logger, Entry, Field, FieldLogger, FieldValue, Handler,
    HandlerEntry, HandlerMetrics, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
    PanicSignal, PoolStats, Result, TimestampFormat, Trace,
};

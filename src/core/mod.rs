//! Core types: entries, fields, pools, routing and the logger itself

pub mod barrier;
pub mod error;
pub mod field;
pub mod field_logger;
pub mod global;
pub mod handler;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod pool;
pub mod routing;
pub mod timestamp;
pub mod trace;

pub use barrier::CompletionBarrier;
pub use error::{LoggerError, PanicSignal, Result};
pub use field::{Field, FieldValue};
pub use field_logger::FieldLogger;
pub use global::{global_logger, set_global_logger};
pub use handler::Handler;
pub use log_entry::{Entry, EntryBody, HandlerEntry};
pub use log_level::LogLevel;
pub use logger::{default_duration_format, DurationFormatFn, ExitHook, Logger, LoggerBuilder};
pub use metrics::{HandlerMetrics, LoggerMetrics};
pub use pool::{Pool, PoolStats, Reset, DEFAULT_POOL_CAPACITY};
pub use routing::RoutingTable;
pub use timestamp::TimestampFormat;
pub use trace::{Trace, TraceEntry};

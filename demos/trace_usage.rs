//! Trace example
//!
//! Times operations with traces, a custom duration renderer and a custom
//! time format for the start/end fields.
//!
//! Run with: cargo run --example trace_usage

use rust_log_router::prelude::*;
use rust_log_router::trace;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Log Router - Trace Example ===\n");

    let logger = Logger::builder()
        .time_format(TimestampFormat::Iso8601Micros)
        .handler(ConsoleHandler::new(), &[LogLevel::Trace, LogLevel::Info])
        .build()?;

    println!("1. Explicitly ended trace:");
    let mut load = logger.trace("loading configuration");
    thread::sleep(Duration::from_millis(15));
    load.add_field("files", 3);
    load.end();

    println!("\n2. Trace ended when it goes out of scope:");
    {
        let _sync = trace!(logger, "syncing shard {}", 7);
        thread::sleep(Duration::from_millis(5));
    }

    println!("\n3. Durations in whole milliseconds:");
    logger.register_duration_func(|elapsed| format!("{}ms", elapsed.as_millis()));
    let warm = logger
        .with_fields([logger.field("entries", 1024)])
        .trace("warming cache");
    thread::sleep(Duration::from_millis(25));
    warm.end();

    logger.info("done");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

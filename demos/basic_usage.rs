//! Basic logger usage example
//!
//! Demonstrates level routing, structured fields and the formatting macros
//! with the console handler.
//!
//! Run with: cargo run --example basic_usage

use rust_log_router::handlers::console::FileDisplay;
use rust_log_router::prelude::*;
use rust_log_router::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Log Router - Basic Usage Example ===\n");

    // Everything from Info up goes to the console; Debug has no listener.
    let logger = Logger::builder()
        .handler(
            ConsoleHandler::new().with_buffers_and_workers(64, 2),
            &[
                LogLevel::Info,
                LogLevel::Notice,
                LogLevel::Warn,
                LogLevel::Error,
                LogLevel::Alert,
            ],
        )
        .build()?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message (no handler, dropped)");
    logger.info("This is an info message");
    logger.notice("This is a notice message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.alert("This is an alert message");

    println!("\n2. Structured fields:");
    logger
        .with_fields([logger.field("user", "ada"), logger.field("attempt", 3)])
        .field("locked", false)
        .warn("login failed");

    println!("\n3. Formatted messages:");
    let port = 8080;
    info!(logger, "Server listening on port {}", port);
    warn!(logger, "Retry attempt {} of {}", 2, 5);

    println!("\n4. A second handler with plain output and no file names:");
    logger.register_handler(
        ConsoleHandler::new()
            .with_colors(false)
            .with_file_display(FileDisplay::Omit)
            .with_writer(std::io::stdout()),
        &[LogLevel::Error],
    )?;
    logger.error("Delivered to both handlers");

    let metrics = logger.metrics();
    println!(
        "\nDispatched: {}, deliveries: {}, unrouted: {}",
        metrics.dispatched(),
        metrics.deliveries(),
        metrics.unrouted()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

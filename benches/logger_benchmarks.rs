//! Criterion benchmarks for rust_log_router

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use crossbeam_channel::{bounded, Sender};
use rust_log_router::handlers::console::FileDisplay;
use rust_log_router::handlers::format::{FormatSettings, Formatter, JsonFormatter, TextFormatter};
use rust_log_router::prelude::*;
use std::sync::Arc;
use std::thread;

/// Releases every entry as soon as it arrives.
struct Discard;

impl Handler for Discard {
    fn run(&mut self, _logger: &Logger) -> Result<Sender<HandlerEntry>> {
        let (tx, rx) = bounded::<HandlerEntry>(64);
        thread::spawn(move || {
            for entry in rx {
                entry.consumed();
            }
        });
        Ok(tx)
    }
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let unrouted = Logger::new();
    group.bench_function("unrouted", |b| {
        b.iter(|| unrouted.info(black_box("nobody listens")));
    });

    let one = Logger::new();
    one.register_handler(Discard, &[LogLevel::Info]).unwrap();
    group.bench_function("one_handler", |b| {
        b.iter(|| one.info(black_box("one listener")));
    });

    let three = Logger::new();
    for _ in 0..3 {
        three.register_handler(Discard, &[LogLevel::Info]).unwrap();
    }
    group.bench_function("three_handlers", |b| {
        b.iter(|| three.info(black_box("three listeners")));
    });

    group.bench_function("with_fields", |b| {
        b.iter(|| {
            one.with_fields([one.field("port", 8080), one.field("tls", true)])
                .info(black_box("listening"))
        });
    });

    group.finish();
}

// ============================================================================
// Console Benchmarks
// ============================================================================

fn bench_console(c: &mut Criterion) {
    let mut group = c.benchmark_group("console");
    group.throughput(Throughput::Elements(1));

    for workers in [1, 4] {
        let logger = Logger::new();
        let console = ConsoleHandler::new()
            .with_file_display(FileDisplay::Short)
            .with_buffers_and_workers(128, workers)
            .with_writer(std::io::sink());
        logger.register_handler(console, &LogLevel::ALL).unwrap();

        group.bench_function(format!("sink_{}_workers", workers), |b| {
            b.iter(|| {
                logger
                    .with_fields([logger.field("user", "ada"), logger.field("attempt", 3)])
                    .warn(black_box("login failed"))
            });
        });
    }

    group.finish();
}

// ============================================================================
// Formatter Benchmarks
// ============================================================================

fn bench_formatters(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatters");
    group.throughput(Throughput::Elements(1));

    let entry: HandlerEntry = Entry::new(LogLevel::Info, "request served")
        .with_timestamp(Utc::now())
        .with_location("server.rs", 120)
        .with_field(Field::new("status", 200))
        .with_field(Field::new("path", "/api/users"))
        .with_field(Field::new("elapsed_ms", 3.25))
        .into();

    let settings = Arc::new(FormatSettings::plain(TimestampFormat::Rfc3339Nanos));

    let mut text = TextFormatter::new(Arc::clone(&settings));
    group.bench_function("text", |b| {
        b.iter(|| black_box(text.format(&entry).len()));
    });

    let mut json = JsonFormatter::new(settings);
    group.bench_function("json", |b| {
        b.iter(|| black_box(json.format(&entry).len()));
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_console, bench_formatters);
criterion_main!(benches);

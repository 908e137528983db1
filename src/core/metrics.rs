//! Logger and handler metrics for observability
//!
//! Provides counters for monitoring dispatch health (routing misses,
//! stalled handlers) and handler health (write failures).

use std::sync::atomic::{AtomicU64, Ordering};

/// Dispatch counters kept by a [`Logger`](crate::Logger).
///
/// # Example
///
/// ```
/// use rust_log_router::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_dispatched(3);
/// metrics.record_unrouted();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.deliveries(), 3);
/// assert_eq!(metrics.unrouted(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries delivered to at least one handler and fully acknowledged
    dispatched: AtomicU64,

    /// Handler copies acknowledged across all dispatched entries
    deliveries: AtomicU64,

    /// Entries dropped because no handler listens on their level
    unrouted: AtomicU64,

    /// Entries whose handlers missed the completion timeout
    stalled: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            unrouted: AtomicU64::new(0),
            stalled: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn deliveries(&self) -> u64 {
        self.deliveries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn unrouted(&self) -> u64 {
        self.unrouted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stalled(&self) -> u64 {
        self.stalled.load(Ordering::Relaxed)
    }

    /// Record an entry acknowledged by `fan_out` handlers
    #[inline]
    pub fn record_dispatched(&self, fan_out: usize) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
        self.deliveries.fetch_add(fan_out as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_unrouted(&self) -> u64 {
        self.unrouted.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a stalled dispatch, returning the previous count
    #[inline]
    pub fn record_stalled(&self) -> u64 {
        self.stalled.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.deliveries.store(0, Ordering::Relaxed);
        self.unrouted.store(0, Ordering::Relaxed);
        self.stalled.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters kept by an output handler's workers.
#[derive(Debug)]
pub struct HandlerMetrics {
    written: AtomicU64,
    write_errors: AtomicU64,
    format_panics: AtomicU64,
}

impl HandlerMetrics {
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
            format_panics: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_errors(&self) -> u64 {
        self.write_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn format_panics(&self) -> u64 {
        self.format_panics.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed write, returning the previous count
    #[inline]
    pub fn record_write_error(&self) -> u64 {
        self.write_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_format_panic(&self) -> u64 {
        self.format_panics.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for HandlerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

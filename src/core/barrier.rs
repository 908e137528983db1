//! Per-entry completion barrier
//!
//! The producer arms the barrier with the fan-out count before sending, each
//! handler copy decrements it exactly once, and the producer blocks until the
//! count reaches zero before reclaiming the entry.

use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct CompletionBarrier {
    pending: Mutex<usize>,
    zero: Condvar,
}

impl CompletionBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect `count` completions.
    pub fn arm(&self, count: usize) {
        *self.pending.lock() = count;
    }

    /// Record one completion.
    pub fn done(&self) {
        let mut pending = self.pending.lock();
        *pending = pending.saturating_sub(1);
        if *pending == 0 {
            self.zero.notify_all();
        }
    }

    /// Block until every expected completion has arrived.
    pub fn wait(&self) {
        let mut pending = self.pending.lock();
        while *pending > 0 {
            self.zero.wait(&mut pending);
        }
    }

    /// Like [`wait`](Self::wait) but gives up after `timeout`.
    ///
    /// Returns `true` when all completions arrived in time.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut pending = self.pending.lock();
        while *pending > 0 {
            if self.zero.wait_until(&mut pending, deadline).timed_out() {
                return *pending == 0;
            }
        }
        true
    }

    pub fn pending(&self) -> usize {
        *self.pending.lock()
    }
}

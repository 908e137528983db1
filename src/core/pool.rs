//! Recycling pools for fields, entries and trace entries
//!
//! A pool is a soft cache: losing an item only costs a fresh allocation on
//! the next `get`, so the free list is capped and never blocks producers for
//! longer than a push or pop.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default number of idle items a pool keeps before discarding returns.
pub const DEFAULT_POOL_CAPACITY: usize = 1024;

/// Clears an item before it is stored for reuse.
///
/// Implementations should keep heap capacity (strings, vectors) so the next
/// user can fill it without allocating.
pub trait Reset {
    fn reset(&mut self);
}

pub struct Pool<T> {
    items: Mutex<Vec<T>>,
    max_idle: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T: Default + Reset> Pool<T> {
    pub fn new(max_idle: usize) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            max_idle,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Take a recycled item, or build a fresh one when the pool is empty.
    pub fn get(&self) -> T {
        let recycled = self.items.lock().pop();
        match recycled {
            Some(item) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                item
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                T::default()
            }
        }
    }

    /// Return an item. The caller must hold the only reference to it.
    pub fn put(&self, mut item: T) {
        item.reset();
        let mut items = self.items.lock();
        if items.len() < self.max_idle {
            items.push(item);
        }
    }

    /// Number of items currently waiting for reuse
    pub fn idle(&self) -> usize {
        self.items.lock().len()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

impl<T: Default + Reset> Default for Pool<T> {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

/// Snapshot of the three pools owned by a logger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub idle_fields: usize,
    pub idle_entries: usize,
    pub idle_traces: usize,
    pub entry_hits: u64,
    pub entry_misses: u64,
}

//! Level routing table
//!
//! Maps every level to the ordered list of handler channels registered for
//! it. Each list is an immutable `Arc<[Sender]>` that is swapped on
//! registration, so a dispatch only holds the read lock long enough to clone
//! one `Arc` and never while sending.

use super::log_entry::HandlerEntry;
use super::log_level::LogLevel;
use crossbeam_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;

pub type HandlerChannels = Arc<[Sender<HandlerEntry>]>;

pub struct RoutingTable {
    routes: RwLock<[HandlerChannels; LogLevel::COUNT]>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self {
            routes: RwLock::new(std::array::from_fn(|_| Arc::from(Vec::new()))),
        }
    }

    /// Append `sender` to the list of every level in `levels`.
    ///
    /// A level named more than once in the same call is only appended once.
    pub fn register(&self, sender: &Sender<HandlerEntry>, levels: &[LogLevel]) {
        let mut seen = [false; LogLevel::COUNT];
        let mut routes = self.routes.write();
        for level in levels {
            let slot = level.index();
            if seen[slot] {
                continue;
            }
            seen[slot] = true;

            let mut channels = routes[slot].to_vec();
            channels.push(sender.clone());
            routes[slot] = channels.into();
        }
    }

    /// Channels registered for `level`, in registration order.
    pub fn channels(&self, level: LogLevel) -> HandlerChannels {
        Arc::clone(&self.routes.read()[level.index()])
    }

    pub fn handler_count(&self, level: LogLevel) -> usize {
        self.routes.read()[level.index()].len()
    }
}

impl Default for RoutingTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_empty_table() {
        let table = RoutingTable::new();
        for level in LogLevel::ALL {
            assert!(table.channels(level).is_empty());
        }
    }

    #[test]
    fn test_register_subset_of_levels() {
        let table = RoutingTable::new();
        let (tx, _rx) = unbounded();
        table.register(&tx, &[LogLevel::Info, LogLevel::Error]);

        assert_eq!(table.handler_count(LogLevel::Info), 1);
        assert_eq!(table.handler_count(LogLevel::Error), 1);
        assert_eq!(table.handler_count(LogLevel::Warn), 0);
        assert_eq!(table.handler_count(LogLevel::Debug), 0);
    }

    #[test]
    fn test_registration_order_and_dedup() {
        let table = RoutingTable::new();
        let (first, first_rx) = unbounded();
        let (second, second_rx) = unbounded();
        table.register(&first, &[LogLevel::Warn, LogLevel::Warn]);
        table.register(&second, &[LogLevel::Warn]);

        let channels = table.channels(LogLevel::Warn);
        assert_eq!(channels.len(), 2);
        assert!(channels[0].same_channel(&first));
        assert!(channels[1].same_channel(&second));
        drop((first_rx, second_rx));
    }

    #[test]
    fn test_snapshot_unaffected_by_later_registration() {
        let table = RoutingTable::new();
        let (tx, _rx) = unbounded();
        let before = table.channels(LogLevel::Info);
        table.register(&tx, &[LogLevel::Info]);
        assert!(before.is_empty());
        assert_eq!(table.channels(LogLevel::Info).len(), 1);
    }
}

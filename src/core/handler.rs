//! Handler trait for log output backends

use super::{error::Result, log_entry::HandlerEntry, logger::Logger};
use crossbeam_channel::Sender;

/// An output backend fed through a channel.
///
/// `run` is called once, at registration. It starts whatever consumers the
/// backend needs and returns the channel the logger sends entries into. For
/// every [`HandlerEntry`] received the backend must let the entry go
/// (`consumed()` or drop) once it is done reading it, and must not keep any
/// part of it afterwards. The producer is blocked until it does.
///
/// `logger` is the registering logger, available for diagnostics.
///
/// # Example
///
/// ```
/// use rust_log_router::core::{Handler, HandlerEntry, Logger, LogLevel, Result};
/// use crossbeam_channel::{bounded, Sender};
///
/// struct Discard;
///
/// impl Handler for Discard {
///     fn run(&mut self, _logger: &Logger) -> Result<Sender<HandlerEntry>> {
///         let (tx, rx) = bounded::<HandlerEntry>(16);
///         std::thread::spawn(move || {
///             for entry in rx {
///                 entry.consumed();
///             }
///         });
///         Ok(tx)
///     }
///
///     fn name(&self) -> &str {
///         "discard"
///     }
/// }
///
/// let logger = Logger::new();
/// logger.register_handler(Discard, &LogLevel::ALL).unwrap();
/// logger.info("dropped on the floor");
/// ```
pub trait Handler: Send {
    fn run(&mut self, logger: &Logger) -> Result<Sender<HandlerEntry>>;

    fn name(&self) -> &str {
        "handler"
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn run(&mut self, logger: &Logger) -> Result<Sender<HandlerEntry>> {
        (**self).run(logger)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

//! Optional process-wide logger
//!
//! Nothing in the crate depends on this; it only gives call sites that cannot
//! be handed a logger a way to reach the one installed at startup.

use super::error::{LoggerError, Result};
use super::logger::Logger;
use std::sync::{Arc, OnceLock};

static GLOBAL_LOGGER: OnceLock<Arc<Logger>> = OnceLock::new();

/// Install `logger` as the process-wide logger. Only the first call succeeds.
pub fn set_global_logger(logger: Arc<Logger>) -> Result<()> {
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| LoggerError::GlobalLoggerAlreadySet)
}

/// The installed process-wide logger, if any
pub fn global_logger() -> Option<&'static Arc<Logger>> {
    GLOBAL_LOGGER.get()
}

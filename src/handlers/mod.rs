//! Output handlers

#[cfg(feature = "console")]
pub mod console;
pub mod format;

#[cfg(feature = "console")]
pub use console::{ConsoleConfig, ConsoleHandler, FileDisplay};
pub use format::{Formatter, FormatterFactory, FormatSettings, JsonFormatter, TextFormatter};

pub use crate::core::Handler;

#![forbid(unsafe_code)]
//! Configurable console logger.
//!
//! `fxlog` decorates every message with an optional static prefix, a
//! timestamp, the caller's file name, one or more scope brackets, a badge and
//! a padded, colored label:
//!
//! ```text
//! [2026-10-17 09:41:07.123] [fxlog] [db] ✔ success server ready
//! ```
//!
//! ```ignore
//! use fxlog::{PartialConfig, create_logger};
//!
//! let mut logger = create_logger(PartialConfig::new().scope("app"));
//! logger.info(["listening on", "0.0.0.0:8080"])?;
//! fxlog::success!(logger, "ready in", 42, "ms")?;
//!
//! let db = logger.scope(["db"]);
//! let label = logger.time("migrate");
//! logger.time_end(label.as_str());
//! ```

pub mod config;
pub mod console;
pub mod detection;
pub mod format;
pub mod logger;
pub mod logging;
mod macros;
pub mod prefix;
pub mod testing;
pub mod theme;
pub mod timer;

pub use crate::config::{
    ColorScope, Element, LogLevel, LogTypeConfig, LoggerConfig, PartialConfig, Prefix, Preset,
    Scope, merge,
};
pub use crate::console::{FxConsole, Stream, console};
pub use crate::detection::{DisplayContext, should_enable_rich};
pub use crate::logger::{Logger, LoggerBuilder, create_logger};
pub use crate::timer::{TimerRegistry, TimerResult, format_duration};

pub use fxlog_core::{BoxError, Clock, Error, ManualClock, Result, SystemClock, Value, inspect};

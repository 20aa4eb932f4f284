//! Routing other logging frameworks through an fxlog [`Logger`].
//!
//! - [`FxLogBridge`]: a [`log::Log`] backend, for crates using the `log` facade
//! - [`FxLayer`]: a `tracing_subscriber` layer, for crates using `tracing`
//!
//! Records are mapped onto the logger's types by severity (`error`, `warn`,
//! `info`, and `log` for debug/trace). A record whose type was removed from
//! the configuration falls back to `log`, and is dropped if that is gone too.
//!
//! ```ignore
//! use fxlog::logging::FxLogBridge;
//! use fxlog::{Logger, PartialConfig};
//!
//! FxLogBridge::builder()
//!     .logger(Logger::new(PartialConfig::new().scope("app")))
//!     .level(log::Level::Debug)
//!     .try_init();
//!
//! log::info!(target: "http", "listening");
//! ```

mod bridge;
mod subscriber;

pub use bridge::{FxLogBridge, FxLogBridgeBuilder};
pub use subscriber::{FxLayer, FxSubscriberBuilder};

use crate::config::LogLevel;
use crate::logger::Logger;

/// The configured type a record of `level` is written as.
fn type_for(logger: &Logger, level: LogLevel) -> Option<&'static str> {
    let preferred = match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "log",
    };
    [preferred, "log"]
        .into_iter()
        .find(|kind| logger.config().types.contains_key(*kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PartialConfig;

    #[test]
    fn test_type_for_levels() {
        let logger = Logger::new(PartialConfig::new());
        assert_eq!(type_for(&logger, LogLevel::Error), Some("error"));
        assert_eq!(type_for(&logger, LogLevel::Warn), Some("warn"));
        assert_eq!(type_for(&logger, LogLevel::Info), Some("info"));
        assert_eq!(type_for(&logger, LogLevel::Debug), Some("log"));
    }

    #[test]
    fn test_type_for_falls_back_to_log() {
        let logger = Logger::new(PartialConfig::new().remove_type("info"));
        assert_eq!(type_for(&logger, LogLevel::Info), Some("log"));

        let logger = Logger::new(PartialConfig::new().remove_type("info").remove_type("log"));
        assert_eq!(type_for(&logger, LogLevel::Info), None);
    }
}

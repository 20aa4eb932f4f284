//! `log` facade backend.
//!
//! # Usage
//!
//! ```ignore
//! use fxlog::logging::FxLogBridge;
//! use log::Level;
//!
//! // Default logger, Info and above
//! FxLogBridge::try_init(Level::Info);
//!
//! // Or use the builder for more control
//! FxLogBridge::builder()
//!     .level(Level::Debug)
//!     .with_targets(true)
//!     .init()?;
//! ```

use log::{Level, LevelFilter, Log, Metadata, Record};

use fxlog_core::Value;

use super::type_for;
use crate::config::LogLevel;
use crate::logger::Logger;

/// A [`log::Log`] implementation that writes records through a [`Logger`].
///
/// With targets enabled, each record's target is appended to the logger's
/// scope, so `log::warn!(target: "db", ...)` renders with a `[db]` bracket.
#[derive(Debug)]
pub struct FxLogBridge {
    logger: Logger,
    min_level: Level,
    show_targets: bool,
}

impl FxLogBridge {
    /// Create a bridge over a default logger.
    #[must_use]
    pub fn new(min_level: Level) -> Self {
        Self::builder().level(min_level).build()
    }

    /// Create a bridge using the builder pattern.
    #[must_use]
    pub fn builder() -> FxLogBridgeBuilder {
        FxLogBridgeBuilder::new()
    }

    /// Initialize as the global logger.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(min_level: Level) -> Result<(), log::SetLoggerError> {
        Self::builder().level(min_level).init()
    }

    /// Initialize as the global logger, ignoring errors if already set.
    pub fn try_init(min_level: Level) {
        let _ = Self::init(min_level);
    }
}

impl Log for FxLogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level && self.logger.is_enabled()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let Some(kind) = type_for(&self.logger, LogLevel::from(record.level())) else {
            return;
        };
        let message = [Value::from(record.args().to_string())];

        // Nowhere to report a failure from inside the backend itself.
        let _ = if self.show_targets && !record.target().is_empty() {
            self.logger
                .nested([record.target()])
                .emit_values(kind, &message, record.file_static())
        } else {
            self.logger.emit_values(kind, &message, record.file_static())
        };
    }

    fn flush(&self) {}
}

/// Builder for configuring the `log` bridge.
#[derive(Debug)]
pub struct FxLogBridgeBuilder {
    logger: Option<Logger>,
    min_level: Level,
    show_targets: bool,
}

impl Default for FxLogBridgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FxLogBridgeBuilder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            logger: None,
            min_level: Level::Info,
            show_targets: false,
        }
    }

    /// Write through `logger` instead of a default one.
    #[must_use]
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Set the minimum log level from a LevelFilter.
    #[must_use]
    pub fn level_filter(mut self, filter: LevelFilter) -> Self {
        self.min_level = filter.to_level().unwrap_or(Level::Trace);
        self
    }

    /// Set whether record targets become an extra scope.
    #[must_use]
    pub fn with_targets(mut self, show: bool) -> Self {
        self.show_targets = show;
        self
    }

    /// Build the bridge without installing it.
    #[must_use]
    pub fn build(self) -> FxLogBridge {
        FxLogBridge {
            logger: self.logger.unwrap_or_default(),
            min_level: self.min_level,
            show_targets: self.show_targets,
        }
    }

    /// Build and install as the global logger.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.min_level;
        log::set_boxed_logger(Box::new(self.build()))?;
        log::set_max_level(level.to_level_filter());
        Ok(())
    }

    /// Build and install, ignoring errors if already set.
    pub fn try_init(self) {
        let _ = self.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PartialConfig, Preset};
    use crate::testing::TestConsole;

    fn bridge(tc: &TestConsole, level: Level, targets: bool) -> FxLogBridge {
        let logger = Logger::builder()
            .config(PartialConfig::new().presets([Preset::Scope, Preset::Label]))
            .console(tc.console())
            .build();
        FxLogBridge::builder()
            .logger(logger)
            .level(level)
            .with_targets(targets)
            .build()
    }

    fn metadata(level: Level) -> Metadata<'static> {
        Metadata::builder().level(level).target("test").build()
    }

    #[test]
    fn test_bridge_enabled() {
        let tc = TestConsole::new();
        let bridge = bridge(&tc, Level::Info, false);

        assert!(bridge.enabled(&metadata(Level::Error)));
        assert!(bridge.enabled(&metadata(Level::Warn)));
        assert!(bridge.enabled(&metadata(Level::Info)));
        assert!(!bridge.enabled(&metadata(Level::Debug)));
        assert!(!bridge.enabled(&metadata(Level::Trace)));
    }

    #[test]
    fn test_records_map_to_types() {
        let tc = TestConsole::new();
        let bridge = bridge(&tc, Level::Trace, false);

        bridge.log(&Record::builder().args(format_args!("boom")).level(Level::Error).build());
        bridge.log(&Record::builder().args(format_args!("hmm")).level(Level::Warn).build());
        bridge.log(&Record::builder().args(format_args!("fyi")).level(Level::Debug).build());

        assert_eq!(
            tc.output(),
            vec!["[fxlog] error   boom", "[fxlog] warn    hmm", "[fxlog] log     fyi"]
        );
    }

    #[test]
    fn test_targets_become_scope() {
        let tc = TestConsole::new();
        let bridge = bridge(&tc, Level::Info, true);

        bridge.log(
            &Record::builder()
                .args(format_args!("ready"))
                .level(Level::Info)
                .target("http")
                .build(),
        );

        assert_eq!(tc.last_line().as_deref(), Some("[fxlog] [http] info    ready"));
    }

    #[test]
    fn test_disabled_logger_drops_records() {
        let tc = TestConsole::new();
        let mut logger = Logger::builder().console(tc.console()).build();
        logger.disable();
        let bridge = FxLogBridge::builder().logger(logger).build();

        bridge.log(&Record::builder().args(format_args!("x")).level(Level::Error).build());
        tc.assert_line_count(0);
    }

    #[test]
    fn test_builder_default() {
        let builder = FxLogBridgeBuilder::default();
        assert_eq!(builder.min_level, Level::Info);
        assert!(!builder.show_targets);
        assert!(builder.logger.is_none());
    }

    #[test]
    fn test_builder_level_filter() {
        let builder = FxLogBridgeBuilder::new().level_filter(LevelFilter::Warn);
        assert_eq!(builder.min_level, Level::Warn);
    }
}

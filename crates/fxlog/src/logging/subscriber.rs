//! `tracing` integration.
//!
//! [`FxLayer`] renders tracing events through a [`Logger`]. The names of the
//! spans an event happened in are appended to the logger's scope, root first,
//! and event fields follow the message as `key=value` pairs.

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

use fxlog_core::Value;

use super::type_for;
use crate::config::LogLevel;
use crate::logger::Logger;

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Self::Error,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }
}

/// A tracing layer that writes events through a [`Logger`].
#[derive(Debug)]
pub struct FxLayer {
    logger: Logger,
}

impl FxLayer {
    #[must_use]
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl FieldCollector {
    fn record_value(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            if self.message.is_none() {
                self.message = Some(value);
            }
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }

    /// Message first, then `key=value` for every other field.
    fn into_args(self, fallback: &str) -> Vec<Value> {
        let mut args = Vec::with_capacity(self.fields.len() + 1);
        args.push(Value::from(self.message.unwrap_or_else(|| fallback.to_string())));
        args.extend(
            self.fields
                .into_iter()
                .map(|(key, value)| Value::from(format!("{key}={value}"))),
        );
        args
    }
}

impl Visit for FieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_value(field, value.to_string());
    }
}

impl<S> Layer<S> for FxLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        if !self.logger.is_enabled() {
            return;
        }

        let metadata = event.metadata();
        let Some(kind) = type_for(&self.logger, LogLevel::from(*metadata.level())) else {
            return;
        };

        let mut collector = FieldCollector::default();
        event.record(&mut collector);
        let args = collector.into_args(metadata.name());

        let spans: Vec<&'static str> = ctx
            .event_scope(event)
            .map(|scope| scope.from_root().map(|span| span.name()).collect())
            .unwrap_or_default();

        // A layer has no caller to hand errors back to.
        let _ = if spans.is_empty() {
            self.logger.emit_values(kind, &args, metadata.file())
        } else {
            self.logger
                .nested(spans)
                .emit_values(kind, &args, metadata.file())
        };
    }
}

/// Builder for a tracing subscriber that writes through fxlog.
#[derive(Debug)]
pub struct FxSubscriberBuilder {
    logger: Option<Logger>,
    level_filter: LevelFilter,
}

impl Default for FxSubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FxSubscriberBuilder {
    /// Create a new builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            logger: None,
            level_filter: LevelFilter::INFO,
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
    pub fn with_level_filter(mut self, filter: LevelFilter) -> Self {
        self.level_filter = filter;
        self
    }

    /// Build the subscriber without installing it.
    #[must_use]
    pub fn build(self) -> impl Subscriber + Send + Sync {
        let layer = FxLayer::new(self.logger.unwrap_or_default());

        tracing_subscriber::registry()
            .with(self.level_filter)
            .with(layer)
    }

    /// Build and install as the global subscriber.
    pub fn init(self) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
        tracing::subscriber::set_global_default(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PartialConfig, Preset};
    use crate::console::FxConsole;
    use crate::testing::TestConsole;
    use std::sync::Arc;

    fn subscriber(console: Arc<FxConsole>, filter: LevelFilter) -> impl Subscriber + Send + Sync {
        let logger = Logger::builder()
            .config(PartialConfig::new().presets([Preset::Scope, Preset::Label]))
            .console(console)
            .build();
        FxSubscriberBuilder::new()
            .logger(logger)
            .with_level_filter(filter)
            .build()
    }

    #[test]
    fn test_builder_defaults() {
        let builder = FxSubscriberBuilder::default();
        assert!(builder.logger.is_none());
        assert_eq!(builder.level_filter, LevelFilter::INFO);
    }

    #[test]
    fn test_event_with_fields() {
        let tc = TestConsole::new();
        tracing::subscriber::with_default(subscriber(tc.console(), LevelFilter::INFO), || {
            tracing::info!(port = 8080, "listening");
        });
        assert_eq!(tc.output(), vec!["[fxlog] info    listening port=8080"]);
    }

    #[test]
    fn test_spans_extend_scope() {
        let tc = TestConsole::new();
        tracing::subscriber::with_default(subscriber(tc.console(), LevelFilter::INFO), || {
            let outer = tracing::info_span!("http");
            let _outer = outer.enter();
            let inner = tracing::info_span!("request");
            let _inner = inner.enter();
            tracing::warn!("slow");
        });
        assert_eq!(tc.output(), vec!["[fxlog] [http] [request] warn    slow"]);
    }

    #[test]
    fn test_level_filter_applies() {
        let tc = TestConsole::new();
        tracing::subscriber::with_default(subscriber(tc.console(), LevelFilter::WARN), || {
            tracing::info!("hidden");
            tracing::error!("shown");
        });
        assert_eq!(tc.output(), vec!["[fxlog] error   shown"]);
    }

    #[test]
    fn test_debug_events_use_log_type() {
        let tc = TestConsole::new();
        tracing::subscriber::with_default(subscriber(tc.console(), LevelFilter::TRACE), || {
            tracing::debug!(ok = true, "probe");
        });
        assert_eq!(tc.output(), vec!["[fxlog] log     probe ok=true"]);
    }
}

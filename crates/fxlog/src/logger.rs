//! The logger facade.
//!
//! A [`Logger`] owns its effective configuration, its enabled/disabled flag
//! and its timers. [`Logger::scope`] and [`Logger::unscope`] derive new,
//! independent loggers: they copy the configuration and the current flag,
//! start with no timers, and share only the console they write to.
//!
//! # Usage
//!
//! ```ignore
//! use fxlog::{Logger, PartialConfig};
//!
//! let mut logger = Logger::new(PartialConfig::new().scope("api"));
//! logger.info(["server started"])?;
//!
//! let db = logger.scope(["db"]);
//! db.warn(["slow query", "users"])?;
//!
//! let label = logger.time(None);
//! // ...
//! if let Some(result) = logger.time_end(label.as_str()) {
//!     assert_eq!(result.label, label);
//! }
//! ```

use std::panic::Location;
use std::sync::Arc;

use fxlog_core::logging::{debug, targets, warn};
use fxlog_core::{Clock, Error, Result, SystemClock, Value};

use crate::config::{LogLevel, LoggerConfig, PartialConfig, Scope};
use crate::console::{FxConsole, Stream};
use crate::format::MessageFormatter;
use crate::prefix::CallSite;
use crate::theme::{Color, Painter, glyphs};
use crate::timer::{TimerRegistry, TimerResult, format_duration};

/// A configured console logger.
pub struct Logger {
    config: LoggerConfig,
    console: Arc<FxConsole>,
    clock: Arc<dyn Clock>,
    disabled: bool,
    /// Whether the current scope was set by [`Logger::scope`].
    scoped: bool,
    timers: TimerRegistry,
}

/// Build a logger from a partial configuration; `None` means all defaults.
#[must_use]
pub fn create_logger(config: impl Into<Option<PartialConfig>>) -> Logger {
    Logger::new(config.into().unwrap_or_default())
}

impl Logger {
    /// Create a logger writing to the global console.
    #[must_use]
    pub fn new(config: PartialConfig) -> Self {
        LoggerBuilder::new().config(config).build()
    }

    /// Create a logger using the builder pattern.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    // ─────────────────────────────────────────────────
    // State Queries
    // ─────────────────────────────────────────────────

    /// Effective configuration.
    #[must_use]
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Current scope, if any.
    #[must_use]
    pub fn scope_value(&self) -> Option<&Scope> {
        self.config.scope.as_ref()
    }

    /// Whether this logger currently writes output.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    /// Number of timers started and not yet ended.
    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    // ─────────────────────────────────────────────────
    // Logging
    // ─────────────────────────────────────────────────

    /// Log `args` as type `kind`, which may be any configured type.
    ///
    /// Does nothing while disabled. Fails on an unknown type, a failing
    /// prefix provider, or a console write error.
    #[track_caller]
    pub fn emit<I>(&self, kind: &str, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let file = Location::caller().file();
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        self.emit_values(kind, &args, Some(file))
    }

    #[track_caller]
    pub fn log<I>(&self, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.emit("log", args)
    }

    #[track_caller]
    pub fn info<I>(&self, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.emit("info", args)
    }

    #[track_caller]
    pub fn success<I>(&self, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.emit("success", args)
    }

    #[track_caller]
    pub fn warn<I>(&self, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.emit("warn", args)
    }

    #[track_caller]
    pub fn error<I>(&self, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.emit("error", args)
    }

    pub(crate) fn emit_values(
        &self,
        kind: &str,
        args: &[Value],
        file: Option<&'static str>,
    ) -> Result<()> {
        if self.disabled {
            return Ok(());
        }

        let level = self.config.log_type(kind)?.level();
        if level > self.config.log_level {
            return Ok(());
        }

        let site = self.call_site(file);
        let line = self.formatter().format(kind, args, &site)?;
        let stream = if level.is_stderr() {
            Stream::Stderr
        } else {
            Stream::Stdout
        };
        self.console.write_line(stream, &line)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────
    // Timers
    // ─────────────────────────────────────────────────

    /// Start a timer and return its label.
    ///
    /// Without a label (or with an empty one) the label is `timer_<n>`.
    /// While disabled, returns an empty string and records nothing.
    #[track_caller]
    pub fn time<'a>(&mut self, label: impl Into<Option<&'a str>>) -> String {
        if self.disabled {
            return String::new();
        }

        let now = self.clock.now_millis();
        let label = self.timers.start(label.into(), now);
        debug!(target: targets::TIMER, "timer `{label}` started at {now}");

        let site = CallSite {
            now_millis: now,
            file: Some(Location::caller().file()),
        };
        self.print_timer(glyphs::TIMER_START, Color::GREEN, &label, "Initialized timer...", &site);
        label
    }

    /// Stop a timer, print how long it ran, and return the result.
    ///
    /// Without a label the newest generated timer is stopped (or else the
    /// newest timer). Returns `None` while disabled or when no such timer is
    /// running; nothing is printed in either case.
    #[track_caller]
    pub fn time_end<'a>(&mut self, label: impl Into<Option<&'a str>>) -> Option<TimerResult> {
        if self.disabled {
            return None;
        }

        let label = label.into();
        let now = self.clock.now_millis();
        let Some(result) = self.timers.stop(label, now) else {
            warn!(
                target: targets::TIMER,
                "no running timer {}",
                label.map_or_else(|| "to end".to_string(), |l| format!("named `{l}`"))
            );
            return None;
        };

        let site = CallSite {
            now_millis: now,
            file: Some(Location::caller().file()),
        };
        let text = format!("Timer run for: {}", format_duration(result.span));
        self.print_timer(glyphs::TIMER_END, Color::RED, &result.label, &text, &site);
        Some(result)
    }

    /// Timer lines are informational; failures are reported as diagnostics only.
    fn print_timer(&self, glyph: &str, color: Color, label: &str, text: &str, site: &CallSite) {
        if LogLevel::Info > self.config.log_level {
            return;
        }

        let written = self
            .formatter()
            .format_timer(glyph, color, label, text, site)
            .and_then(|line| {
                self.console
                    .write_line(Stream::Stdout, &line)
                    .map_err(Error::from)
            });

        if let Err(err) = written {
            warn!(target: targets::CONSOLE, "failed to print timer `{label}`: {err}");
        }
    }

    // ─────────────────────────────────────────────────
    // Derivation and State Control
    // ─────────────────────────────────────────────────

    /// Derive a logger with additional scope names.
    ///
    /// A list scope, or a scope set by an earlier `scope` call, is extended.
    /// Otherwise the configured scope is replaced: a single name becomes the
    /// scope and several names become a list. With no names the scope is
    /// kept as is.
    #[must_use]
    pub fn scope<I>(&self, names: I) -> Logger
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return self.derive(self.config.scope.clone(), self.scoped);
        }

        let scope = match &self.config.scope {
            Some(Scope::Many(current)) => {
                let mut extended = current.clone();
                extended.append(&mut names);
                Scope::Many(extended)
            }
            Some(Scope::One(current)) if self.scoped => {
                names.insert(0, current.clone());
                Scope::Many(names)
            }
            _ if names.len() == 1 => Scope::One(names.remove(0)),
            _ => Scope::Many(names),
        };

        self.derive(Some(scope), true)
    }

    /// Derive a logger without any scope.
    #[must_use]
    pub fn unscope(&self) -> Logger {
        self.derive(None, false)
    }

    /// Stop all output from this logger (not its parent or children).
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    /// Resume output from this logger.
    pub fn enable(&mut self) {
        self.disabled = false;
    }

    /// Derive a logger whose scope is the current names followed by `names`.
    pub(crate) fn nested<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Logger {
        let mut all = self
            .config
            .scope
            .as_ref()
            .map(|scope| scope.names().to_vec())
            .unwrap_or_default();
        all.extend(names.into_iter().map(String::from));
        self.derive(Some(Scope::Many(all)), true)
    }

    fn derive(&self, scope: Option<Scope>, scoped: bool) -> Logger {
        let mut config = self.config.clone();
        config.scope = scope;

        Logger {
            config,
            console: self.console.clone(),
            clock: self.clock.clone(),
            disabled: self.disabled,
            scoped,
            timers: TimerRegistry::new(),
        }
    }

    fn formatter(&self) -> MessageFormatter<'_> {
        let rich = self
            .config
            .context
            .map_or_else(|| self.console.is_rich(), |ctx| ctx.is_rich());
        MessageFormatter::new(&self.config, Painter::new(rich))
    }

    fn call_site(&self, file: Option<&'static str>) -> CallSite {
        CallSite {
            now_millis: self.clock.now_millis(),
            file,
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(PartialConfig::default())
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("scope", &self.config.scope)
            .field("disabled", &self.disabled)
            .field("active_timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

/// Builder for configuring a logger.
///
/// # Example
///
/// ```ignore
/// use fxlog::{LoggerBuilder, ManualClock, PartialConfig};
/// use fxlog::testing::TestConsole;
///
/// let tc = TestConsole::new();
/// let logger = LoggerBuilder::new()
///     .config(PartialConfig::new().scope("test"))
///     .console(tc.console())
///     .clock(ManualClock::new(0))
///     .build();
/// ```
#[derive(Default)]
pub struct LoggerBuilder {
    defaults: Option<LoggerConfig>,
    config: PartialConfig,
    console: Option<Arc<FxConsole>>,
    clock: Option<Arc<dyn Clock>>,
}

impl LoggerBuilder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the built-in defaults the partial configuration is merged over.
    #[must_use]
    pub fn defaults(mut self, defaults: LoggerConfig) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Set the user configuration.
    #[must_use]
    pub fn config(mut self, config: PartialConfig) -> Self {
        self.config = config;
        self
    }

    /// Write to `console` instead of the global one.
    #[must_use]
    pub fn console(mut self, console: Arc<FxConsole>) -> Self {
        self.console = Some(console);
        self
    }

    /// Read time from `clock` instead of the system clock.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Build the logger.
    #[must_use]
    pub fn build(self) -> Logger {
        let config = crate::config::merge(self.defaults.unwrap_or_default(), self.config);

        Logger {
            disabled: config.disabled,
            scoped: false,
            config,
            console: self.console.unwrap_or_else(crate::console::console),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            timers: TimerRegistry::new(),
        }
    }
}

impl std::fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("config", &self.config)
            .field("has_console", &self.console.is_some())
            .field("has_clock", &self.clock.is_some())
            .finish_non_exhaustive()
    }
}

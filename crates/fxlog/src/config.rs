//! Logger configuration and the default/partial merge.
//!
//! [`LoggerConfig`] is the effective configuration a logger renders with.
//! Callers describe only what they want to change with a [`PartialConfig`],
//! which is merged over the defaults: every field present in the partial
//! replaces the default, except `types`, which is merged key by key.
//!
//! Partial configurations can be built in code or loaded from JSON or TOML:
//!
//! ```json
//! {
//!   "scope": ["api", "v2"],
//!   "presets": ["date", "scope", "badge", "label"],
//!   "colorScope": "label",
//!   "uppercase": ["label"],
//!   "types": {
//!     "santa": { "badge": "🎅", "color": "red", "label": "santa" },
//!     "warn": null
//!   }
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use fxlog_core::logging::{debug, targets};
use fxlog_core::{BoxError, Error, Result};
use serde::{Deserialize, Deserializer};

use crate::detection::DisplayContext;
use crate::theme::glyphs;

/// Severity tag of a log type.
///
/// Ordered from most to least severe, so a type prints when its level is
/// `<=` the configured threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    /// Warnings and errors go to stderr.
    #[must_use]
    pub fn is_stderr(self) -> bool {
        matches!(self, Self::Error | Self::Warn)
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug | log::Level::Trace => Self::Debug,
        }
    }
}

/// One log kind: its badge, color, label and severity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct LogTypeConfig {
    pub badge: Option<String>,
    /// Color name; unknown names render uncolored.
    pub color: Option<String>,
    /// Empty labels are replaced by the type name during merge.
    pub label: String,
    pub level: Option<LogLevel>,
}

impl LogTypeConfig {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Effective severity; untagged types count as `info`.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.level.unwrap_or_default()
    }
}

/// Toggle-able decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Date,
    Filename,
    Scope,
    Badge,
    Label,
}

/// Which parts of a line carry the type's color.
///
/// | policy        | label | badge | whole line |
/// |---------------|-------|-------|------------|
/// | `all`         | yes   | yes   | yes        |
/// | `label-badge` | yes   | yes   | no         |
/// | `label`       | yes   | no    | no         |
/// | `badge`       | no    | yes   | no         |
/// | `none`        | no    | no    | no         |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScope {
    All,
    #[default]
    LabelBadge,
    Label,
    Badge,
    None,
}

impl ColorScope {
    #[must_use]
    pub fn colors_label(self) -> bool {
        matches!(self, Self::All | Self::LabelBadge | Self::Label)
    }

    /// Also governs timer glyphs.
    #[must_use]
    pub fn colors_badge(self) -> bool {
        matches!(self, Self::All | Self::LabelBadge | Self::Badge)
    }

    #[must_use]
    pub fn colors_all(self) -> bool {
        matches!(self, Self::All)
    }
}

/// Line elements that can be underlined or uppercased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Prefix,
    Date,
    Filename,
    Scope,
    Badge,
    Label,
    Message,
}

/// A logger's scope: one name or an ordered list of names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Scope {
    One(String),
    Many(Vec<String>),
}

impl Scope {
    /// Scope names in render order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        match self {
            Self::One(name) => std::slice::from_ref(name),
            Self::Many(names) => names,
        }
    }
}

impl From<&str> for Scope {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for Scope {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<Vec<String>> for Scope {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

impl From<Vec<&str>> for Scope {
    fn from(names: Vec<&str>) -> Self {
        Self::Many(names.into_iter().map(String::from).collect())
    }
}

/// Text produced by a static prefix provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixParts(pub Vec<String>);

impl From<&str> for PrefixParts {
    fn from(part: &str) -> Self {
        Self(vec![part.to_string()])
    }
}

impl From<String> for PrefixParts {
    fn from(part: String) -> Self {
        Self(vec![part])
    }
}

impl From<Vec<String>> for PrefixParts {
    fn from(parts: Vec<String>) -> Self {
        Self(parts)
    }
}

impl From<Vec<&str>> for PrefixParts {
    fn from(parts: Vec<&str>) -> Self {
        Self(parts.into_iter().map(String::from).collect())
    }
}

type PrefixFn = Arc<dyn Fn() -> Result<Vec<String>, BoxError> + Send + Sync>;

/// Static text placed before every other fragment of a line.
#[derive(Clone, Deserialize)]
#[serde(from = "PrefixText")]
pub enum Prefix {
    Static(Vec<String>),
    /// Re-evaluated on every log call.
    Dynamic(PrefixFn),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PrefixText {
    One(String),
    Many(Vec<String>),
}

impl From<PrefixText> for Prefix {
    fn from(text: PrefixText) -> Self {
        match text {
            PrefixText::One(part) => Self::Static(vec![part]),
            PrefixText::Many(parts) => Self::Static(parts),
        }
    }
}

impl Prefix {
    /// A fixed prefix.
    pub fn text(parts: impl Into<PrefixParts>) -> Self {
        Self::Static(parts.into().0)
    }

    /// A prefix computed on every call.
    ///
    /// If the provider fails, the log call fails with [`Error::Prefix`] and
    /// nothing is written.
    pub fn dynamic<F, T>(provider: F) -> Self
    where
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
        T: Into<PrefixParts>,
    {
        Self::Dynamic(Arc::new(move || provider().map(|parts| parts.into().0)))
    }

    /// Produce the prefix parts for one call.
    pub fn resolve(&self) -> Result<Vec<String>> {
        match self {
            Self::Static(parts) => Ok(parts.clone()),
            Self::Dynamic(provider) => provider().map_err(Error::Prefix),
        }
    }
}

impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(parts) => f.debug_tuple("Static").field(parts).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
        }
    }
}

/// Effective logger configuration.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub scope: Option<Scope>,
    pub prefix: Option<Prefix>,
    /// Enabled decorations, in render order.
    pub presets: Vec<Preset>,
    pub color_scope: ColorScope,
    pub underline: BTreeSet<Element>,
    pub uppercase: BTreeSet<Element>,
    pub types: BTreeMap<String, LogTypeConfig>,
    /// Initial enabled/disabled state.
    pub disabled: bool,
    /// Types more verbose than this are suppressed.
    pub log_level: LogLevel,
    /// Overrides the console's styling when set.
    pub context: Option<DisplayContext>,
}

/// Types every logger starts with.
pub const DEFAULT_TYPES: [&str; 5] = ["log", "info", "success", "warn", "error"];

/// Scope used when none is configured.
pub const DEFAULT_SCOPE: &str = "fxlog";

impl Default for LoggerConfig {
    fn default() -> Self {
        let types = BTreeMap::from([
            ("log".to_string(), LogTypeConfig::new("log")),
            (
                "info".to_string(),
                LogTypeConfig::new("info")
                    .with_badge(glyphs::INFO)
                    .with_color("blue"),
            ),
            (
                "success".to_string(),
                LogTypeConfig::new("success")
                    .with_badge(glyphs::SUCCESS)
                    .with_color("green"),
            ),
            (
                "warn".to_string(),
                LogTypeConfig::new("warn")
                    .with_badge(glyphs::WARN)
                    .with_color("yellow")
                    .with_level(LogLevel::Warn),
            ),
            (
                "error".to_string(),
                LogTypeConfig::new("error")
                    .with_badge(glyphs::ERROR)
                    .with_color("red")
                    .with_level(LogLevel::Error),
            ),
        ]);

        Self {
            scope: Some(Scope::from(DEFAULT_SCOPE)),
            prefix: None,
            presets: vec![Preset::Date, Preset::Scope, Preset::Badge, Preset::Label],
            color_scope: ColorScope::default(),
            underline: BTreeSet::new(),
            uppercase: BTreeSet::new(),
            types,
            disabled: false,
            log_level: LogLevel::Debug,
            context: None,
        }
    }
}

impl LoggerConfig {
    /// Defaults with `partial` merged over them.
    #[must_use]
    pub fn merged(partial: PartialConfig) -> Self {
        merge(Self::default(), partial)
    }

    /// Look up a log type.
    pub fn log_type(&self, name: &str) -> Result<&LogTypeConfig> {
        self.types
            .get(name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))
    }

    #[must_use]
    pub fn has_preset(&self, preset: Preset) -> bool {
        self.presets.contains(&preset)
    }

    #[must_use]
    pub fn is_underlined(&self, element: Element) -> bool {
        self.underline.contains(&element)
    }

    #[must_use]
    pub fn is_uppercased(&self, element: Element) -> bool {
        self.uppercase.contains(&element)
    }

    /// Label as displayed, after uppercasing.
    #[must_use]
    pub fn display_label(&self, log_type: &LogTypeConfig) -> String {
        if self.is_uppercased(Element::Label) {
            log_type.label.to_uppercase()
        } else {
            log_type.label.clone()
        }
    }

    /// Width of the widest displayed label across all types.
    #[must_use]
    pub fn label_width(&self) -> usize {
        self.types
            .values()
            .map(|t| self.display_label(t).chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// User overrides; absent fields keep their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialConfig {
    /// `Some(None)` clears the scope.
    #[serde(deserialize_with = "present")]
    pub scope: Option<Option<Scope>>,
    pub prefix: Option<Prefix>,
    pub presets: Option<Vec<Preset>>,
    #[serde(alias = "color_scope")]
    pub color_scope: Option<ColorScope>,
    pub underline: Option<BTreeSet<Element>>,
    pub uppercase: Option<BTreeSet<Element>>,
    /// `None` entries remove the type.
    pub types: BTreeMap<String, Option<LogTypeConfig>>,
    pub disabled: Option<bool>,
    #[serde(alias = "log_level")]
    pub log_level: Option<LogLevel>,
    pub context: Option<DisplayContext>,
}

/// Distinguishes an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl PartialConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document; `null` yields an empty partial.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let parsed: Option<Self> = serde_json::from_str(json)?;
        Ok(parsed.unwrap_or_default())
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a `.toml` file, or JSON for any other extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(target: targets::CONFIG, "loading logger config from {}", path.display());

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    #[must_use]
    pub fn scope(mut self, scope: impl Into<Scope>) -> Self {
        self.scope = Some(Some(scope.into()));
        self
    }

    #[must_use]
    pub fn without_scope(mut self) -> Self {
        self.scope = Some(None);
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    #[must_use]
    pub fn presets(mut self, presets: impl IntoIterator<Item = Preset>) -> Self {
        self.presets = Some(presets.into_iter().collect());
        self
    }

    #[must_use]
    pub fn color_scope(mut self, color_scope: ColorScope) -> Self {
        self.color_scope = Some(color_scope);
        self
    }

    #[must_use]
    pub fn underline(mut self, elements: impl IntoIterator<Item = Element>) -> Self {
        self.underline = Some(elements.into_iter().collect());
        self
    }

    #[must_use]
    pub fn uppercase(mut self, elements: impl IntoIterator<Item = Element>) -> Self {
        self.uppercase = Some(elements.into_iter().collect());
        self
    }

    /// Add or replace one log type.
    #[must_use]
    pub fn log_type(mut self, name: impl Into<String>, log_type: LogTypeConfig) -> Self {
        self.types.insert(name.into(), Some(log_type));
        self
    }

    /// Remove a log type from the merged map.
    #[must_use]
    pub fn remove_type(mut self, name: impl Into<String>) -> Self {
        self.types.insert(name.into(), None);
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    #[must_use]
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    #[must_use]
    pub fn context(mut self, context: DisplayContext) -> Self {
        self.context = Some(context);
        self
    }
}

/// Merge `partial` over `defaults`.
///
/// Top-level fields are replaced wholesale; `types` entries are replaced,
/// added or removed one key at a time. Values are not validated.
#[must_use]
pub fn merge(defaults: LoggerConfig, partial: PartialConfig) -> LoggerConfig {
    let mut config = defaults;

    if let Some(scope) = partial.scope {
        config.scope = scope;
    }
    if let Some(prefix) = partial.prefix {
        config.prefix = Some(prefix);
    }
    if let Some(presets) = partial.presets {
        config.presets = presets;
    }
    if let Some(color_scope) = partial.color_scope {
        config.color_scope = color_scope;
    }
    if let Some(underline) = partial.underline {
        config.underline = underline;
    }
    if let Some(uppercase) = partial.uppercase {
        config.uppercase = uppercase;
    }
    if let Some(disabled) = partial.disabled {
        config.disabled = disabled;
    }
    if let Some(level) = partial.log_level {
        config.log_level = level;
    }
    if let Some(context) = partial.context {
        config.context = Some(context);
    }

    for (name, entry) in partial.types {
        match entry {
            Some(mut log_type) => {
                if log_type.label.is_empty() {
                    log_type.label = name.clone();
                }
                config.types.insert(name, log_type);
            }
            None => {
                debug!(target: targets::CONFIG, "removing log type `{name}`");
                config.types.remove(&name);
            }
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.scope, Some(Scope::One("fxlog".into())));
        assert_eq!(
            config.presets,
            vec![Preset::Date, Preset::Scope, Preset::Badge, Preset::Label]
        );
        assert_eq!(config.color_scope, ColorScope::LabelBadge);
        assert!(!config.disabled);
        for name in DEFAULT_TYPES {
            assert!(config.types.contains_key(name), "missing {name}");
        }
        assert_eq!(config.types["log"].badge, None);
        assert_eq!(config.types["success"].badge.as_deref(), Some("✔"));
        assert_eq!(config.label_width(), "success".len());
    }

    #[test]
    fn test_empty_partial_is_default() {
        let config = LoggerConfig::merged(PartialConfig::default());
        let defaults = LoggerConfig::default();
        assert_eq!(config.scope, defaults.scope);
        assert_eq!(config.types, defaults.types);
        assert_eq!(config.presets, defaults.presets);
    }

    #[test]
    fn test_top_level_fields_override() {
        let config = LoggerConfig::merged(
            PartialConfig::new()
                .scope(vec!["a", "b"])
                .presets([Preset::Label])
                .color_scope(ColorScope::None)
                .uppercase([Element::Label])
                .disabled(true),
        );
        assert_eq!(config.scope, Some(Scope::Many(vec!["a".into(), "b".into()])));
        assert_eq!(config.presets, vec![Preset::Label]);
        assert_eq!(config.color_scope, ColorScope::None);
        assert!(config.is_uppercased(Element::Label));
        assert!(config.disabled);
    }

    #[test]
    fn test_types_merge_per_key() {
        let config = LoggerConfig::merged(
            PartialConfig::new()
                .log_type("info", LogTypeConfig::new("notice").with_color("cyan"))
                .log_type("santa", LogTypeConfig::new("santa").with_badge("🎅")),
        );
        assert_eq!(config.types["info"].label, "notice");
        assert_eq!(config.types["info"].badge, None);
        assert_eq!(config.types["santa"].badge.as_deref(), Some("🎅"));
        // Untouched defaults survive.
        assert_eq!(config.types["error"].label, "error");
        assert_eq!(config.types.len(), 6);
    }

    #[test]
    fn test_remove_type() {
        let config = LoggerConfig::merged(PartialConfig::new().remove_type("warn"));
        assert!(matches!(config.log_type("warn"), Err(Error::UnknownType(t)) if t == "warn"));
        assert!(config.log_type("error").is_ok());
    }

    #[test]
    fn test_without_scope() {
        let config = LoggerConfig::merged(PartialConfig::new().without_scope());
        assert_eq!(config.scope, None);
    }

    #[test]
    fn test_uppercase_affects_label_width() {
        let config = LoggerConfig::merged(
            PartialConfig::new()
                .uppercase([Element::Label])
                .log_type("gruß", LogTypeConfig::new("großgruß")),
        );
        // "GROSSGRUSS" is two chars longer than "großgruß".
        assert_eq!(config.label_width(), 10);
    }

    #[test]
    fn test_from_json() {
        let partial = PartialConfig::from_json_str(
            r#"{
                "scope": ["api", "v2"],
                "prefix": "svc",
                "colorScope": "label-badge",
                "underline": ["message"],
                "logLevel": "warn",
                "context": "plain",
                "types": {
                    "santa": { "badge": "🎅", "color": "red" },
                    "log": null
                }
            }"#,
        )
        .unwrap();
        let config = LoggerConfig::merged(partial);

        assert_eq!(config.scope, Some(Scope::from(vec!["api", "v2"])));
        assert_eq!(config.prefix.as_ref().unwrap().resolve().unwrap(), vec!["svc"]);
        assert!(config.is_underlined(Element::Message));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.context, Some(DisplayContext::Plain));
        assert_eq!(config.types["santa"].label, "santa");
        assert!(!config.types.contains_key("log"));
    }

    #[test]
    fn test_json_null_scope_clears() {
        let partial = PartialConfig::from_json_str(r#"{ "scope": null }"#).unwrap();
        assert_eq!(LoggerConfig::merged(partial).scope, None);

        let partial = PartialConfig::from_json_str("{}").unwrap();
        assert_eq!(
            LoggerConfig::merged(partial).scope,
            Some(Scope::from("fxlog"))
        );
    }

    #[test]
    fn test_null_document_is_default() {
        let partial = PartialConfig::from_json_str("null").unwrap();
        assert!(partial.scope.is_none());
        assert!(partial.types.is_empty());
    }

    #[test]
    fn test_from_toml() {
        let partial = PartialConfig::from_toml_str(
            r#"
            scope = "worker"
            presets = ["scope", "label"]
            color_scope = "none"

            [types.debug]
            label = "debug"
            level = "debug"
            "#,
        )
        .unwrap();
        let config = LoggerConfig::merged(partial);
        assert_eq!(config.scope, Some(Scope::from("worker")));
        assert_eq!(config.color_scope, ColorScope::None);
        assert_eq!(config.types["debug"].level(), LogLevel::Debug);
    }

    #[test]
    fn test_invalid_documents_are_config_errors() {
        assert!(matches!(
            PartialConfig::from_json_str(r#"{ "colorScope": "rainbow" }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            PartialConfig::from_toml_str("presets = 3"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_unknown_color_accepted() {
        let config = LoggerConfig::merged(
            PartialConfig::new().log_type("odd", LogTypeConfig::new("odd").with_color("plaid")),
        );
        assert_eq!(config.types["odd"].color.as_deref(), Some("plaid"));
    }

    #[test]
    fn test_dynamic_prefix_resolves_each_call() {
        let counter = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let seen = counter.clone();
        let prefix = Prefix::dynamic(move || {
            let n = seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(format!("#{n}"))
        });
        assert_eq!(prefix.resolve().unwrap(), vec!["#0"]);
        assert_eq!(prefix.resolve().unwrap(), vec!["#1"]);
    }

    #[test]
    fn test_failing_prefix_is_prefix_error() {
        let prefix = Prefix::dynamic(|| Err::<String, _>("no hostname".into()));
        assert!(matches!(prefix.resolve(), Err(Error::Prefix(_))));
        assert_eq!(format!("{prefix:?}"), "Dynamic(<fn>)");
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(LogLevel::from(log::Level::Trace), LogLevel::Debug);
        assert_eq!(LogLevel::from(log::Level::Warn), LogLevel::Warn);
        assert!(LogLevel::Error < LogLevel::Info);
        assert!(LogLevel::Warn.is_stderr());
        assert!(!LogLevel::Info.is_stderr());
    }
}

//! Prefix fragments: static prefix, date, file name and scope.
//!
//! Fragments come out in a fixed order: the static prefix first, then one
//! fragment per enabled preset in the order the presets were declared.
//! Empty fragments are dropped, except an explicitly empty scope name, which
//! renders as `[]`.

use std::path::Path;

use chrono::{Local, TimeZone};
use fxlog_core::Result;

use crate::config::{Element, LoggerConfig, Preset, Scope};
use crate::theme::{Color, Painter};

/// Where and when a line is emitted.
#[derive(Debug, Clone, Copy)]
pub struct CallSite {
    pub now_millis: u64,
    /// Source file of the logging call, when known.
    pub file: Option<&'static str>,
}

/// Applies the configured uppercase/underline rules and a color to one element.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Decorator<'a> {
    config: &'a LoggerConfig,
    painter: Painter,
}

impl<'a> Decorator<'a> {
    pub(crate) fn new(config: &'a LoggerConfig, painter: Painter) -> Self {
        Self { config, painter }
    }

    pub(crate) fn decorate(&self, element: Element, text: &str, color: Option<Color>) -> String {
        let underline = self.config.is_underlined(element);
        if self.config.is_uppercased(element) {
            self.painter.paint(&text.to_uppercase(), color, underline)
        } else {
            self.painter.paint(text, color, underline)
        }
    }
}

/// Builds the fragments that precede the badge and label.
#[derive(Debug, Clone, Copy)]
pub struct PrefixBuilder<'a> {
    config: &'a LoggerConfig,
    decorator: Decorator<'a>,
}

impl<'a> PrefixBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a LoggerConfig, painter: Painter) -> Self {
        Self {
            config,
            decorator: Decorator::new(config, painter),
        }
    }

    /// Every prefix fragment, each colored with `color` when given.
    ///
    /// Fails only when a dynamic static-prefix provider fails.
    pub fn fragments(&self, color: Option<Color>, site: &CallSite) -> Result<Vec<String>> {
        let mut fragments = Vec::with_capacity(self.config.presets.len() + 1);

        if let Some(prefix) = &self.config.prefix {
            let text = prefix.resolve()?.join(" ");
            if !text.is_empty() {
                fragments.push(self.decorator.decorate(Element::Prefix, &text, color));
            }
        }

        let mut seen = Vec::with_capacity(self.config.presets.len());
        for &preset in &self.config.presets {
            if seen.contains(&preset) {
                continue;
            }
            seen.push(preset);

            let fragment = match preset {
                Preset::Date => Some(self.decorator.decorate(
                    Element::Date,
                    &date_fragment(site.now_millis),
                    color,
                )),
                Preset::Filename => site.file.and_then(file_fragment).map(|text| {
                    self.decorator.decorate(Element::Filename, &text, color)
                }),
                Preset::Scope => self
                    .config
                    .scope
                    .as_ref()
                    .and_then(scope_fragment)
                    .map(|text| self.decorator.decorate(Element::Scope, &text, color)),
                // Rendered together with the label.
                Preset::Badge | Preset::Label => None,
            };

            fragments.extend(fragment);
        }

        Ok(fragments)
    }
}

/// `[YYYY-MM-DD HH:mm:ss.mmm]` in local time.
#[must_use]
pub fn date_fragment(now_millis: u64) -> String {
    let millis = i64::try_from(now_millis).unwrap_or(i64::MAX);
    let stamp = Local
        .timestamp_millis_opt(millis)
        .earliest()
        .unwrap_or_else(Local::now);
    format!("[{}]", stamp.format("%Y-%m-%d %H:%M:%S%.3f"))
}

/// `[main.rs]` for a source path; `None` when there is no file name.
#[must_use]
pub fn file_fragment(file: &str) -> Option<String> {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| format!("[{name}]"))
}

/// One bracketed token per scope name, space-joined.
#[must_use]
pub fn scope_fragment(scope: &Scope) -> Option<String> {
    let names = scope.names();
    if names.is_empty() {
        return None;
    }
    Some(
        names
            .iter()
            .map(|name| format!("[{name}]"))
            .collect::<Vec<_>>()
            .join(" "),
    )
}

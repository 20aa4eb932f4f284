//! Message formatting.
//!
//! A line is assembled as
//!
//! ```text
//! [static prefix] [preset fragments...] [badge label<pad>] [message]
//! ```
//!
//! with fragments space-joined and empty ones dropped. The label is padded to
//! the widest label across all configured types so that messages line up.

use fxlog_core::{Result, Value};

use crate::config::{Element, LogTypeConfig, LoggerConfig, Preset};
use crate::prefix::{CallSite, Decorator, PrefixBuilder};
use crate::theme::{Color, Painter};

/// Renders log lines for one configuration.
#[derive(Debug, Clone, Copy)]
pub struct MessageFormatter<'a> {
    config: &'a LoggerConfig,
    painter: Painter,
    decorator: Decorator<'a>,
}

impl<'a> MessageFormatter<'a> {
    #[must_use]
    pub fn new(config: &'a LoggerConfig, painter: Painter) -> Self {
        Self {
            config,
            painter,
            decorator: Decorator::new(config, painter),
        }
    }

    /// Format one call of type `kind`.
    ///
    /// Fails with [`Error::UnknownType`](fxlog_core::Error::UnknownType) when
    /// `kind` is not configured, or when the static prefix provider fails.
    pub fn format(&self, kind: &str, args: &[Value], site: &CallSite) -> Result<String> {
        let log_type = self.config.log_type(kind)?;
        let color = log_type.color.as_deref().and_then(Color::from_name);
        let line_color = color.filter(|_| self.config.color_scope.colors_all());

        let mut fragments =
            PrefixBuilder::new(self.config, self.painter).fragments(line_color, site)?;

        let body = render_args(args);
        if let Some(head) = self.type_fragment(log_type, color, !body.is_empty()) {
            fragments.push(head);
        }
        if !body.is_empty() {
            fragments.push(self.decorator.decorate(Element::Message, &body, line_color));
        }

        Ok(fragments.join(" "))
    }

    /// Format a timer line: prefix fragments, `glyph label`, then `text`.
    ///
    /// The timer label is printed as given; only underlining applies to it.
    pub fn format_timer(
        &self,
        glyph: &str,
        glyph_color: Color,
        label: &str,
        text: &str,
        site: &CallSite,
    ) -> Result<String> {
        let color_scope = self.config.color_scope;
        let line_color = Some(glyph_color).filter(|_| color_scope.colors_all());

        let mut fragments =
            PrefixBuilder::new(self.config, self.painter).fragments(line_color, site)?;

        let glyph_color = Some(glyph_color).filter(|_| color_scope.colors_badge());
        fragments.push(format!(
            "{} {}",
            self.painter.paint(glyph, glyph_color, false),
            self.painter.paint(label, glyph_color, self.config.is_underlined(Element::Label)),
        ));
        fragments.push(self.decorator.decorate(Element::Message, text, line_color));

        Ok(fragments.join(" "))
    }

    /// `badge label`, each part present only when its preset is enabled.
    fn type_fragment(
        &self,
        log_type: &LogTypeConfig,
        color: Option<Color>,
        pad: bool,
    ) -> Option<String> {
        let color_scope = self.config.color_scope;
        let mut parts = Vec::with_capacity(2);

        if self.config.has_preset(Preset::Badge) {
            if let Some(badge) = log_type.badge.as_deref().filter(|b| !b.is_empty()) {
                let badge_color = color.filter(|_| color_scope.colors_badge());
                parts.push(self.decorator.decorate(Element::Badge, badge, badge_color));
            }
        }

        if self.config.has_preset(Preset::Label) {
            let label_color = color.filter(|_| color_scope.colors_label());
            let mut label = self.decorator.decorate(Element::Label, &log_type.label, label_color);
            if pad {
                let shown = self.config.display_label(log_type).chars().count();
                let width = self.config.label_width();
                label.push_str(&" ".repeat(width.saturating_sub(shown)));
            }
            if !label.is_empty() {
                parts.push(label);
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Join arguments with single spaces; strings verbatim, anything else inspected.
#[must_use]
pub fn render_args(args: &[Value]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

//! Named colors, glyphs and ANSI styling.
//!
//! Colors are configured by name. Unknown names resolve to `None` and the
//! text is left unstyled; a bad color name never fails a log call.

use console::Style;

/// Badges and timer glyphs used by the default configuration.
pub mod glyphs {
    pub const SUCCESS: &str = "✔";
    pub const INFO: &str = "ℹ";
    pub const WARN: &str = "⚠";
    pub const ERROR: &str = "✖";
    /// Printed when a timer starts.
    pub const TIMER_START: &str = "▶";
    /// Printed when a timer ends.
    pub const TIMER_END: &str = "■";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hue {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// A recognized terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    hue: Hue,
    bright: bool,
}

impl Color {
    pub const BLACK: Self = Self::base(Hue::Black);
    pub const RED: Self = Self::base(Hue::Red);
    pub const GREEN: Self = Self::base(Hue::Green);
    pub const YELLOW: Self = Self::base(Hue::Yellow);
    pub const BLUE: Self = Self::base(Hue::Blue);
    pub const MAGENTA: Self = Self::base(Hue::Magenta);
    pub const CYAN: Self = Self::base(Hue::Cyan);
    pub const WHITE: Self = Self::base(Hue::White);
    pub const GRAY: Self = Self {
        hue: Hue::Black,
        bright: true,
    };

    const fn base(hue: Hue) -> Self {
        Self { hue, bright: false }
    }

    /// Resolve a color name such as `red`, `grey`, `bright-blue` or `cyanBright`.
    ///
    /// Matching ignores case, `-`, `_` and spaces. Returns `None` for anything
    /// unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        if matches!(normalized.as_str(), "gray" | "grey") {
            return Some(Self::GRAY);
        }

        let (hue_name, bright) = if let Some(rest) = normalized.strip_prefix("bright") {
            (rest, true)
        } else if let Some(rest) = normalized.strip_suffix("bright") {
            (rest, true)
        } else {
            (normalized.as_str(), false)
        };

        let hue = match hue_name {
            "black" => Hue::Black,
            "red" => Hue::Red,
            "green" => Hue::Green,
            "yellow" => Hue::Yellow,
            "blue" => Hue::Blue,
            "magenta" => Hue::Magenta,
            "cyan" => Hue::Cyan,
            "white" => Hue::White,
            _ => return None,
        };
        Some(Self { hue, bright })
    }

    fn apply(self, style: Style) -> Style {
        let style = match self.hue {
            Hue::Black => style.black(),
            Hue::Red => style.red(),
            Hue::Green => style.green(),
            Hue::Yellow => style.yellow(),
            Hue::Blue => style.blue(),
            Hue::Magenta => style.magenta(),
            Hue::Cyan => style.cyan(),
            Hue::White => style.white(),
        };
        if self.bright { style.bright() } else { style }
    }
}

/// Applies color and underline to text fragments.
///
/// A disabled painter returns text unchanged, which is how plain output is
/// produced.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Style `text`; no escape sequences are produced when nothing applies.
    #[must_use]
    pub fn paint(&self, text: &str, color: Option<Color>, underline: bool) -> String {
        if !self.enabled || text.is_empty() || (color.is_none() && !underline) {
            return text.to_string();
        }

        let mut style = Style::new().force_styling(true);
        if let Some(color) = color {
            style = color.apply(style);
        }
        if underline {
            style = style.underlined();
        }
        style.apply_to(text).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_names() {
        assert_eq!(Color::from_name("red"), Some(Color::RED));
        assert_eq!(Color::from_name("Blue"), Some(Color::BLUE));
        assert_eq!(Color::from_name("grey"), Some(Color::GRAY));
        assert_eq!(Color::from_name("gray"), Some(Color::GRAY));
    }

    #[test]
    fn test_bright_variants() {
        let expected = Some(Color {
            hue: Hue::Cyan,
            bright: true,
        });
        assert_eq!(Color::from_name("cyanBright"), expected);
        assert_eq!(Color::from_name("bright-cyan"), expected);
        assert_eq!(Color::from_name("BRIGHT_CYAN"), expected);
    }

    #[test]
    fn test_unknown_color_is_none() {
        assert_eq!(Color::from_name("chartreuse"), None);
        assert_eq!(Color::from_name(""), None);
        assert_eq!(Color::from_name("bright"), None);
    }

    #[test]
    fn test_disabled_painter_is_identity() {
        let painter = Painter::new(false);
        assert_eq!(painter.paint("warn", Some(Color::YELLOW), true), "warn");
    }

    #[test]
    fn test_enabled_painter_emits_ansi() {
        let painter = Painter::new(true);
        let painted = painter.paint("error", Some(Color::RED), false);
        assert!(painted.contains("\u{1b}["));
        assert!(painted.contains("error"));
        let stripped = strip_ansi_escapes::strip(painted.as_bytes());
        assert_eq!(String::from_utf8_lossy(&stripped), "error");
    }

    #[test]
    fn test_painter_skips_unstyled_text() {
        let painter = Painter::new(true);
        assert_eq!(painter.paint("log", None, false), "log");
        assert_eq!(painter.paint("", Some(Color::RED), true), "");
    }
}

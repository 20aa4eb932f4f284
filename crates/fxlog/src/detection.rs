//! Plain/rich output detection
//!
//! Determines whether ANSI styling should be emitted for the current process.

use serde::Deserialize;

/// Display context representing the output environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayContext {
    /// Plain text, no escape sequences
    Plain,
    /// Colored and underlined output
    #[default]
    Rich,
}

impl DisplayContext {
    /// Create a plain-output context
    #[must_use]
    pub fn new_plain() -> Self {
        Self::Plain
    }

    /// Create a rich-output context
    #[must_use]
    pub fn new_rich() -> Self {
        Self::Rich
    }

    /// Auto-detect the display context from environment
    #[must_use]
    pub fn detect() -> Self {
        if should_enable_rich() {
            Self::Rich
        } else {
            Self::Plain
        }
    }

    /// Check if styling is enabled
    #[must_use]
    pub fn is_rich(&self) -> bool {
        matches!(self, Self::Rich)
    }

    /// Check if output is plain text
    #[must_use]
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Plain)
    }
}

/// Determine if plain output was explicitly requested
#[must_use]
pub fn is_plain_requested() -> bool {
    std::env::var("FXLOG_PLAIN").is_ok() || std::env::var("NO_COLOR").is_ok()
}

/// Determine if rich output should be enabled
#[must_use]
pub fn should_enable_rich() -> bool {
    // Explicit enable always wins
    if std::env::var("FXLOG_FORCE_COLOR").is_ok() {
        return true;
    }

    if is_plain_requested() {
        return false;
    }

    // Terminal and CLICOLOR checks
    console::colors_enabled()
}

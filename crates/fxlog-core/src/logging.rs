//! Diagnostic logging for fxlog itself.
//!
//! fxlog reports its own internal events (timer misses, config loading,
//! console write failures) through the standard [`log`] facade, so that an
//! application's existing backend decides whether they are shown. These
//! diagnostics are never routed through an fxlog logger.
//!
//! # Log Targets
//!
//! - `fxlog`: Root target for all fxlog diagnostics
//! - `fxlog::timer`: Timer bookkeeping
//! - `fxlog::config`: Configuration loading and merging
//! - `fxlog::console`: Console sink failures
//!
//! Example filter: `RUST_LOG=fxlog::timer=debug`

pub use log::{debug, error, info, trace, warn};

pub use log::{Level, LevelFilter};

/// Log targets used by fxlog components.
pub mod targets {
    /// Root target for all fxlog diagnostics.
    pub const FXLOG: &str = "fxlog";

    /// Timer start/stop bookkeeping.
    pub const TIMER: &str = "fxlog::timer";

    /// Configuration loading and merging.
    pub const CONFIG: &str = "fxlog::config";

    /// Console sink write failures.
    pub const CONSOLE: &str = "fxlog::console";
}

/// Returns whether diagnostics are enabled at the given level for the given target.
#[inline]
#[must_use]
pub fn is_enabled(level: Level, target: &str) -> bool {
    log::log_enabled!(target: target, level)
}

//! Line-oriented console sink

use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

type Writer = Box<dyn Write + Send>;

/// Which standard stream a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Console that fxlog loggers write their lines to
///
/// Lines are written whole and flushed immediately, in call order. Derived
/// loggers share their parent's console.
pub struct FxConsole {
    out: Mutex<Writer>,
    /// `None` routes stderr lines to `out`.
    err: Option<Mutex<Writer>>,
    rich: bool,
}

impl FxConsole {
    /// Create with automatic detection
    #[must_use]
    pub fn new() -> Self {
        Self::with_enabled(crate::detection::should_enable_rich())
    }

    /// Create over stdout/stderr with explicit styling on or off
    #[must_use]
    pub fn with_enabled(rich: bool) -> Self {
        Self {
            out: Mutex::new(Box::new(io::stdout())),
            err: Some(Mutex::new(Box::new(io::stderr()))),
            rich,
        }
    }

    /// Create with custom writer receiving both streams (for testing)
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(writer: W, rich: bool) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
            err: None,
            rich,
        }
    }

    /// Check if styled output is enabled
    pub fn is_rich(&self) -> bool {
        self.rich
    }

    /// Write one line followed by a newline.
    pub fn write_line(&self, stream: Stream, line: &str) -> io::Result<()> {
        let target = match (stream, &self.err) {
            (Stream::Stderr, Some(err)) => err,
            _ => &self.out,
        };

        let mut writer = target
            .lock()
            .map_err(|_| io::Error::other("console lock poisoned"))?;

        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        writer.write_all(buf.as_bytes())?;
        writer.flush()
    }
}

impl Default for FxConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FxConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FxConsole")
            .field("rich", &self.rich)
            .field("split_streams", &self.err.is_some())
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────
// Global Console Accessor
// ─────────────────────────────────────────────────────────

static CONSOLE: OnceLock<Arc<FxConsole>> = OnceLock::new();

/// Get the process-wide console used by loggers built without one
#[must_use]
pub fn console() -> Arc<FxConsole> {
    CONSOLE.get_or_init(|| Arc::new(FxConsole::new())).clone()
}

/// Initialize the global console with specific settings
/// Must be called before any output; returns error if already initialized
pub fn init_console(rich: bool) -> Result<(), &'static str> {
    CONSOLE
        .set(Arc::new(FxConsole::with_enabled(rich)))
        .map_err(|_| "Console already initialized")
}

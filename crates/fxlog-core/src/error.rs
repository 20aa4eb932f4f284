//! Error type shared by every fxlog crate.

/// Boxed error produced by user-supplied callbacks (prefix providers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while formatting or writing a log line.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested log type is not present in the merged type map.
    #[error("unknown log type `{0}`")]
    UnknownType(String),

    /// The configured static-prefix provider failed.
    #[error("prefix provider failed: {0}")]
    Prefix(#[source] BoxError),

    /// Writing the rendered line to the console failed.
    #[error("failed to write log line: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Wrap a prefix provider failure.
    pub fn prefix(err: impl Into<BoxError>) -> Self {
        Self::Prefix(err.into())
    }

    /// Returns true for programmer errors caused by misconfiguration.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::UnknownType(_) | Self::Config(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result alias used throughout fxlog.
pub type Result<T, E = Error> = std::result::Result<T, E>;

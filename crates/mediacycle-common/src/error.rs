//! Common error types used throughout mediacycle.
//!
//! The variants mirror what a client may be told: a refusal, a miss, or a
//! generic failure. Filesystem detail stays inside the error for operator
//! logs and is never rendered into a response.

/// Common error type for mediacycle.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested path resolves outside the media root, or could not be
    /// resolved at all.
    #[error("Forbidden")]
    Forbidden,

    /// Nothing navigable exists at the requested path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Startup configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new Config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code this error maps to at the response boundary.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Forbidden => 403,
            Self::NotFound(_) => 404,
            Self::Io(_) | Self::Config(_) | Self::Internal(_) => 500,
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

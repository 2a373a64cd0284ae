//! Error types for the medicine catalog.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. Every failure a
//! data source can produce is classified into one of a handful of kinds so the list
//! controller can surface it as state instead of propagating it to the presenter.

use std::fmt;
use thiserror::Error;

/// The main error type for catalog operations.
///
/// The first four variants form the fetch taxonomy: they are what a data source
/// returns and what the list controller stores as `Failed` state. None of them are
/// fatal; all are recoverable by retrying.
///
/// # Examples
///
/// ```
/// use medlist::domain::{CatalogError, ErrorKind};
///
/// let err = CatalogError::Server { status: 503, message: "unavailable".to_string() };
/// assert_eq!(err.kind(), ErrorKind::Server);
/// assert_eq!(err.kind().to_string(), "ServerError");
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No response was received (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The source answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code, or the equivalent for non-HTTP sources.
        status: u16,
        /// Description of the failure.
        message: String,
    },

    /// The payload could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A record decoded but is missing required fields or carries invalid values.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Server { .. } => ErrorKind::Server,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    /// Classifies a transport-level failure.
    ///
    /// Status errors become [`CatalogError::Server`], body decoding failures become
    /// [`CatalogError::Parse`], and everything else (connect, timeout, request
    /// building, body streaming) is a [`CatalogError::Network`] failure.
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Server {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        if err.is_decode() {
            return Self::Parse(err.to_string());
        }
        Self::Network(err.to_string())
    }
}

/// Classification label for a [`CatalogError`].
///
/// The `Display` form (`"NetworkError"`, `"ServerError"`, ...) is what the list
/// controller publishes to presenters as the error indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Server,
    Parse,
    Validation,
    Config,
    Io,
}

impl ErrorKind {
    /// Returns the stable label for this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Network => "NetworkError",
            Self::Server => "ServerError",
            Self::Parse => "ParseError",
            Self::Validation => "ValidationError",
            Self::Config => "ConfigError",
            Self::Io => "IoError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

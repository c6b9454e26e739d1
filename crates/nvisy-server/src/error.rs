//! Service layer error types and utilities.
//!
//! This module provides error handling for the service layer with:
//!
//! - Strongly-typed error kinds for different failure categories
//! - Builder pattern for ergonomic error construction
//! - Type-safe error source tracking with boxed trait objects

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// Type alias for boxed errors that are Send + Sync.
///
/// This is the standard error boxing type used throughout the service layer
/// for error sources.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result type alias for service layer operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error kind enumeration for categorizing service layer errors.
///
/// Separated from [`Error`] to allow pattern matching on error types
/// without accessing the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Configuration-related errors.
    Config,
    /// External service communication errors.
    External,
}

impl ErrorKind {
    /// Returns the error kind as a string for categorization.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::External => "external_service",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service layer error with structured information.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    /// The error category/type
    kind: ErrorKind,
    /// Human-readable error message
    message: Cow<'static, str>,
    /// Optional underlying error that caused this error
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    #[inline]
    fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches a source error to this error, enabling error chain tracking.
    #[inline]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Creates a new configuration error.
    #[inline]
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// Creates a new external service error.
    #[inline]
    pub fn external(
        service: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let full_message = format!("{}: {}", service.into(), message.into());
        Self::new(ErrorKind::External, full_message)
    }
}

impl From<nvisy_redis::Error> for Error {
    fn from(err: nvisy_redis::Error) -> Self {
        match err {
            nvisy_redis::Error::Config(_)
            | nvisy_redis::Error::InvalidSetting { .. }
            | nvisy_redis::Error::InvalidUrl(_) => {
                Error::config(format!("redis: {err}")).with_source(err)
            }
            _ => Error::external("redis", err.to_string()).with_source(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = Error::config("invalid configuration");
        assert_eq!(error.kind(), ErrorKind::Config);
        assert_eq!(error.message(), "invalid configuration");
    }

    #[test]
    fn test_external_service_error() {
        let error = Error::external("redis", "Connection refused");

        assert_eq!(error.kind(), ErrorKind::External);
        assert!(error.to_string().contains("redis"));
        assert!(error.to_string().contains("Connection refused"));
    }

    #[test]
    fn test_redis_settings_error_is_config() {
        let error = Error::from(nvisy_redis::Error::invalid_setting("REDIS_DB", "two"));

        assert_eq!(error.kind(), ErrorKind::Config);
        assert!(error.message().contains("REDIS_DB"));
        assert!(StdError::source(&error).is_some());
    }

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::Config.as_str(), "config");
        assert_eq!(ErrorKind::External.as_str(), "external_service");
    }
}

//! Error types and utilities for Redis configuration and pool operations.

use std::borrow::Cow;

use deadpool::managed::{PoolError, TimeoutType};
use redis::RedisError;

/// Result type for all operations in this crate.
///
/// This is a convenience type alias that defaults to using [`Error`] as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for Redis configuration and connection operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "redis errors should be handled appropriately"]
pub enum Error {
    /// Configuration error.
    ///
    /// Raised when the settings provide neither a connection URL nor a
    /// unix socket path, so no transport can be selected.
    #[error("Configuration error: {0}")]
    Config(Cow<'static, str>),

    /// A setting holds a value of the wrong shape, e.g. a non-numeric database index.
    #[error("Invalid value '{value}' for setting '{key}'")]
    InvalidSetting { key: String, value: String },

    /// The connection URL could not be parsed.
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The redis client rejected the connection parameters, or a command failed.
    #[error("Redis client error: {0}")]
    Client(#[from] RedisError),

    /// Waiting for, creating or recycling a pooled connection timed out.
    #[error("Redis operation timed out")]
    Timeout(TimeoutType),

    /// Unexpected error occurred.
    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl Error {
    /// Creates a new configuration error.
    #[inline]
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a new invalid setting error.
    #[inline]
    pub fn invalid_setting(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns whether this is a configuration error.
    #[inline]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns whether this error indicates a transient failure that might succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Client(err) => err.is_timeout() || err.is_connection_dropped(),
            _ => false,
        }
    }

    /// Returns whether this error indicates a permanent failure that won't succeed on retry.
    #[inline]
    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }
}

impl From<PoolError<RedisError>> for Error {
    fn from(value: PoolError<RedisError>) -> Self {
        match value {
            PoolError::Timeout(timeout) => Self::Timeout(timeout),
            PoolError::Backend(error) => Self::Client(error),
            PoolError::PostCreateHook(err) => {
                tracing::warn!("Unexpected post-create hook error: {}", err);
                Self::Unexpected(err.to_string().into())
            }
            PoolError::NoRuntimeSpecified => {
                tracing::error!("No tokio runtime specified for connection pool");
                Self::Unexpected("No runtime specified".into())
            }
            PoolError::Closed => Self::Unexpected("Connection pool is closed".into()),
        }
    }
}

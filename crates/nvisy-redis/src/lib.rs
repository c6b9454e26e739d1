#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for client-related operations.
///
/// Use this target for logging settings resolution, client construction, and registry events.
pub const TRACING_TARGET_CLIENT: &str = "nvisy_redis::client";

/// Tracing target for connection operations.
///
/// Use this target for logging pool construction, connection establishment, and recycling.
pub const TRACING_TARGET_CONNECTION: &str = "nvisy_redis::connection";

mod client;
mod error;
pub mod prelude;

pub use crate::client::{
    ConnectionPool, DEFAULT_DB, DEFAULT_ENV_PREFIX, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_URL,
    EnvSource, KEY_DB, KEY_MAX_CONNECTIONS, KEY_UNIX_SOCKET_PATH, KEY_URL, PREFIX_OVERRIDE_VAR,
    PoolRegistry, PooledConnection, ProcessEnv, RedisClient, RedisConn, RedisFactory, RedisManager,
    RedisParams, RedisPool, RedisPoolStatus, RedisSettings, RedisTransport, SettingsResolver,
    build_client,
};
pub use crate::error::{Error, Result};

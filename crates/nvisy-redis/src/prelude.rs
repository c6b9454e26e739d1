//! Prelude module for nvisy-redis.
//!
//! This module re-exports the most commonly used types from nvisy-redis,
//! making it easy to import everything you need with a single `use` statement.
//!
//! # Example
//!
//! ```rust,no_run
//! use nvisy_redis::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let settings = RedisSettings::default().with_url("redis://localhost:6379");
//! let client = RedisFactory::global().make_client(&settings)?;
//! # Ok(())
//! # }
//! ```

// Settings and parameters
pub use crate::client::{RedisParams, RedisSettings, RedisTransport, SettingsResolver};
// Pool, registry and clients
pub use crate::client::{
    PoolRegistry, RedisClient, RedisConn, RedisFactory, RedisPool, build_client,
};
// Error types
pub use crate::{Error, Result};

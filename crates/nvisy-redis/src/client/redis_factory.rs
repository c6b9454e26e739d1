//! Client factory backed by a [`PoolRegistry`].

use std::sync::Arc;

use super::pool_registry::PoolRegistry;
use super::redis_client::RedisClient;
use super::redis_params::RedisParams;
use super::redis_pool::RedisPool;
use super::redis_settings::RedisSettings;
use crate::{Result, TRACING_TARGET_CLIENT};

/// Registry a [`RedisFactory`] caches its pool in.
#[derive(Debug, Clone)]
enum RegistryRef {
    Global,
    Owned(Arc<PoolRegistry>),
}

/// Hands out [`RedisClient`]s bound to the pool cached in a [`PoolRegistry`].
///
/// Cheap to clone; clones share the registry.
#[derive(Debug, Clone)]
pub struct RedisFactory {
    registry: RegistryRef,
}

impl RedisFactory {
    /// Creates a factory caching its pool in `registry`.
    pub fn new(registry: Arc<PoolRegistry>) -> Self {
        Self {
            registry: RegistryRef::Owned(registry),
        }
    }

    /// Creates a factory over a fresh, empty registry.
    pub fn isolated() -> Self {
        Self::new(Arc::new(PoolRegistry::new()))
    }

    /// Creates a factory caching its pool in the process-wide registry.
    pub fn global() -> Self {
        Self {
            registry: RegistryRef::Global,
        }
    }

    /// Returns the registry the pool is cached in.
    pub fn registry(&self) -> &PoolRegistry {
        match &self.registry {
            RegistryRef::Global => PoolRegistry::global(),
            RegistryRef::Owned(registry) => registry.as_ref(),
        }
    }

    /// Returns a new client bound to the shared pool.
    ///
    /// The settings are parsed only while the registry is empty. Once a pool
    /// has been registered it is reused as is and `settings` are ignored.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Config`] when the registry is empty and the
    /// settings contain neither a URL nor a unix socket path, and with
    /// [`Error::InvalidUrl`] when the URL cannot be parsed.
    ///
    /// [`Error::Config`]: crate::Error::Config
    /// [`Error::InvalidUrl`]: crate::Error::InvalidUrl
    pub fn make_client(&self, settings: &RedisSettings) -> Result<RedisClient> {
        let pool = self.registry().get_or_try_init(|| {
            tracing::debug!(
                target: TRACING_TARGET_CLIENT,
                settings = ?settings,
                "No shared pool registered, building one from settings"
            );
            RedisPool::new(RedisParams::from_settings(settings)?)
        })?;

        Ok(RedisClient::new(pool))
    }
}

impl Default for RedisFactory {
    fn default() -> Self {
        Self::global()
    }
}

/// Returns a new client bound to the process-wide shared pool.
///
/// Usable without any request context. Equivalent to
/// `RedisFactory::global().make_client(settings)`.
pub fn build_client(settings: &RedisSettings) -> Result<RedisClient> {
    RedisFactory::global().make_client(settings)
}

//! Application state and dependency injection.

mod config;
mod redis_binding;

use nvisy_redis::{EnvSource, RedisFactory, SettingsResolver};

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::redis_binding::RedisBinding;
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};
use crate::TRACING_TARGET_SERVICE;

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    redis: RedisBinding,
}

impl ServiceState {
    /// Creates a new state from an existing binding.
    pub fn new(redis: RedisBinding) -> Self {
        Self { redis }
    }

    /// Initializes application state from configuration.
    ///
    /// Resolves the redis settings against the process environment and binds
    /// them to a factory over a fresh registry. No connection is opened.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Self::from_config_with(config, SettingsResolver::new(), RedisFactory::isolated())
    }

    /// Initializes application state from configuration, with an explicit
    /// environment and factory.
    ///
    /// Pass [`RedisFactory::global`] to share the pool with code outside the
    /// request cycle using [`nvisy_redis::build_client`].
    pub fn from_config_with<E: EnvSource>(
        config: &ServiceConfig,
        resolver: SettingsResolver<E>,
        factory: RedisFactory,
    ) -> Result<Self> {
        let settings = config.resolve_redis_with(resolver)?;

        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            prefix = %config.redis_env_prefix,
            settings = ?settings,
            "Resolved redis settings"
        );

        Ok(Self::new(RedisBinding::new(factory, settings)))
    }

    /// Returns the redis binding.
    #[inline]
    pub fn redis(&self) -> &RedisBinding {
        &self.redis
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(redis: RedisBinding);

//! Request-facing access to the shared redis pool.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use nvisy_redis::{RedisClient, RedisFactory, RedisSettings};

use crate::TRACING_TARGET_SERVICE;

/// Binds resolved [`RedisSettings`] to a [`RedisFactory`].
///
/// Held in the [`ServiceState`] and cloned into every request; clones share
/// the settings, the factory registry and the issued-clients counter.
///
/// [`ServiceState`]: crate::service::ServiceState
#[derive(Debug, Clone)]
pub struct RedisBinding {
    factory: RedisFactory,
    settings: Arc<RedisSettings>,
    issued: Arc<AtomicU64>,
}

impl RedisBinding {
    /// Creates a new binding.
    pub fn new(factory: RedisFactory, settings: RedisSettings) -> Self {
        Self {
            factory,
            settings: Arc::new(settings),
            issued: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns a new client bound to the shared pool.
    ///
    /// The first successful call registers the pool; later calls reuse it.
    pub fn client(&self) -> nvisy_redis::Result<RedisClient> {
        let client = self.factory.make_client(&self.settings)?;
        let issued = self.issued.fetch_add(1, Ordering::Relaxed) + 1;

        tracing::trace!(
            target: TRACING_TARGET_SERVICE,
            issued,
            "Issued redis client"
        );

        Ok(client)
    }

    /// Returns the resolved settings.
    #[inline]
    pub fn settings(&self) -> &RedisSettings {
        &self.settings
    }

    /// Returns the factory clients are made with.
    #[inline]
    pub fn factory(&self) -> &RedisFactory {
        &self.factory
    }

    /// Returns how many clients have been issued so far.
    #[inline]
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clients_share_pool() {
        let binding = RedisBinding::new(
            RedisFactory::isolated(),
            RedisSettings::default().with_url("redis://localhost:6379"),
        );

        let first = binding.client().unwrap();
        let second = binding.clone().client().unwrap();

        assert!(first.shares_pool_with(&second));
        assert_eq!(binding.issued(), 2);
    }

    #[test]
    fn failed_client_is_not_counted() {
        let binding = RedisBinding::new(RedisFactory::isolated(), RedisSettings::default());

        let error = binding.client().unwrap_err();
        assert!(error.is_config());
        assert_eq!(binding.issued(), 0);
        assert!(!binding.factory().registry().is_initialized());
    }
}

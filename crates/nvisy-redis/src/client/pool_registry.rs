//! Once-only cache for the shared [`RedisPool`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::redis_pool::RedisPool;
use crate::{Result, TRACING_TARGET_CLIENT};

static GLOBAL_REGISTRY: PoolRegistry = PoolRegistry::new();

/// Holds at most one [`RedisPool`].
///
/// The first successful [`get_or_try_init`] stores the pool; every later call
/// returns it without invoking the builder again, whatever settings it is
/// given. The slot is never invalidated, so settings changed after the first
/// pool has been created take effect only with a new registry (in practice, a
/// process restart for the [`global`] one).
///
/// [`get_or_try_init`]: PoolRegistry::get_or_try_init
/// [`global`]: PoolRegistry::global
#[derive(Debug, Default)]
pub struct PoolRegistry {
    slot: Mutex<Option<RedisPool>>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Returns the process-wide registry.
    #[inline]
    pub fn global() -> &'static PoolRegistry {
        &GLOBAL_REGISTRY
    }

    /// Returns the cached pool, if one has been created.
    pub fn get(&self) -> Option<RedisPool> {
        self.lock().clone()
    }

    /// Returns whether a pool has been created.
    pub fn is_initialized(&self) -> bool {
        self.lock().is_some()
    }

    /// Returns the cached pool, building and storing it first if the slot is empty.
    ///
    /// The slot stays locked while `build` runs, so concurrent first callers
    /// construct exactly one pool. A failed build leaves the slot empty and
    /// the error is returned to the caller that ran it.
    pub fn get_or_try_init<F>(&self, build: F) -> Result<RedisPool>
    where
        F: FnOnce() -> Result<RedisPool>,
    {
        let mut slot = self.lock();
        if let Some(pool) = slot.as_ref() {
            return Ok(pool.clone());
        }

        let pool = build()?;
        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            url = %pool.params().connection_url_masked(),
            "Registered shared redis connection pool"
        );

        *slot = Some(pool.clone());
        Ok(pool)
    }

    fn lock(&self) -> MutexGuard<'_, Option<RedisPool>> {
        // The slot is only ever replaced wholesale, so a poisoned value is still consistent.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//! Shared connection pool built from [`RedisParams`].

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use deadpool::Runtime;
use deadpool::managed::{
    Hook, HookResult, Manager, Metrics, Object, Pool, RecycleError, RecycleResult,
};
use redis::aio::MultiplexedConnection;
use redis::{Client, RedisError};

use super::redis_params::RedisParams;
use crate::{Error, Result, TRACING_TARGET_CONNECTION};

/// Type alias for the connection pool used by [`RedisPool`].
pub type ConnectionPool = Pool<RedisManager>;

/// Type alias for a connection object from the pool.
pub type PooledConnection = Object<RedisManager>;

/// [`Manager`] creating multiplexed connections from a [`redis::Client`].
///
/// Connections are checked with `PING` before being handed out again.
pub struct RedisManager {
    client: Client,
}

impl RedisManager {
    /// Creates a new manager for the given client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl fmt::Debug for RedisManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisManager").finish_non_exhaustive()
    }
}

impl Manager for RedisManager {
    type Error = RedisError;
    type Type = MultiplexedConnection;

    async fn create(&self) -> Result<MultiplexedConnection, RedisError> {
        let start = Instant::now();
        let result = self.client.get_multiplexed_async_connection().await;

        match &result {
            Ok(_) => tracing::info!(
                target: TRACING_TARGET_CONNECTION,
                elapsed_ms = start.elapsed().as_millis(),
                "Redis connection established successfully"
            ),
            Err(err) => tracing::error!(
                target: TRACING_TARGET_CONNECTION,
                elapsed_ms = start.elapsed().as_millis(),
                error = %err,
                "Failed to establish redis connection"
            ),
        }

        result
    }

    async fn recycle(
        &self,
        conn: &mut MultiplexedConnection,
        metrics: &Metrics,
    ) -> RecycleResult<RedisError> {
        let pong: String = redis::cmd("PING")
            .query_async(conn)
            .await
            .map_err(RecycleError::Backend)?;

        if pong != "PONG" {
            tracing::warn!(
                target: TRACING_TARGET_CONNECTION,
                recycle_count = metrics.recycle_count,
                response = %pong,
                "Unexpected PING response, dropping connection"
            );
            return Err(RecycleError::Message("unexpected PING response".into()));
        }

        Ok(())
    }
}

/// Custom hook called after a new connection has been added to the pool.
fn post_create(_conn: &mut MultiplexedConnection, metrics: &Metrics) -> HookResult<RedisError> {
    tracing::debug!(
        target: TRACING_TARGET_CONNECTION,
        hook = "post_create",
        created_at = ?metrics.created,
        "Connection created and added to pool"
    );

    // Note: should never return an error.
    Ok(())
}

/// Custom hook called after a connection has been recycled.
fn post_recycle(_conn: &mut MultiplexedConnection, metrics: &Metrics) -> HookResult<RedisError> {
    tracing::trace!(
        target: TRACING_TARGET_CONNECTION,
        hook = "post_recycle",
        last_recycled = ?metrics.recycled,
        recycle_count = metrics.recycle_count,
        "Connection recycled successfully"
    );

    Ok(())
}

/// Connection pool status information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedisPoolStatus {
    /// Maximum number of connections in the pool
    pub max_size: usize,
    /// Current number of connections in the pool
    pub size: usize,
    /// Number of available connections
    pub available: usize,
    /// Number of requests waiting for connections
    pub waiting: usize,
}

impl RedisPoolStatus {
    /// Returns the utilization of the pool (0.0 to 1.0).
    #[inline]
    pub fn utilization(&self) -> f64 {
        if self.max_size == 0 {
            0.0
        } else {
            self.size.saturating_sub(self.available) as f64 / self.max_size as f64
        }
    }

    /// Returns whether the pool is under pressure (high utilization or waiting requests).
    #[inline]
    pub fn is_under_pressure(&self) -> bool {
        self.waiting > 0 || self.utilization() > 0.8
    }
}

/// Long-lived handle to a shared pool of redis connections.
///
/// Cloning is cheap and every clone refers to the same pool. Building the
/// pool does not open any connection: connections are established lazily
/// on first use.
#[derive(Clone)]
pub struct RedisPool {
    inner: Arc<RedisPoolInner>,
}

struct RedisPoolInner {
    pool: ConnectionPool,
    params: RedisParams,
}

impl RedisPool {
    /// Builds a new pool from connection parameters.
    ///
    /// The pool is sized by [`RedisParams::max_connections`] when present,
    /// otherwise the pool default applies.
    #[tracing::instrument(
        skip(params),
        target = TRACING_TARGET_CONNECTION,
        fields(url = %params.connection_url_masked())
    )]
    pub fn new(params: RedisParams) -> Result<Self> {
        tracing::info!(target: TRACING_TARGET_CONNECTION, "Initializing redis connection pool");

        let client = Client::open(params.connection_url().as_str()).map_err(|e| {
            tracing::error!(target: TRACING_TARGET_CONNECTION, error = %e, "Invalid redis connection parameters");
            Error::from(e)
        })?;

        let mut builder = Pool::builder(RedisManager::new(client))
            .runtime(Runtime::Tokio1)
            .post_create(Hook::sync_fn(post_create))
            .post_recycle(Hook::sync_fn(post_recycle));
        if let Some(max_connections) = params.max_connections() {
            builder = builder.max_size(max_connections);
        }

        let pool = builder.build().map_err(|e| {
            tracing::error!(target: TRACING_TARGET_CONNECTION, error = %e, "Failed to create connection pool");
            Error::Unexpected(format!("Failed to build connection pool: {}", e).into())
        })?;

        tracing::debug!(
            target: TRACING_TARGET_CONNECTION,
            max_size = pool.status().max_size,
            db = params.db(),
            "Redis connection pool created"
        );

        Ok(Self {
            inner: Arc::new(RedisPoolInner { pool, params }),
        })
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if a new connection cannot be established or the
    /// pool is exhausted past its wait timeout.
    pub async fn get(&self) -> Result<PooledConnection> {
        let start = Instant::now();
        let conn = self.inner.pool.get().await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_CONNECTION,
                error = %e,
                elapsed = ?start.elapsed(),
                "Failed to acquire connection from pool"
            );
            Error::from(e)
        })?;

        let elapsed = start.elapsed();
        if elapsed > Duration::from_millis(100) {
            tracing::warn!(
                target: TRACING_TARGET_CONNECTION,
                elapsed = ?elapsed,
                "Connection acquisition took longer than expected"
            );
        }

        Ok(conn)
    }

    /// Returns the parameters the pool was built from.
    #[inline]
    pub fn params(&self) -> &RedisParams {
        &self.inner.params
    }

    /// Returns the current pool status.
    pub fn status(&self) -> RedisPoolStatus {
        let status = self.inner.pool.status();
        RedisPoolStatus {
            max_size: status.max_size,
            size: status.size,
            available: status.available,
            waiting: status.waiting,
        }
    }

    /// Returns whether both handles refer to the same pool.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status();
        f.debug_struct("RedisPool")
            .field("url", &self.inner.params.connection_url_masked())
            .field("max_size", &status.max_size)
            .field("size", &status.size)
            .field("available", &status.available)
            .field("waiting", &status.waiting)
            .finish()
    }
}

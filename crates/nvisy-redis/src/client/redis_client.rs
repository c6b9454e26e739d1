//! Per-request client handles over the shared pool.

use std::fmt;

use derive_more::{Deref, DerefMut};
use redis::aio::MultiplexedConnection;

use super::redis_params::RedisParams;
use super::redis_pool::{PooledConnection, RedisPool, RedisPoolStatus};
use crate::{Result, TRACING_TARGET_CONNECTION};

/// Lightweight handle issuing commands through a shared [`RedisPool`].
///
/// Clients are created per request and hold no exclusive resources: dropping
/// one never affects the pool or other clients built on it.
#[derive(Clone)]
pub struct RedisClient {
    pool: RedisPool,
}

impl RedisClient {
    /// Creates a new client bound to `pool`.
    #[inline]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Gets a connection from the shared pool.
    ///
    /// The returned [`RedisConn`] dereferences to a multiplexed connection, so
    /// any `redis::AsyncCommands` method can be called on it. It goes back to
    /// the pool when dropped.
    pub async fn get_connection(&self) -> Result<RedisConn> {
        tracing::trace!(target: TRACING_TARGET_CONNECTION, "Acquiring connection from pool");
        let conn = self.pool.get().await?;
        Ok(RedisConn::new(conn))
    }

    /// Sends a `PING` and returns the server reply.
    pub async fn ping(&self) -> Result<String> {
        let mut conn = self.get_connection().await?;
        let pong = redis::cmd("PING").query_async(conn.connection_mut()).await?;
        Ok(pong)
    }

    /// Returns the shared pool.
    #[inline]
    pub fn pool(&self) -> &RedisPool {
        &self.pool
    }

    /// Returns the parameters the shared pool was built from.
    #[inline]
    pub fn params(&self) -> &RedisParams {
        self.pool.params()
    }

    /// Returns the current status of the shared pool.
    #[inline]
    pub fn pool_status(&self) -> RedisPoolStatus {
        self.pool.status()
    }

    /// Returns whether both clients issue commands through the same pool.
    #[inline]
    pub fn shares_pool_with(&self, other: &Self) -> bool {
        self.pool.ptr_eq(&other.pool)
    }
}

impl fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisClient")
            .field("pool", &self.pool)
            .finish()
    }
}

/// A connection checked out of the shared pool.
///
/// Returned to the pool when dropped.
#[derive(Deref, DerefMut)]
pub struct RedisConn {
    #[deref]
    #[deref_mut]
    conn: PooledConnection,
}

impl RedisConn {
    /// Creates a new connection wrapper from a pooled connection.
    #[inline]
    pub fn new(conn: PooledConnection) -> Self {
        Self { conn }
    }

    /// Returns the underlying multiplexed connection.
    #[inline]
    pub fn connection_mut(&mut self) -> &mut MultiplexedConnection {
        &mut self.conn
    }
}

impl fmt::Debug for RedisConn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisConn").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, RedisSettings};

    fn client(url: &str) -> RedisClient {
        let settings = RedisSettings::default().with_url(url).with_max_connections(2);
        let params = RedisParams::from_settings(&settings).unwrap();
        RedisClient::new(RedisPool::new(params).unwrap())
    }

    #[test]
    fn clones_share_pool() {
        let client = client("redis://localhost:6379");
        let clone = client.clone();

        assert!(client.shares_pool_with(&clone));
        assert_eq!(clone.pool_status().max_size, 2);
        assert_eq!(clone.params().port(), Some(6379));
    }

    #[tokio::test]
    async fn unreachable_server_fails_to_connect() {
        // Nothing listens on port 1.
        let client = client("redis://127.0.0.1:1");

        let error = client.get_connection().await.unwrap_err();
        assert!(matches!(error, Error::Client(_)));
        assert_eq!(client.pool_status().size, 0);

        let error = client.ping().await.unwrap_err();
        assert!(matches!(error, Error::Client(_)));
    }
}

//! Redis client extractor for request handlers.
//!
//! This module provides the [`Redis`] extractor, which hands a handler a
//! client bound to the shared connection pool.

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;
use nvisy_redis::RedisClient;

use crate::TRACING_TARGET_EXTRACT;
use crate::handler::{Error, ErrorKind};
use crate::service::RedisBinding;

/// Extractor that provides the request's redis client.
///
/// The client is created on first extraction within a request and cached in
/// the request extensions; every later extraction in the same request,
/// including from middleware, returns that same client. A client for the
/// next request is created anew, bound to the same shared pool.
///
/// # Example
///
/// ```rust,no_run
/// use nvisy_server::extract::Redis;
///
/// async fn ping(Redis(client): Redis) -> String {
///     client.ping().await.unwrap_or_default()
/// }
/// ```
///
/// # Rejection
///
/// Fails with `500 Internal Server Error` when no client can be created,
/// e.g. when neither a URL nor a unix socket path is configured.
#[derive(Debug, Clone, Deref)]
pub struct Redis(pub RedisClient);

impl Redis {
    /// Returns the inner client.
    #[inline]
    pub fn into_inner(self) -> RedisClient {
        self.0
    }
}

impl<S> FromRequestParts<S> for Redis
where
    RedisBinding: FromRef<S>,
    S: Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(redis) = parts.extensions.get::<Self>() {
            return Ok(redis.clone());
        }

        let binding = RedisBinding::from_ref(state);
        let client = binding.client().map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_EXTRACT,
                error = %e,
                "Failed to create redis client"
            );
            ErrorKind::InternalServerError
                .with_message("Cache service is unavailable")
                .with_context(e.to_string())
        })?;

        tracing::debug!(
            target: TRACING_TARGET_EXTRACT,
            url = %client.params().connection_url_masked(),
            "Created request redis client"
        );

        // Later extractors in the same request reuse this client.
        let redis = Self(client);
        parts.extensions.insert(redis.clone());
        Ok(redis)
    }
}

impl<S> OptionalFromRequestParts<S> for Redis
where
    RedisBinding: FromRef<S>,
    S: Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <Self as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(redis) => Ok(Some(redis)),
            Err(_) => Ok(None),
        }
    }
}

//! Redis health monitoring handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::routing::{Router, get};
use nvisy_redis::RedisPoolStatus;
use serde::Serialize;

use crate::extract::Redis;
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "nvisy_server::handler::monitors";

/// Health of the shared redis pool.
#[derive(Debug, Clone, Serialize)]
pub struct RedisStatusResponse {
    /// Whether the server answered `PING`.
    pub is_healthy: bool,
    /// Maximum number of pooled connections.
    pub max_size: usize,
    /// Current number of pooled connections.
    pub size: usize,
    /// Number of idle connections.
    pub available: usize,
    /// Number of requests waiting for a connection.
    pub waiting: usize,
}

impl RedisStatusResponse {
    fn new(is_healthy: bool, status: RedisPoolStatus) -> Self {
        Self {
            is_healthy,
            max_size: status.max_size,
            size: status.size,
            available: status.available,
            waiting: status.waiting,
        }
    }
}

#[tracing::instrument(skip_all)]
async fn redis_status(Redis(client): Redis) -> Result<(StatusCode, Json<RedisStatusResponse>)> {
    let is_healthy = match client.ping().await {
        Ok(_) => true,
        Err(err @ (nvisy_redis::Error::Client(_) | nvisy_redis::Error::Timeout(_))) => {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %err,
                "Redis health check failed"
            );
            false
        }
        Err(err) => return Err(err.into()),
    };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy,
        status_code = status_code.as_u16(),
        "Redis health response prepared"
    );

    let response = RedisStatusResponse::new(is_healthy, client.pool_status());
    Ok((status_code, Json(response)))
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health/redis", get(redis_status))
}

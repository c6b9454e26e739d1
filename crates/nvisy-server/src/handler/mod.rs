//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use nvisy_server::handler::routes;
//! use nvisy_server::service::{ServiceConfig, ServiceState};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::default();
//! let state = ServiceState::from_config(&config)?;
//! let router: axum::Router = routes().with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod monitors;
mod response;

use axum::routing::Router;

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::monitors::RedisStatusResponse;
pub use crate::handler::response::ErrorResponse;
use crate::service::ServiceState;

/// Returns a [`Router`] with every route of this crate.
pub fn routes() -> Router<ServiceState> {
    Router::new().merge(monitors::routes())
}

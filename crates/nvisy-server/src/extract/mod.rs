//! Request extractors.
//!
//! - [`Redis`] - the request's redis client, bound to the shared pool

mod redis_client;

pub use crate::extract::redis_client::Redis;

//! Settings resolution, connection parameters, the shared pool and clients.

mod pool_registry;
mod redis_client;
mod redis_factory;
mod redis_params;
mod redis_pool;
mod redis_settings;
mod settings_resolver;

pub use pool_registry::PoolRegistry;
pub use redis_client::{RedisClient, RedisConn};
pub use redis_factory::{RedisFactory, build_client};
pub use redis_params::{DEFAULT_HOST, DEFAULT_PORT, RedisParams, RedisTransport};
pub use redis_pool::{ConnectionPool, PooledConnection, RedisManager, RedisPool, RedisPoolStatus};
pub use redis_settings::{KEY_DB, KEY_MAX_CONNECTIONS, KEY_UNIX_SOCKET_PATH, KEY_URL, RedisSettings};
pub use settings_resolver::{
    DEFAULT_DB, DEFAULT_ENV_PREFIX, DEFAULT_URL, EnvSource, PREFIX_OVERRIDE_VAR, ProcessEnv,
    SettingsResolver,
};

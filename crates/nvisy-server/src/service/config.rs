#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use nvisy_redis::{DEFAULT_ENV_PREFIX, EnvSource, RedisSettings, SettingsResolver};
use serde::{Deserialize, Serialize};

use crate::service::Result;

/// Default values for configuration options.
mod defaults {
    use super::DEFAULT_ENV_PREFIX;

    /// Default prefix of the environment variables holding redis defaults.
    pub fn redis_env_prefix() -> String {
        DEFAULT_ENV_PREFIX.to_owned()
    }
}

/// App [`state`] configuration.
///
/// The redis settings are kept exactly as provided; absent keys are filled
/// from the `{prefix}_*` environment variables when the state is built.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Explicit redis settings.
    #[serde(flatten)]
    #[cfg_attr(feature = "config", command(flatten))]
    #[builder(default)]
    pub redis: RedisSettings,

    /// Prefix of the environment variables holding redis defaults.
    #[serde(default = "defaults::redis_env_prefix")]
    #[cfg_attr(
        feature = "config",
        arg(long = "redis-env-prefix", env = "REDIS_KEY", default_value = DEFAULT_ENV_PREFIX)
    )]
    #[builder(default = "defaults::redis_env_prefix()")]
    pub redis_env_prefix: String,
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Resolves the redis settings against the process environment.
    pub fn resolve_redis(&self) -> Result<RedisSettings> {
        self.resolve_redis_with(SettingsResolver::new())
    }

    /// Resolves the redis settings against the given environment.
    ///
    /// Explicit settings always win; only absent keys are filled.
    pub fn resolve_redis_with<E: EnvSource>(
        &self,
        resolver: SettingsResolver<E>,
    ) -> Result<RedisSettings> {
        let resolver = resolver.with_prefix(self.redis_env_prefix.as_str());
        Ok(resolver.resolve(self.redis.clone())?)
    }
}

impl ServiceConfigBuilder {
    /// Wrapper for builder validation that returns String errors.
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        if let Some(prefix) = &builder.redis_env_prefix
            && prefix.trim().is_empty()
        {
            return Err("Redis environment prefix cannot be empty".to_string());
        }

        if let Some(redis) = &builder.redis {
            if let Some(url) = &redis.url
                && url.trim().is_empty()
            {
                return Err("Redis URL cannot be empty".to_string());
            }

            if redis.max_connections == Some(0) {
                return Err("Redis max connections must be greater than 0".to_string());
            }
        }

        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            redis: RedisSettings::default(),
            redis_env_prefix: defaults::redis_env_prefix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> SettingsResolver<HashMap<String, String>> {
        SettingsResolver::new().with_env(
            vars.iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn builder_defaults() {
        let config = ServiceConfig::builder().build().unwrap();
        assert_eq!(config.redis_env_prefix, DEFAULT_ENV_PREFIX);
        assert_eq!(config.redis, RedisSettings::default());
    }

    #[test]
    fn builder_rejects_empty_prefix() {
        let result = ServiceConfig::builder().with_redis_env_prefix("").build();
        assert!(result.is_err());
    }

    #[test]
    fn builder_rejects_zero_max_connections() {
        let result = ServiceConfig::builder()
            .with_redis(RedisSettings::default().with_max_connections(0))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn explicit_settings_win_over_environment() {
        let config = ServiceConfig::builder()
            .with_redis(RedisSettings::default().with_url("redis://explicit:6379"))
            .build()
            .unwrap();

        let settings = config
            .resolve_redis_with(env(&[
                ("REDIS_URL", "redis://env:6379"),
                ("REDIS_DB", "4"),
            ]))
            .unwrap();

        assert_eq!(settings.url.as_deref(), Some("redis://explicit:6379"));
        assert_eq!(settings.db, Some(4));
        assert_eq!(config.redis.db, None);
    }

    #[test]
    fn custom_prefix_is_used() {
        let config = ServiceConfig::builder()
            .with_redis_env_prefix("CACHE")
            .build()
            .unwrap();

        let settings = config
            .resolve_redis_with(env(&[
                ("CACHE_URL", "redis://cache:6380"),
                ("REDIS_URL", "redis://ignored:6379"),
            ]))
            .unwrap();

        assert_eq!(settings.url.as_deref(), Some("redis://cache:6380"));
    }

    #[test]
    fn invalid_environment_value_fails() {
        let error = ServiceConfig::default()
            .resolve_redis_with(env(&[("REDIS_DB", "two")]))
            .unwrap_err();
        assert_eq!(error.kind(), crate::ErrorKind::Config);
    }

    #[test]
    fn deserializes_dotted_keys() {
        let config: ServiceConfig = serde_json::from_value(serde_json::json!({
            "redis.url": "redis://localhost:6379",
            "redis.max_connections": 8,
        }))
        .unwrap();

        assert_eq!(config.redis.url.as_deref(), Some("redis://localhost:6379"));
        assert_eq!(config.redis.max_connections, Some(8));
        assert_eq!(config.redis_env_prefix, DEFAULT_ENV_PREFIX);
    }

    #[test]
    fn deserializes_numeric_strings() {
        let config: ServiceConfig = serde_json::from_value(serde_json::json!({
            "redis.url": "redis://h:1",
            "redis.db": "2",
            "redis.max_connections": "8",
            "redis_env_prefix": "CACHE",
        }))
        .unwrap();

        assert_eq!(config.redis.db, Some(2));
        assert_eq!(config.redis.max_connections, Some(8));
        assert_eq!(config.redis_env_prefix, "CACHE");
    }
}

//! Environment-backed defaults for [`RedisSettings`].

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use super::redis_settings::RedisSettings;
use crate::{Error, Result, TRACING_TARGET_CLIENT};

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "REDIS";

/// Default connection URL used when neither the settings nor the environment provide one.
pub const DEFAULT_URL: &str = "redis://localhost:6379";

/// Default logical database index.
pub const DEFAULT_DB: i64 = 0;

/// Environment variable that overrides the prefix itself.
pub const PREFIX_OVERRIDE_VAR: &str = "REDIS_KEY";

/// A source of environment variables.
///
/// Implemented for the process environment and for plain maps, so that
/// resolution can be exercised without touching global process state.
pub trait EnvSource {
    /// Returns the value of `key`, if set.
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    #[inline]
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    #[inline]
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    #[inline]
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Resolves [`RedisSettings`] against environment-sourced defaults.
///
/// Reads `{PREFIX}_URL`, `{PREFIX}_DB`, `{PREFIX}_SOCKET` and
/// `{PREFIX}_MAX_CONNECTIONS`. Unset or empty variables fall back to the
/// built-in defaults: database `0`, URL `redis://localhost:6379`, no socket
/// path and no pool size limit.
#[derive(Debug, Clone)]
pub struct SettingsResolver<E = ProcessEnv> {
    prefix: String,
    env: E,
}

impl SettingsResolver<ProcessEnv> {
    /// Creates a resolver over the process environment with the `REDIS` prefix.
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_ENV_PREFIX.to_owned(),
            env: ProcessEnv,
        }
    }

    /// Creates a resolver over the process environment whose prefix is read
    /// from `REDIS_KEY`, falling back to `REDIS`.
    pub fn from_env() -> Self {
        Self::from_env_source(ProcessEnv)
    }
}

impl Default for SettingsResolver<ProcessEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnvSource> SettingsResolver<E> {
    /// Creates a resolver over `env` whose prefix is read from `REDIS_KEY`,
    /// falling back to `REDIS` when it is unset or blank.
    pub fn from_env_source(env: E) -> Self {
        let prefix = env
            .var(PREFIX_OVERRIDE_VAR)
            .map(|prefix| prefix.trim().to_owned())
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or_else(|| DEFAULT_ENV_PREFIX.to_owned());

        Self { prefix, env }
    }

    /// Sets the environment variable prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Replaces the environment source.
    pub fn with_env<T: EnvSource>(self, env: T) -> SettingsResolver<T> {
        SettingsResolver {
            prefix: self.prefix,
            env,
        }
    }

    /// Returns the environment variable prefix.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the full environment variable name for `suffix`.
    #[inline]
    pub fn env_key(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }

    /// Returns the environment-sourced default settings.
    ///
    /// Every field except the socket path and the pool size is guaranteed to be set.
    pub fn defaults(&self) -> Result<RedisSettings> {
        let defaults = RedisSettings {
            url: Some(
                self.string_var("URL")
                    .unwrap_or_else(|| DEFAULT_URL.to_owned()),
            ),
            db: Some(self.integer_var("DB")?.unwrap_or(DEFAULT_DB)),
            unix_socket_path: self.string_var("SOCKET").map(Into::into),
            max_connections: self.integer_var("MAX_CONNECTIONS")?,
        };

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            prefix = %self.prefix,
            settings = ?defaults,
            "Resolved environment defaults"
        );

        Ok(defaults)
    }

    /// Fills every absent field of `explicit` from [`Self::defaults`].
    pub fn resolve(&self, explicit: RedisSettings) -> Result<RedisSettings> {
        let defaults = self.defaults()?;
        Ok(explicit.merged_with(&defaults))
    }

    fn string_var(&self, suffix: &str) -> Option<String> {
        self.env
            .var(&self.env_key(suffix))
            .filter(|value| !value.trim().is_empty())
    }

    fn integer_var<T: FromStr>(&self, suffix: &str) -> Result<Option<T>> {
        let Some(raw) = self.string_var(suffix) else {
            return Ok(None);
        };

        raw.trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::invalid_setting(self.env_key(suffix), raw))
    }
}

//! Cache policy configuration: defaults, overrides and validation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of retries for failed reads.
pub const DEFAULT_READ_RETRY_COUNT: u32 = 3;
/// Default number of retries for failed writes.
pub const DEFAULT_WRITE_RETRY_COUNT: u32 = 1;
/// Five minutes.
pub const DEFAULT_STALE_AFTER_MS: u64 = 5 * 60 * 1000;
/// Ten minutes.
pub const DEFAULT_EVICT_AFTER_MS: u64 = 10 * 60 * 1000;

/// Environment variable consulted by [`BuildMode::from_env`].
pub const BUILD_MODE_ENV: &str = "APP_ENV";

/// Whether the application runs as a development build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// Development for debug builds, production otherwise.
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }

    /// Read the mode from `APP_ENV`, falling back to [`BuildMode::current`].
    pub fn from_env() -> Self {
        std::env::var(BUILD_MODE_ENV)
            .map(|value| Self::from_env_value(&value))
            .unwrap_or_else(|_| Self::current())
    }

    /// `development` or `dev` (any case) is development; anything else is production.
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => BuildMode::Development,
            _ => BuildMode::Production,
        }
    }

    pub fn is_development(self) -> bool {
        self == BuildMode::Development
    }
}

/// Validated cache policy. Immutable once a manager owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CachePolicyConfig {
    pub read_retry_count: u32,
    pub write_retry_count: u32,
    /// Time after which a fetched result is stale and may be refreshed.
    pub stale_after_ms: u64,
    /// Time after which an unused entry is purged. Never less than `stale_after_ms`.
    pub evict_after_ms: u64,
    pub refetch_on_focus: bool,
}

impl CachePolicyConfig {
    /// Defaults for the given build mode.
    pub fn defaults_for(mode: BuildMode) -> Self {
        CachePolicyConfig {
            read_retry_count: DEFAULT_READ_RETRY_COUNT,
            write_retry_count: DEFAULT_WRITE_RETRY_COUNT,
            stale_after_ms: DEFAULT_STALE_AFTER_MS,
            evict_after_ms: DEFAULT_EVICT_AFTER_MS,
            refetch_on_focus: mode.is_development(),
        }
    }

    /// Apply `overrides` on top of the defaults for `mode` and validate.
    pub fn with_overrides(
        mode: BuildMode,
        overrides: &CachePolicyOverrides,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::defaults_for(mode);

        let config = CachePolicyConfig {
            read_retry_count: retry_count(
                "readRetryCount",
                overrides.read_retry_count,
                defaults.read_retry_count,
            )?,
            write_retry_count: retry_count(
                "writeRetryCount",
                overrides.write_retry_count,
                defaults.write_retry_count,
            )?,
            stale_after_ms: millis(
                "staleAfterMs",
                overrides.stale_after_ms,
                defaults.stale_after_ms,
            )?,
            evict_after_ms: millis(
                "evictAfterMs",
                overrides.evict_after_ms,
                defaults.evict_after_ms,
            )?,
            refetch_on_focus: overrides
                .refetch_on_focus
                .unwrap_or(defaults.refetch_on_focus),
        };

        if config.evict_after_ms < config.stale_after_ms {
            return Err(ConfigError::EvictBeforeStale {
                stale_after_ms: config.stale_after_ms,
                evict_after_ms: config.evict_after_ms,
            });
        }

        Ok(config)
    }
}

impl Default for CachePolicyConfig {
    fn default() -> Self {
        Self::defaults_for(BuildMode::current())
    }
}

fn retry_count(field: &'static str, value: Option<i64>, default: u32) -> Result<u32, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) if v < 0 => Err(ConfigError::Negative { field }),
        Some(v) => u32::try_from(v).map_err(|_| ConfigError::RetryCountOverflow { field }),
    }
}

fn millis(field: &'static str, value: Option<i64>, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => u64::try_from(v).map_err(|_| ConfigError::Negative { field }),
    }
}

/// Partial cache policy. Unset fields keep their defaults.
///
/// Numeric fields are signed so that a negative value in a config document
/// is reported instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CachePolicyOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_retry_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_retry_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stale_after_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evict_after_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refetch_on_focus: Option<bool>,
}

impl CachePolicyOverrides {
    /// Parse overrides from a JSON object such as `{"staleAfterMs": 1000}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn read_retry_count(mut self, count: i64) -> Self {
        self.read_retry_count = Some(count);
        self
    }

    pub fn write_retry_count(mut self, count: i64) -> Self {
        self.write_retry_count = Some(count);
        self
    }

    pub fn stale_after_ms(mut self, ms: i64) -> Self {
        self.stale_after_ms = Some(ms);
        self
    }

    pub fn evict_after_ms(mut self, ms: i64) -> Self {
        self.evict_after_ms = Some(ms);
        self
    }

    pub fn refetch_on_focus(mut self, enabled: bool) -> Self {
        self.refetch_on_focus = Some(enabled);
        self
    }
}

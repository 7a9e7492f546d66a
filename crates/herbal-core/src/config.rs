//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `HERBAL_BACKEND_URL` - API base URL (default: empty, same origin)
//! - `HERBAL_DEFAULT_CATEGORY` - Category shown when the request names none (default: Chicken)
//! - `HERBAL_SKELETON_COUNT` - Placeholder cards while products load (default: 8)
//! - `HERBAL_LOG_LEVEL` - Minimum log level (default: info)
//! - `HERBAL_LOG_FORMAT` - `json` or `human` (default: json)

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_BACKEND_URL: &str = "HERBAL_BACKEND_URL";
pub const ENV_DEFAULT_CATEGORY: &str = "HERBAL_DEFAULT_CATEGORY";
pub const ENV_SKELETON_COUNT: &str = "HERBAL_SKELETON_COUNT";
pub const ENV_LOG_LEVEL: &str = "HERBAL_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "HERBAL_LOG_FORMAT";

/// Upper bound for the skeleton placeholder count.
pub const MAX_SKELETON_COUNT: usize = 48;

/// Runtime configuration for the storefront workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL prepended to every API path. Empty means same origin.
    #[serde(default)]
    pub backend_url: String,
    /// Category name used when the request does not select one.
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Number of placeholder cards rendered while products load.
    #[serde(default = "default_skeleton_count")]
    pub skeleton_count: usize,
    /// Minimum log level name.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format name.
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_category() -> String {
    "Chicken".to_string()
}

fn default_skeleton_count() -> usize {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            default_category: default_category(),
            skeleton_count: default_skeleton_count(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unset or blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(url) = get(ENV_BACKEND_URL) {
            config.backend_url = url;
        }
        if let Some(category) = get(ENV_DEFAULT_CATEGORY) {
            config.default_category = category;
        }
        if let Some(raw) = get(ENV_SKELETON_COUNT) {
            config.skeleton_count = parse_skeleton_count(&raw)?;
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            config.log_level = level.to_lowercase();
        }
        if let Some(format) = get(ENV_LOG_FORMAT) {
            config.log_format = format.to_lowercase();
        }

        Ok(config)
    }
}

fn parse_skeleton_count(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: ENV_SKELETON_COUNT.to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let count: usize = raw.parse().map_err(|_| invalid("not a number"))?;
    if count == 0 || count > MAX_SKELETON_COUNT {
        return Err(invalid("out of range"));
    }
    Ok(count)
}

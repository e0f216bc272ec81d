use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::feature_flags::FeatureFlags;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_PROFILE_TIMEOUT_MS: u64 = 10_000;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_profile_timeout_ms() -> u64 {
    DEFAULT_PROFILE_TIMEOUT_MS
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upper bound on a single profile lookup.
    #[serde(default = "default_profile_timeout_ms")]
    pub profile_timeout_ms: u64,
    /// Cached profiles older than this are refetched. `None` keeps them for
    /// the whole session (until invalidated).
    #[serde(default)]
    pub cache_ttl_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            profile_timeout_ms: default_profile_timeout_ms(),
            cache_ttl_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn profile_timeout(&self) -> Duration {
        Duration::from_millis(self.profile_timeout_ms)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }

    /// Base URL without a trailing slash, ready for path joining.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub features: FeatureFlags,
}

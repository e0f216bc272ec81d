use shared_types::AppConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const CONFIG_PATH: &str = "config.toml";

/// Read `config.toml` plus environment overrides and store the result in the
/// global `OnceLock`. Safe to call multiple times; only the first call reads.
///
/// A missing or unparseable file falls back to defaults.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let mut config = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => parse_config(&contents),
            Err(e) => {
                tracing::info!(path = CONFIG_PATH, error = %e, "config file not found, using defaults");
                AppConfig::default()
            }
        };
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        tracing::info!(
            base_url = %config.api.base_url,
            timeout_ms = config.api.profile_timeout_ms,
            marketplace = config.features.marketplace,
            "config loaded"
        );
        config
    })
}

fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(path = CONFIG_PATH, error = %e, "failed to parse config, using defaults");
        AppConfig::default()
    })
}

/// Apply `API_BASE_URL`, `PROFILE_TIMEOUT_MS`, `PROFILE_CACHE_TTL_SECS` and
/// `MARKETPLACE`. Unparseable numbers are ignored.
fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup("API_BASE_URL").filter(|v| !v.trim().is_empty()) {
        config.api.base_url = url;
    }
    if let Some(ms) = lookup("PROFILE_TIMEOUT_MS").and_then(|v| v.trim().parse().ok()) {
        config.api.profile_timeout_ms = ms;
    }
    if let Some(secs) = lookup("PROFILE_CACHE_TTL_SECS").and_then(|v| v.trim().parse().ok()) {
        config.api.cache_ttl_secs = Some(secs);
    }
    if let Some(flag) = lookup("MARKETPLACE") {
        config.features.marketplace = matches!(flag.trim(), "1" | "true" | "TRUE" | "yes");
    }
}

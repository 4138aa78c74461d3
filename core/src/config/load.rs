use std::path::{Path, PathBuf};

use super::types::AppConfig;
use crate::errors::ConfigError;

const LOCAL_CONFIG: &str = "guard.toml";

fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".guard").join("config.toml"))
}

pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    let s = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse(e.into()))?;
    toml::from_str::<AppConfig>(&s).map_err(|e| ConfigError::Parse(e.into()))
}

/// `./guard.toml`, then `~/.guard/config.toml`, then defaults; environment
/// overrides are applied last.
pub fn load_default() -> Result<AppConfig, ConfigError> {
    load(None)
}

/// Like [`load_default`], but an explicit path replaces the file lookup.
pub fn load(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let local = Path::new(LOCAL_CONFIG);
    let mut cfg = match explicit {
        Some(p) => load_from_path(p)?,
        None if local.exists() => load_from_path(local)?,
        None => match user_config_path() {
            Some(p) if p.exists() => load_from_path(&p)?,
            _ => AppConfig::default(),
        },
    };

    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok())?;
    cfg.validate()?;

    tracing::debug!(
        target: "guard.config",
        base_url = %cfg.api.base_url,
        scan_base_url = %cfg.api.scan_base_url,
        cache_ttl_secs = cfg.cache.ttl_secs,
        has_api_key = !cfg.credentials.api_key.is_empty(),
        "config loaded"
    );
    Ok(cfg)
}

pub(crate) fn apply_env_overrides<F>(cfg: &mut AppConfig, get: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| get(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_blank("GUARD_API_KEY") {
        cfg.credentials.api_key = v;
    }
    if let Some(v) = non_blank("GUARD_API_BASE_URL") {
        cfg.api.base_url = v;
    }
    if let Some(v) = non_blank("GUARD_SCAN_BASE_URL") {
        cfg.api.scan_base_url = v;
    }
    if let Some(v) = non_blank("GUARD_PROJECT_ID") {
        cfg.execution.project_id = v;
    }
    if let Some(v) = non_blank("GUARD_TIMEOUT_MS") {
        cfg.api.timeout_ms = v.trim().parse::<u64>().map_err(|e: std::num::ParseIntError| {
            ConfigError::EnvInvalid {
                key: "GUARD_TIMEOUT_MS".into(),
                source: e.into(),
            }
        })?;
    }
    Ok(())
}

use std::sync::Arc;

use anyhow::{bail, Result};
use guard_core::api::{AppConfig, GuardApi};

use crate::guard::HttpGuardClient;

pub fn build_http_client(cfg: &AppConfig) -> Result<HttpGuardClient> {
    if cfg.credentials.api_key.trim().is_empty() {
        bail!("credentials.api_key is empty (set GUARD_API_KEY or add it to guard.toml)");
    }
    HttpGuardClient::new(
        cfg.api.base_url.clone(),
        cfg.api.scan_base_url.clone(),
        cfg.credentials.api_key.clone(),
        cfg.api.timeout_ms,
    )
}

pub fn build_guard_api(cfg: &AppConfig) -> Result<Arc<dyn GuardApi>> {
    Ok(Arc::new(build_http_client(cfg)?))
}

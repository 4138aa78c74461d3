//! ServicesFactory implementation: builds the Guard API client from configuration for the CLI.
use std::sync::Arc;

use guard_core::api::{AppConfig, ConfigError, GuardApi, ServicesFactory};

use crate::factory;

pub struct PluginServicesFactory;

impl Default for PluginServicesFactory {
    fn default() -> Self {
        Self
    }
}

impl ServicesFactory for PluginServicesFactory {
    fn build_api(&self, cfg: &AppConfig) -> Result<Arc<dyn GuardApi>, ConfigError> {
        factory::build_guard_api(cfg).map_err(|e| ConfigError::Validation(e.to_string()))
    }
}

use std::sync::Arc;

use crate::client::GuardApi;
use crate::config::AppConfig;
use crate::errors::{ApiError, ConfigError, ExecuteError, LoadOptionsError};
use crate::executor::{ScanOutputs, ScanRecord, ValidationExecutor};
use crate::metadata::{Clock, MetadataBundle, MetadataCache, ProjectScannerDefaults};
use crate::node::{LOAD_INPUT_SCANNERS, LOAD_OUTPUT_SCANNERS, LOAD_PROJECTS};
use crate::options::{self, DropdownOption};
use crate::scanner::ScannerCategory;

/// Builds the upstream client from configuration.
pub trait ServicesFactory {
    fn build_api(&self, cfg: &AppConfig) -> Result<Arc<dyn GuardApi>, ConfigError>;
}

/// Workflow-scoped state: configuration, the API client and the metadata
/// cache shared by the option loaders and the executor.
pub struct AppContext {
    cfg: AppConfig,
    api: Arc<dyn GuardApi>,
    cache: MetadataCache,
}

impl AppContext {
    pub fn new(cfg: AppConfig, api: Arc<dyn GuardApi>) -> Self {
        let cache = MetadataCache::new(&cfg.cache);
        Self { cfg, api, cache }
    }

    pub fn with_clock(cfg: AppConfig, api: Arc<dyn GuardApi>, clock: Arc<dyn Clock>) -> Self {
        let cache = MetadataCache::with_clock(&cfg.cache, clock);
        Self { cfg, api, cache }
    }

    pub fn from_factory(cfg: AppConfig, factory: &dyn ServicesFactory) -> Result<Self, ConfigError> {
        let api = factory.build_api(&cfg)?;
        Ok(Self::new(cfg, api))
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn api(&self) -> Arc<dyn GuardApi> {
        self.api.clone()
    }

    pub async fn metadata(&mut self) -> Result<Arc<MetadataBundle>, ApiError> {
        self.cache.ensure_fresh(self.api.as_ref()).await
    }

    pub async fn list_projects(&mut self) -> Result<Vec<DropdownOption>, ApiError> {
        let bundle = self.metadata().await?;
        Ok(options::list_projects(&bundle))
    }

    pub async fn list_scanners(
        &mut self,
        category: ScannerCategory,
        selected_project: Option<&str>,
    ) -> Result<Vec<DropdownOption>, ApiError> {
        let bundle = self.metadata().await?;
        Ok(options::list_scanners(
            &bundle,
            category,
            selected_project,
            &self.cfg.cache,
        ))
    }

    /// An empty project id answers without touching the cache.
    pub async fn defaults_for(&mut self, project_id: &str) -> Result<ProjectScannerDefaults, ApiError> {
        if project_id.is_empty() {
            return Ok(ProjectScannerDefaults::default());
        }
        let bundle = self.metadata().await?;
        Ok(options::defaults_for(&bundle, project_id))
    }

    /// Dispatches a host load-options callback by method name.
    pub async fn load_options(
        &mut self,
        method: &str,
        selected_project: Option<&str>,
    ) -> Result<Vec<DropdownOption>, LoadOptionsError> {
        let options = match method {
            LOAD_PROJECTS => self.list_projects().await?,
            LOAD_INPUT_SCANNERS => {
                self.list_scanners(ScannerCategory::Input, selected_project)
                    .await?
            }
            LOAD_OUTPUT_SCANNERS => {
                self.list_scanners(ScannerCategory::Output, selected_project)
                    .await?
            }
            other => return Err(LoadOptionsError::UnknownMethod(other.to_string())),
        };
        Ok(options)
    }

    pub async fn execute(&mut self, records: Vec<ScanRecord>) -> Result<ScanOutputs, ExecuteError> {
        let continue_on_fail = self.cfg.execution.continue_on_fail;
        ValidationExecutor::new(
            self.api.as_ref(),
            &mut self.cache,
            &self.cfg.request,
            continue_on_fail,
        )
        .run(records)
        .await
    }
}

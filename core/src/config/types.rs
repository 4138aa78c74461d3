use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Largest cache TTL a chrono duration can hold (it counts milliseconds in an i64).
pub const MAX_CACHE_TTL_SECS: u64 = i64::MAX as u64 / 1000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("api.base_url must not be empty".into()));
        }
        if self.api.scan_base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "api.scan_base_url must not be empty".into(),
            ));
        }
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::Validation("cache.ttl_secs must be > 0".into()));
        }
        if self.cache.ttl_secs > MAX_CACHE_TTL_SECS {
            return Err(ConfigError::Validation(format!(
                "cache.ttl_secs must be <= {MAX_CACHE_TTL_SECS}"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub api_key: String,
}

// Keep the key out of debug output and logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_scan_base_url")]
    pub scan_base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://api.app.testsavant.ai".to_string()
}

fn default_scan_base_url() -> String {
    "https://api.testsavant.ai".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            scan_base_url: default_scan_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// What to do with scanners whose category the metadata does not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedCategory {
    /// Offer them with the input scanners and count them as input defaults.
    #[default]
    AsInput,
    /// Keep them out of both lists; they only show up in the `unresolved` bucket.
    Separate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default)]
    pub unresolved_category: UnresolvedCategory,
    #[serde(default = "default_builtin_fallback")]
    pub builtin_fallback: bool,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_builtin_fallback() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
            unresolved_category: UnresolvedCategory::default(),
            builtin_fallback: default_builtin_fallback(),
        }
    }
}

/// Fixed parts of every scan request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    #[serde(default)]
    pub fail_fast: bool,
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
    #[serde(default = "default_request_cache_ttl")]
    pub cache_ttl: u64,
    #[serde(default = "default_source_name")]
    pub source_name: String,
    #[serde(default = "default_project_type")]
    pub project_type: String,
    #[serde(default = "default_source_file")]
    pub file: String,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_request_cache_ttl() -> u64 {
    3600
}

fn default_source_name() -> String {
    "guard-rs TestSavant.AI".to_string()
}

fn default_project_type() -> String {
    "Rust Workflow".to_string()
}

fn default_source_file() -> String {
    "guard-rs".to_string()
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            cache_enabled: default_cache_enabled(),
            cache_ttl: default_request_cache_ttl(),
            source_name: default_source_name(),
            project_type: default_project_type(),
            file: default_source_file(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionConfig {
    #[serde(default)]
    pub continue_on_fail: bool,
    #[serde(default)]
    pub project_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

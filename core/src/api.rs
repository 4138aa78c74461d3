//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `guard_core::api` instead of reaching into internal modules.

pub use crate::client::{GuardApi, API_KEY_HEADER, GUARD_PATH_PREFIX, PROJECTS_PATH};
pub use crate::config::{load as load_config, load_default, load_from_path, AppConfig, LoggingConfig, UnresolvedCategory};
pub use crate::context::{AppContext, ServicesFactory};
pub use crate::errors::{ApiError, CliError, ConfigError, ExecuteError, LoadOptionsError};
pub use crate::executor::{ScanOutcome, ScanOutputs, ScanParameters, ScanPayload, ScanRecord, ScanType};
pub use crate::metadata::{MetadataBundle, ProjectOption, ProjectScannerDefaults};
pub use crate::node::{credential_description, node_description};
pub use crate::options::DropdownOption;
pub use crate::scanner::{ScannerCategory, ScannerSelection, ScannerToken};

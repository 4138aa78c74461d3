use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ApiError;
use crate::executor::{ScanPayload, ScanType};

/// The upstream Guard API as the core sees it. Implementations own transport
/// and authentication.
#[async_trait]
pub trait GuardApi: Send + Sync {
    fn name(&self) -> &str;

    /// `GET /projects/api-key/projects/`, returned as raw JSON. The shape is
    /// not fixed; see `metadata::extract_catalog`.
    async fn fetch_projects(&self) -> Result<Value, ApiError>;

    /// `POST /guard/prompt-input` or `/guard/prompt-output`.
    async fn scan(&self, scan_type: ScanType, payload: &ScanPayload) -> Result<Value, ApiError>;
}

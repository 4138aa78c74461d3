use thiserror::Error;

use super::ApiError;

/// Per-record failure of the validation executor. `item` is the index of the
/// input record.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("item {item}: missing required field(s) for {scan_type} scan: {}", fields.join(", "))]
    MissingInput {
        item: usize,
        scan_type: &'static str,
        fields: Vec<&'static str>,
    },

    #[error("item {item}: guard api request failed: {source}")]
    Api {
        item: usize,
        #[source]
        source: ApiError,
    },
}

impl ExecuteError {
    pub fn item(&self) -> usize {
        match self {
            ExecuteError::MissingInput { item, .. } | ExecuteError::Api { item, .. } => *item,
        }
    }
}

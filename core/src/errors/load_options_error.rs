use thiserror::Error;

use super::ApiError;

#[derive(Debug, Error)]
pub enum LoadOptionsError {
    #[error("unknown load-options method: {0}")]
    UnknownMethod(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

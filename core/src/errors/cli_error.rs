use thiserror::Error;

use super::{ApiError, ConfigError, ExecuteError, LoadOptionsError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    LoadOptions(#[from] LoadOptionsError),

    #[error("invalid input: {0}")]
    Input(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Command(String),
}

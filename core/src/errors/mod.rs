mod api_error;
mod cli_error;
mod config_error;
mod execute_error;
mod load_options_error;

pub use api_error::ApiError;
pub use cli_error::CliError;
pub use config_error::ConfigError;
pub use execute_error::ExecuteError;
pub use load_options_error::LoadOptionsError;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use guard_core::api::{CliError, LoggingConfig};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod stdio;

use commands::cli;

/// Non-blocking writer for `logging.file`. Lines are only guaranteed on disk
/// once the guard is dropped.
fn file_writer(file: &str) -> (NonBlocking, WorkerGuard) {
    let path = Path::new(file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path.file_name().unwrap_or_else(|| "guard.log".as_ref());
    tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name))
}

fn init_logging(cfg: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    match cfg.file.as_deref() {
        Some(file) => {
            let (writer, guard) = file_writer(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

// Returning the exit code (rather than process::exit) lets the log guard
// drop and flush the file writer.
#[tokio::main]
async fn main() -> Result<ExitCode, CliError> {
    let args = cli::Args::parse();
    let cfg = app::load_config(&args)?;
    let _log_guard = init_logging(&cfg.logging);

    let code = app::run_app(args, cfg).await?;
    Ok(ExitCode::from(code))
}

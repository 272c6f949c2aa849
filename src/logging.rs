use crate::constants::DEFAULT_LOG_FILTER;
use crate::errors::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `warn`. Output goes to
/// stderr; stdout is reserved for the download URL and extracted paths.
pub fn init_logging() -> AppResult<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::IoError(format!("Failed to initialize logging: {e}")))
}

use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError, storage_layout::StorageLayout};

const LOG_FILE_PREFIX: &str = "chatterm.log";

/// Routes logs to a daily file under the layout's log dir; stdout belongs to
/// the shell.
pub fn init(config: &LogConfig, layout: &StorageLayout) -> Result<(), AppError> {
    let appender = tracing_appender::rolling::daily(&layout.log_dir, LOG_FILE_PREFIX);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        )
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(AppError::LoggingInit)
}

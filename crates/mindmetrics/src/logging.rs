use std::path::Path;

use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix of the daily log files in the data directory
pub const LOG_FILE: &str = "mindmetrics.log";

/// Initialize logging to write to a file in the data directory.
///
/// Logs are written to `{data_dir}/mindmetrics.log.YYYY-MM-DD`, one file per day.
/// The log level can be controlled via the `level` parameter or the `RUST_LOG` environment variable.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    std::fs::create_dir_all(data_dir)?;

    let appender = rolling::daily(data_dir, LOG_FILE);

    // Build filter from RUST_LOG env var or use provided level
    let default_filter = format!("mindmetrics={level},mindmetrics_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()?;

    tracing::info!(
        "mindmetrics logging initialized (log_dir={})",
        data_dir.display()
    );
    Ok(())
}

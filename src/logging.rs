//! File-based logging setup for applications embedding the widgets.
//!
//! A TUI owns the terminal, so logs go to a daily-rotated file in the
//! platform's local data directory instead of stdout. Levels are
//! configured through `RUST_LOG`; widget state transitions log at
//! `debug`/`trace` under the `griddle` target.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default filter if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "griddle=info,warn";

/// Initialize logging for the application named `app`.
///
/// Logs land in `<local data dir>/<app>/logs/<app>.log`, rotated daily.
/// Set `RUST_LOG=griddle=debug` to watch widget state transitions.
///
/// # Errors
///
/// Fails if the log directory cannot be determined or created, or if a
/// global subscriber is already installed.
pub fn init(app: &str) -> anyhow::Result<()> {
    let log_dir = log_directory(app)
        .ok_or_else(|| anyhow::anyhow!("could not determine local data directory"))?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, &log_dir, format!("{}.log", app));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(app, version = env!("CARGO_PKG_VERSION"), "logging initialized");
    tracing::debug!(log_dir = %log_dir.display(), "log directory");

    Ok(())
}

/// The directory logs are written to for `app`, if it can be determined.
pub fn log_directory(app: &str) -> Option<PathBuf> {
    dirs::data_local_dir().map(|base| base.join(app).join("logs"))
}

/// Log a clean shutdown. Call before exiting.
pub fn shutdown(app: &str) {
    tracing::info!(app, "shutting down");
}

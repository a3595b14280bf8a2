use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Where log files go: `<data local dir>/folks/logs`
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folks")
        .join("logs")
}

/// Initialize file logging. The terminal belongs to the UI, so nothing is
/// written to stdout or stderr.
///
/// `level` wins over `RUST_LOG`; with neither set the filter is `info`.
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_logging(level: Option<&str>) -> WorkerGuard {
    let dir = log_dir();
    let _ = std::fs::create_dir_all(&dir);

    let appender = RollingFileAppender::new(Rotation::DAILY, &dir, "folks.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    guard
}

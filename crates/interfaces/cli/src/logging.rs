use std::fs;
use std::io;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tone_config::LoggingConfig;

/// Install the global subscriber: human-readable logs on stderr (stdout is
/// reserved for command output) plus an optional daily rolling file.
///
/// `RUST_LOG` wins over the configured level.  The returned guard must live
/// until exit so buffered file writes are flushed.
pub(crate) fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("invalid log level `{}`", config.level))?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    let (file_layer, guard) = if config.directory.trim().is_empty() {
        (None, None)
    } else {
        fs::create_dir_all(&config.directory)
            .with_context(|| format!("failed to create log directory {}", config.directory))?;
        let appender = tracing_appender::rolling::daily(&config.directory, "tone.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        (Some(layer), Some(guard))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

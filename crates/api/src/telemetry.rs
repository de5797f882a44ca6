//! Tracing subscriber setup: stdout in the configured format, plus an
//! optional daily-rotated JSON file.

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFileConfig, LogFormat, ServerConfig};

const DEFAULT_FILTER: &str = "userdesk_api=debug,userdesk_db=info,tower_http=debug";

/// Open the log file writer when file logging is enabled.
///
/// Returns `None` when `LOG_FILE_ACTIVE` is off. The [`WorkerGuard`] must
/// outlive every event that should reach the file.
pub fn file_writer(
    config: &LogFileConfig,
) -> Result<Option<(NonBlocking, WorkerGuard)>, InitError> {
    if !config.active {
        return Ok(None);
    }
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(config.file_name.as_str())
        .filename_suffix("log")
        .build(&config.directory)?;
    Ok(Some(tracing_appender::non_blocking(appender)))
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// Returns the file writer's guard, if any; hold it for the life of the
/// process.
pub fn init_tracing(config: &ServerConfig) -> Result<Option<WorkerGuard>, InitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let (writer, guard) = file_writer(&config.log_file)?.unzip();
    let file_layer = writer.map(|writer| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
    });

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    match config.log_format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
    Ok(guard)
}

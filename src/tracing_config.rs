use std::env;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigPaths, LogLevel};

const FORMAT_VAR: &str = "LINGOPLAY_LOG_FORMAT";

fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .from_env_lossy()
}

fn json_format() -> bool {
    env::var(FORMAT_VAR).is_ok_and(|format| format == "json")
}

/// Initialize console logging
///
/// `RUST_LOG` wins when set; otherwise `level` from the configuration
/// applies. `LINGOPLAY_LOG_FORMAT=json` switches to JSON lines. Logs go
/// to stderr so they never mix with REPL output.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init(level: LogLevel) -> Result<(), Box<dyn std::error::Error>> {
    let registry = tracing_subscriber::registry().with(env_filter(level));

    if json_format() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}

/// Initialize logging to stderr and to a daily rolling file
///
/// Files are written to `~/.lingoplay/logs`, keeping a week of history.
///
/// # Errors
/// Returns error if the log directory cannot be created or a global
/// subscriber is already installed
pub fn init_with_file(level: LogLevel) -> Result<(), Box<dyn std::error::Error>> {
    const DAYS_TO_KEEP: usize = 7;

    let log_dir = ConfigPaths::log_dir()?;
    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("lingoplay")
        .filename_suffix("log")
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry().with(env_filter(level));

    if json_format() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_names(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    // The writer flushes until process exit.
    std::mem::forget(guard);

    Ok(())
}

//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.
//! Dispatched analytics payloads are logged under the `analytics` target by the tracing sink.

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logger (console, `info`)
pub fn init_logger() -> anyhow::Result<()> {
    init_logger_with_file("info", false, None)
}

/// Initialize the logging system with optional daily rotating file output
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"); `RUST_LOG` wins when set
/// * `json_format` - Whether to use JSON format (true for production)
/// * `log_dir` - Optional directory for file logging
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter())
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_filter(env_filter())
            .boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            let log_dir = Path::new(dir);
            fs::create_dir_all(log_dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "tracking");
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(appender)
                    .with_filter(env_filter())
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

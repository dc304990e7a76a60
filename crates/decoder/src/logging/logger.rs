// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use ix_decoder_config::LogConfig;
use rolling_file::*;
use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level '{level}': {source}")]
    InvalidLogLevel {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to create log directory or file appender: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A global logger is already installed: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Configuration for logging initialization
pub struct LoggingConfig<'a> {
    pub level: &'a str,
    pub json_format: bool,
    pub strip_ansi: bool,
    pub write_to_file: bool,
    pub write_path: &'a str,
    pub write_max_file_size: u64,
    pub write_max_files: usize,
}

impl<'a> From<&'a LogConfig> for LoggingConfig<'a> {
    fn from(config: &'a LogConfig) -> Self {
        Self {
            level: &config.level,
            json_format: config.json,
            strip_ansi: config.strip_ansi,
            write_to_file: config.write,
            write_path: &config.write_path,
            write_max_file_size: config.write_max_file_size,
            write_max_files: config.write_max_files,
        }
    }
}

/// Initialize tracing/logging with the specified configuration
///
/// Console output goes to stderr, leaving stdout to decoded results.
///
/// With file logging enabled the returned guard owns the background writer;
/// buffered lines are flushed when it is dropped, so keep it alive until the
/// program exits.
///
/// # Examples
/// ```no_run
/// use ix_decoder::logging::{self, LoggingConfig};
///
/// let _guard = logging::init_with_config(LoggingConfig {
///     level: "debug",
///     json_format: false,
///     strip_ansi: false,
///     write_to_file: false,
///     write_path: "./logs",
///     write_max_file_size: 5242880,
///     write_max_files: 5,
/// })?;
/// # Ok::<(), ix_decoder::logging::LoggingError>(())
/// ```
///
/// # Log Rotation
/// When a log file reaches `write_max_file_size`, it is rotated:
/// - Current: logs.log
/// - After rotation: logs.log.1, logs.log.2, etc.
/// - Keeps up to `write_max_files` files, the current one included
pub fn init_with_config(config: LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = build_filter(config.level)?;
    let registry = tracing_subscriber::registry().with(filter);

    if config.write_to_file {
        let (non_blocking, guard) = file_writer(&config)?;

        if config.json_format {
            let console_layer = fmt::layer().json().with_writer(std::io::stderr);
            let file_layer = fmt::layer().json().with_writer(non_blocking);
            registry.with(console_layer).with(file_layer).try_init()?;
        } else {
            let console_layer = fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(!config.strip_ansi)
                .with_writer(std::io::stderr);

            let file_layer = fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false) // Never use ANSI in files
                .with_writer(non_blocking);

            registry.with(console_layer).with(file_layer).try_init()?;
        }
        return Ok(Some(guard));
    } else if config.json_format {
        let fmt_layer = fmt::layer().json().with_writer(std::io::stderr);
        registry.with(fmt_layer).try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(!config.strip_ansi)
            .with_writer(std::io::stderr);
        registry.with(fmt_layer).try_init()?;
    }

    Ok(None)
}

/// Size-rotated `logs.log` under `write_path`, behind a non-blocking writer.
fn file_writer(config: &LoggingConfig) -> Result<(NonBlocking, WorkerGuard), LoggingError> {
    std::fs::create_dir_all(config.write_path)?;

    let log_file_path = PathBuf::from(config.write_path).join("logs.log");
    // e.g. write_max_files=5: logs.log (current) + logs.log.{1,2,3,4}
    let rotated_files_count = config.write_max_files.saturating_sub(1);
    let file_appender = BasicRollingFileAppender::new(
        log_file_path,
        RollingConditionBasic::new().max_size(config.write_max_file_size),
        rotated_files_count,
    )?;

    Ok(tracing_appender::non_blocking(file_appender))
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|source| LoggingError::InvalidLogLevel {
        level: level.to_string(),
        source,
    })
}

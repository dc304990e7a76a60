// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log Level
    ///
    /// Env: IXD_LOG_LEVEL
    /// Valid values: trace, debug, info, warn, error
    /// Default: info
    pub level: String,

    /// Output logs in JSON format
    ///
    /// Env: IXD_LOG_JSON
    /// Default: false
    pub json: bool,

    /// Strip ANSI color codes from logs
    ///
    /// Env: IXD_LOG_STRIP_ANSI
    /// Default: false
    pub strip_ansi: bool,

    /// Also write logs to a size-rotated file
    ///
    /// Env: IXD_LOG_WRITE
    /// Default: false
    pub write: bool,

    /// Directory holding the log file
    ///
    /// Env: IXD_LOG_WRITE_PATH
    /// Default: ./logs
    pub write_path: String,

    /// Rotate once the log file reaches this many bytes
    ///
    /// Env: IXD_LOG_WRITE_MAX_FILE_SIZE
    /// Default: 5242880
    pub write_max_file_size: u64,

    /// Number of log files to keep, current one included
    ///
    /// Env: IXD_LOG_WRITE_MAX_FILES
    /// Default: 5
    pub write_max_files: usize,
}

pub(crate) fn default_level() -> String {
    "info".to_string()
}

pub(crate) fn default_write_path() -> String {
    "./logs".to_string()
}

pub(crate) fn default_write_max_file_size() -> u64 {
    5_242_880
}

pub(crate) fn default_write_max_files() -> usize {
    5
}

impl LogConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];

        if !valid_levels.contains(&self.level.as_str()) {
            return Err(ConfigError::ValidateError(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            )));
        }

        if self.write {
            if self.write_path.is_empty() {
                return Err(ConfigError::ValidateError(
                    "Log write path cannot be empty when file logging is enabled".to_string(),
                ));
            }
            if self.write_max_file_size == 0 {
                return Err(ConfigError::ValidateError(
                    "Log max file size must be greater than 0".to_string(),
                ));
            }
            if self.write_max_files == 0 {
                return Err(ConfigError::ValidateError(
                    "Log max files must be at least 1".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            strip_ansi: false,
            write: false,
            write_path: default_write_path(),
            write_max_file_size: default_write_max_file_size(),
            write_max_files: default_write_max_files(),
        }
    }
}

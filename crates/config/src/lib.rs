// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod args;
mod decode;
mod error;
mod log;

pub use args::{Args, Command, FormatArg, KindArg};
pub use decode::{DecodeConfig, MAX_DEPTH_LIMIT};
pub use error::ConfigError;
pub use log::LogConfig;

use serde::Deserialize;
use std::path::Path;

/// Flat view of the `IXD_` environment, as envy sees it.
#[derive(Debug, Deserialize)]
struct EnvVars {
    #[serde(default = "log::default_level")]
    log_level: String,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
    #[serde(default)]
    log_write: bool,
    #[serde(default = "log::default_write_path")]
    log_write_path: String,
    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,
    #[serde(default = "log::default_write_max_files")]
    log_write_max_files: usize,
    #[serde(default)]
    decode_strict: bool,
    #[serde(default = "decode::default_max_depth")]
    decode_max_depth: usize,
    #[serde(default = "decode::default_max_sequence_len")]
    decode_max_sequence_len: usize,
}

impl From<EnvVars> for DecoderAppConfig {
    fn from(env: EnvVars) -> Self {
        Self {
            log: LogConfig {
                level: env.log_level,
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
                write_max_files: env.log_write_max_files,
            },
            decode: DecodeConfig {
                strict: env.decode_strict,
                max_depth: env.decode_max_depth,
                max_sequence_len: env.decode_max_sequence_len,
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DecoderAppConfig {
    pub log: LogConfig,
    pub decode: DecodeConfig,
}

impl DecoderAppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Self = envy::prefixed("IXD_").from_env::<EnvVars>()?.into();
        config.validate()?;
        Ok(config)
    }

    /// Load `path` into the process environment, then read the config.
    ///
    /// A missing env file is not an error; variables already set win over
    /// values from the file.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            dotenv::from_path(path).map_err(|source| ConfigError::EnvFile {
                path: path.display().to_string(),
                source,
            })?;
        }
        Self::from_env()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.log.validate()?;
        self.decode.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const VARS: &[&str] = &[
        "IXD_LOG_LEVEL",
        "IXD_LOG_JSON",
        "IXD_DECODE_STRICT",
        "IXD_DECODE_MAX_DEPTH",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: env-mutating tests run under #[serial].
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    fn test_default_config() {
        let config = DecoderAppConfig::default();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.decode.max_depth, 64);
        assert!(!config.decode.strict);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = DecoderAppConfig::from_env().expect("defaults are valid");
        assert_eq!(config.log.level, "info");
        assert_eq!(config.decode.max_sequence_len, 1 << 20);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("IXD_LOG_LEVEL", "debug");
            std::env::set_var("IXD_LOG_JSON", "true");
            std::env::set_var("IXD_DECODE_STRICT", "true");
            std::env::set_var("IXD_DECODE_MAX_DEPTH", "16");
        }
        let config = DecoderAppConfig::from_env().expect("valid overrides");
        clear_env();

        assert_eq!(config.log.level, "debug");
        assert!(config.log.json);
        assert!(config.decode.strict);
        assert_eq!(config.decode.max_depth, 16);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_level() {
        clear_env();
        unsafe { std::env::set_var("IXD_LOG_LEVEL", "verbose") };
        let result = DecoderAppConfig::from_env();
        clear_env();

        assert!(matches!(result, Err(ConfigError::ValidateError(_))));
    }

    #[test]
    #[serial]
    fn test_from_env_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "IXD_DECODE_MAX_DEPTH=8").unwrap();

        let config = DecoderAppConfig::from_env_file(file.path()).expect("valid env file");
        clear_env();

        assert_eq!(config.decode.max_depth, 8);
    }

    #[test]
    #[serial]
    fn test_missing_env_file_is_ignored() {
        clear_env();
        let config = DecoderAppConfig::from_env_file("/nonexistent/.env.ixd").unwrap();
        assert_eq!(config.decode.max_depth, 64);
    }
}

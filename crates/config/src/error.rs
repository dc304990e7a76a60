// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration from environment: {0}")]
    EnvError(#[from] envy::Error),

    #[error("Failed to load env file '{path}': {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenv::Error,
    },

    #[error("Invalid configuration: {0}")]
    ValidateError(String),
}

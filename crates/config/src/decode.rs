// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;

/// Hard ceiling for `max_depth`; deeper type trees are rejected at startup.
/// The decoder's recursion at this depth must fit its thread stack.
pub const MAX_DEPTH_LIMIT: usize = 256;

#[derive(Debug, Clone)]
pub struct DecodeConfig {
    /// Report discriminators claimed by more than one registered schema
    /// instead of silently picking the first one
    ///
    /// Env: IXD_DECODE_STRICT
    /// Default: false
    pub strict: bool,

    /// Maximum nesting of named types followed while decoding
    ///
    /// Env: IXD_DECODE_MAX_DEPTH
    /// Valid values: 1..=256
    /// Default: 64
    pub max_depth: usize,

    /// Largest element count accepted from a length prefix
    ///
    /// Env: IXD_DECODE_MAX_SEQUENCE_LEN
    /// Default: 1048576
    pub max_sequence_len: usize,
}

pub(crate) fn default_max_depth() -> usize {
    64
}

pub(crate) fn default_max_sequence_len() -> usize {
    1 << 20
}

impl DecodeConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::ValidateError(format!(
                "Decode max depth must be between 1 and {}, got {}",
                MAX_DEPTH_LIMIT, self.max_depth
            )));
        }

        if self.max_sequence_len == 0 {
            return Err(ConfigError::ValidateError(
                "Decode max sequence length cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: default_max_depth(),
            max_sequence_len: default_max_sequence_len(),
        }
    }
}

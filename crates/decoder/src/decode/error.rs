// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::types::{Discriminator, ItemKind};
use thiserror::Error;

/// Why a payload could not be decoded. Decoding is all-or-nothing: no
/// partial result accompanies any of these.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("No registered {kind} matches discriminator {discriminator}")]
    UnknownDiscriminator {
        kind: ItemKind,
        discriminator: Discriminator,
    },

    #[error("Discriminator {discriminator} is declared by several schemas: {}", .schemas.join(", "))]
    AmbiguousDiscriminator {
        discriminator: Discriminator,
        schemas: Vec<String>,
    },

    #[error(
        "Truncated input reading '{field}' at offset {offset}: needed {needed} bytes, {available} available"
    )]
    TruncatedInput {
        field: String,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Malformed value for '{field}' at offset {offset}: {reason}")]
    MalformedValue {
        field: String,
        offset: usize,
        reason: String,
    },
}

impl DecodeError {
    pub(crate) fn malformed(field: &str, offset: usize, reason: impl Into<String>) -> Self {
        DecodeError::MalformedValue {
            field: field.to_string(),
            offset,
            reason: reason.into(),
        }
    }
}

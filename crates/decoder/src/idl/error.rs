// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::types::Discriminator;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Schema document is missing")]
    MissingDocument,

    #[error("Schema document must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Invalid '{section}' section: {reason}")]
    InvalidSection {
        section: &'static str,
        reason: String,
    },

    #[error("Entry {index} of '{section}' has no name")]
    MissingName { section: &'static str, index: usize },

    #[error("Invalid discriminator for '{item}': {reason}")]
    InvalidDiscriminator { item: String, reason: String },

    #[error("Duplicate {section} discriminator {discriminator}: '{first}' and '{second}'")]
    DuplicateDiscriminator {
        section: &'static str,
        discriminator: Discriminator,
        first: String,
        second: String,
    },

    #[error("Failed to read schema document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse schema document: {0}")]
    Json(#[from] serde_json::Error),
}

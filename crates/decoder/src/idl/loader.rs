// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{SchemaError, normalize_with_address, to_document};
use crate::types::Schema;
use serde_json::Value;
use std::path::Path;

/// Read a JSON IDL document from disk.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value, SchemaError> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&raw)?)
}

/// Read and normalize an IDL document.
pub fn load_schema(path: impl AsRef<Path>, address: Option<&str>) -> Result<Schema, SchemaError> {
    let path = path.as_ref();
    let document = load_document(path)?;
    let schema = normalize_with_address(&document, address)?;
    tracing::debug!(path = %path.display(), program = %schema.name(), "Loaded schema");
    Ok(schema)
}

/// Pretty-printed canonical document.
pub fn render_document(schema: &Schema) -> Result<String, SchemaError> {
    Ok(serde_json::to_string_pretty(&to_document(schema))?)
}

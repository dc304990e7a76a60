// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::types::Schema;
use serde::Serialize;
use std::fmt;

/// Quick overview of a normalized schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSummary {
    pub name: String,
    pub address: Option<String>,
    pub version: String,
    pub instruction_count: usize,
    pub account_count: usize,
    pub type_count: usize,
    pub event_count: usize,
    pub instruction_names: Vec<String>,
}

impl SchemaSummary {
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            name: schema.name().to_string(),
            address: schema.address().map(str::to_string),
            version: schema.metadata().version.clone(),
            instruction_count: schema.instructions().len(),
            account_count: schema.accounts().len(),
            type_count: schema.types().len(),
            event_count: schema.events().len(),
            instruction_names: schema
                .instructions()
                .iter()
                .map(|ix| ix.name.clone())
                .collect(),
        }
    }
}

impl fmt::Display for SchemaSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "Address: {}", self.address.as_deref().unwrap_or("-"))?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Instructions: {}", self.instruction_count)?;
        writeln!(f, "Accounts: {}", self.account_count)?;
        writeln!(f, "Types: {}", self.type_count)?;
        writeln!(f, "Events: {}", self.event_count)?;
        writeln!(f)?;
        writeln!(f, "Instruction names:")?;
        for name in &self.instruction_names {
            writeln!(f, "{}", name)?;
        }
        Ok(())
    }
}

// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registered schemas and discriminator lookup.
//!
//! Built once at startup and read-only afterwards, so a registry can be
//! shared by reference across concurrent decode calls.

use crate::decode::DecodeError;
use crate::types::{Discriminator, ItemKind, Schema};

#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: Vec<Schema>,
    strict: bool,
}

impl SchemaRegistry {
    /// Permissive registry: when several schemas declare a discriminator the
    /// first registered one wins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that reports `AmbiguousDiscriminator` instead of picking the
    /// first match.
    pub fn strict() -> Self {
        Self {
            schemas: Vec::new(),
            strict: true,
        }
    }

    pub fn with_strict(strict: bool) -> Self {
        Self {
            schemas: Vec::new(),
            strict,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn register(&mut self, schema: Schema) {
        self.warn_on_collisions(&schema);
        tracing::info!(
            program = %schema.name(),
            address = schema.address().unwrap_or("-"),
            instructions = schema.instructions().len(),
            accounts = schema.accounts().len(),
            events = schema.events().len(),
            "Registered schema"
        );
        self.schemas.push(schema);
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Schema declaring an instruction with `discriminator`.
    pub fn identify(&self, discriminator: &Discriminator) -> Result<&Schema, DecodeError> {
        self.identify_kind(ItemKind::Instruction, discriminator)
    }

    /// Schema declaring an item of `kind` with `discriminator`.
    pub fn identify_kind(
        &self,
        kind: ItemKind,
        discriminator: &Discriminator,
    ) -> Result<&Schema, DecodeError> {
        let mut matches = self
            .schemas
            .iter()
            .filter(|schema| schema.declares(kind, discriminator));

        let first = matches.next().ok_or(DecodeError::UnknownDiscriminator {
            kind,
            discriminator: *discriminator,
        })?;

        if self.strict {
            let others: Vec<&Schema> = matches.collect();
            if !others.is_empty() {
                return Err(DecodeError::AmbiguousDiscriminator {
                    discriminator: *discriminator,
                    schemas: std::iter::once(first)
                        .chain(others)
                        .map(|schema| schema.name().to_string())
                        .collect(),
                });
            }
        }

        Ok(first)
    }

    fn warn_on_collisions(&self, incoming: &Schema) {
        let declared = incoming
            .instructions()
            .iter()
            .map(|ix| (ItemKind::Instruction, ix.name.as_str(), ix.discriminator))
            .chain(
                incoming
                    .accounts()
                    .iter()
                    .map(|item| (ItemKind::Account, item.name.as_str(), item.discriminator)),
            )
            .chain(
                incoming
                    .events()
                    .iter()
                    .map(|item| (ItemKind::Event, item.name.as_str(), item.discriminator)),
            );

        for (kind, name, discriminator) in declared {
            if let Some(existing) = self
                .schemas
                .iter()
                .find(|schema| schema.declares(kind, &discriminator))
            {
                tracing::warn!(
                    %kind,
                    item = %name,
                    %discriminator,
                    incoming = %incoming.name(),
                    existing = %existing.name(),
                    strict = self.strict,
                    "Discriminator already registered by another schema"
                );
            }
        }
    }
}

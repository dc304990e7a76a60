// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core data model shared by normalization, the registry and the decoder.

pub mod discriminator;
pub mod schema;

pub use discriminator::{DISCRIMINATOR_LEN, Discriminator};
pub use schema::{
    AccountMeta, Field, Instruction, InstructionAccount, ItemDescriptor, ItemKind, Metadata,
    Schema, TypeDef, TypeDefKind, TypeExpr, VariantDef,
};

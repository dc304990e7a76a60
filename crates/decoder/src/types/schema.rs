// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Canonical schema model produced by normalization and consumed by the decoder.

use super::Discriminator;
use crate::consts::{NAMESPACE_ACCOUNT, NAMESPACE_EVENT, NAMESPACE_GLOBAL};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A field's type, after normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// Built-in scalar such as `u64`, `bool`, `string` or `pubkey`.
    Scalar(String),
    FixedArray { element: Box<TypeExpr>, len: u32 },
    List(Box<TypeExpr>),
    Optional(Box<TypeExpr>),
    /// Reference to an entry of the owning schema's type table.
    NamedRef(String),
    /// A shape the normalizer does not understand, kept verbatim.
    Opaque(Value),
}

impl TypeExpr {
    pub fn scalar(name: impl Into<String>) -> Self {
        TypeExpr::Scalar(name.into())
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::NamedRef(name.into())
    }

    pub fn array(element: TypeExpr, len: u32) -> Self {
        TypeExpr::FixedArray {
            element: Box::new(element),
            len,
        }
    }

    pub fn list(element: TypeExpr) -> Self {
        TypeExpr::List(Box::new(element))
    }

    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::Optional(Box::new(inner))
    }
}

/// Short type label carried next to every decoded field: `u64`, `u8[32]`,
/// `List<pubkey>`, `Option<Side>`.
impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Scalar(name) | TypeExpr::NamedRef(name) => f.write_str(name),
            TypeExpr::FixedArray { element, len } => write!(f, "{}[{}]", element, len),
            TypeExpr::List(element) => write!(f, "List<{}>", element),
            TypeExpr::Optional(inner) => write!(f, "Option<{}>", inner),
            TypeExpr::Opaque(_) => f.write_str("opaque"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeExpr,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantDef {
    pub name: String,
    /// Empty for unit variants.
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefKind {
    Struct(Vec<Field>),
    Enum(Vec<VariantDef>),
    /// `{"kind": "type", "alias": T}`
    Alias(TypeExpr),
    /// Unknown `kind`, kept verbatim.
    Opaque(Value),
}

/// Named entry of a schema's type table.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub kind: TypeDefKind,
}

/// Which discriminator namespace an item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Instruction,
    Account,
    Event,
}

impl ItemKind {
    pub fn namespace(&self) -> &'static str {
        match self {
            ItemKind::Instruction => NAMESPACE_GLOBAL,
            ItemKind::Account => NAMESPACE_ACCOUNT,
            ItemKind::Event => NAMESPACE_EVENT,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ItemKind::Instruction => "instruction",
            ItemKind::Account => "account",
            ItemKind::Event => "event",
        })
    }
}

/// Account and event entries: the layout lives in the type table under the
/// same name.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDescriptor {
    pub name: String,
    pub discriminator: Discriminator,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccountMeta {
    pub name: String,
    pub writable: bool,
    pub signer: bool,
    pub optional: bool,
    pub address: Option<String>,
    pub docs: Option<Value>,
    pub pda: Option<Value>,
    pub relations: Option<Value>,
}

/// Entry of an instruction's account list; groups nest to any depth.
#[derive(Debug, Clone, PartialEq)]
pub enum InstructionAccount {
    Single(AccountMeta),
    Group {
        name: String,
        accounts: Vec<InstructionAccount>,
    },
}

impl InstructionAccount {
    pub fn name(&self) -> &str {
        match self {
            InstructionAccount::Single(meta) => &meta.name,
            InstructionAccount::Group { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub name: String,
    pub discriminator: Discriminator,
    pub accounts: Vec<InstructionAccount>,
    pub args: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub name: String,
    pub version: String,
    pub spec: String,
    pub description: String,
}

/// A normalized IDL. Immutable once built.
#[derive(Debug, Clone)]
pub struct Schema {
    address: Option<String>,
    metadata: Metadata,
    instructions: Vec<Instruction>,
    accounts: Vec<ItemDescriptor>,
    types: Vec<TypeDef>,
    events: Vec<ItemDescriptor>,
    errors: Value,
    type_index: HashMap<String, usize>,
}

impl Schema {
    /// Assemble a schema. When the type table repeats a name, lookups
    /// resolve to the first entry.
    pub fn new(
        address: Option<String>,
        metadata: Metadata,
        instructions: Vec<Instruction>,
        accounts: Vec<ItemDescriptor>,
        types: Vec<TypeDef>,
        events: Vec<ItemDescriptor>,
        errors: Value,
    ) -> Self {
        let mut type_index = HashMap::with_capacity(types.len());
        for (position, def) in types.iter().enumerate() {
            type_index.entry(def.name.clone()).or_insert(position);
        }

        Self {
            address,
            metadata,
            instructions,
            accounts,
            types,
            events,
            errors,
            type_index,
        }
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn accounts(&self) -> &[ItemDescriptor] {
        &self.accounts
    }

    pub fn types(&self) -> &[TypeDef] {
        &self.types
    }

    pub fn events(&self) -> &[ItemDescriptor] {
        &self.events
    }

    pub fn errors(&self) -> &Value {
        &self.errors
    }

    pub fn find_type(&self, name: &str) -> Option<&TypeDef> {
        self.type_index.get(name).map(|&position| &self.types[position])
    }

    pub fn find_instruction(&self, discriminator: &Discriminator) -> Option<&Instruction> {
        self.instructions
            .iter()
            .find(|ix| &ix.discriminator == discriminator)
    }

    /// Look up an account or event entry by discriminator.
    ///
    /// Instructions are not `ItemDescriptor`s; use `find_instruction`.
    pub fn find_item(&self, kind: ItemKind, discriminator: &Discriminator) -> Option<&ItemDescriptor> {
        let items = match kind {
            ItemKind::Instruction => return None,
            ItemKind::Account => &self.accounts,
            ItemKind::Event => &self.events,
        };
        items.iter().find(|item| &item.discriminator == discriminator)
    }

    /// Whether any item of `kind` carries `discriminator`.
    pub fn declares(&self, kind: ItemKind, discriminator: &Discriminator) -> bool {
        match kind {
            ItemKind::Instruction => self.find_instruction(discriminator).is_some(),
            _ => self.find_item(kind, discriminator).is_some(),
        }
    }
}

/// Equality ignores the derived lookup index.
impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
            && self.metadata == other.metadata
            && self.instructions == other.instructions
            && self.accounts == other.accounts
            && self.types == other.types
            && self.events == other.events
            && self.errors == other.errors
    }
}

// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! IDL normalization.
//!
//! Accepts IDL documents in both the legacy (pre-0.30 Anchor) and current
//! layouts and produces a canonical [`Schema`]:
//! - metadata is synthesized from whatever name/version fields exist
//! - every instruction, account and event gets a discriminator
//! - camelCase instruction names get a snake_case alias entry so payloads
//!   produced under either naming convention are recognised
//! - inline account and event layouts move into the shared type table
//! - type expressions are rewritten by [`super::type_expr`]
//!
//! Every step is idempotent: normalizing the canonical document written by
//! [`super::to_document`] yields an equal schema.

use super::SchemaError;
use super::discriminator::compute_for;
use super::type_expr::{parse_inline, parse_type};
use crate::consts::{DEFAULT_SPEC, DEFAULT_VERSION, UNKNOWN_NAME, UNNAMED_FIELD};
use crate::types::{
    AccountMeta, Discriminator, Field, Instruction, InstructionAccount, ItemDescriptor, ItemKind,
    Metadata, Schema, TypeDef, TypeDefKind, TypeExpr, VariantDef,
};
use heck::ToSnakeCase;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Normalize an IDL document.
pub fn normalize(document: &Value) -> Result<Schema, SchemaError> {
    normalize_with_address(document, None)
}

/// Normalize an IDL document, recording `address` as the program address.
///
/// Without an override the address comes from the document's `address` or
/// legacy `metadata.address`.
pub fn normalize_with_address(
    document: &Value,
    address: Option<&str>,
) -> Result<Schema, SchemaError> {
    let doc = match document {
        Value::Null => return Err(SchemaError::MissingDocument),
        Value::Object(map) => map,
        other => return Err(SchemaError::NotAnObject(json_kind(other))),
    };

    let metadata = synthesize_metadata(doc);
    let address = address
        .map(str::to_string)
        .or_else(|| document_address(doc));

    let instructions = normalize_instructions(section(doc, "instructions")?)?;

    let mut types = section(doc, "types")?
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_named_type(entry, index))
        .collect::<Result<Vec<_>, _>>()?;

    let accounts = restructure_items(section(doc, "accounts")?, ItemKind::Account, &mut types)?;
    let events = restructure_items(section(doc, "events")?, ItemKind::Event, &mut types)?;

    let errors = match doc.get("errors") {
        None | Some(Value::Null) => Value::Array(Vec::new()),
        Some(errors) => errors.clone(),
    };

    tracing::debug!(
        program = %metadata.name,
        instructions = instructions.len(),
        accounts = accounts.len(),
        types = types.len(),
        events = events.len(),
        "Normalized schema"
    );

    Ok(Schema::new(
        address,
        metadata,
        instructions,
        accounts,
        types,
        events,
        errors,
    ))
}

fn synthesize_metadata(doc: &Map<String, Value>) -> Metadata {
    let nested = doc.get("metadata").and_then(Value::as_object);

    let name = text(doc, nested, "name").unwrap_or(UNKNOWN_NAME).to_string();
    let version = text(doc, nested, "version")
        .unwrap_or(DEFAULT_VERSION)
        .to_string();
    let spec = nested_text(nested, "spec")
        .unwrap_or(DEFAULT_SPEC)
        .to_string();
    let description = nested_text(nested, "description")
        .map(str::to_string)
        .unwrap_or_else(|| format!("Created with Anchor - {}", name));

    Metadata {
        name,
        version,
        spec,
        description,
    }
}

/// Top-level string field, falling back to the same key under `metadata`.
fn text<'a>(
    doc: &'a Map<String, Value>,
    nested: Option<&'a Map<String, Value>>,
    key: &str,
) -> Option<&'a str> {
    doc.get(key)
        .and_then(Value::as_str)
        .or_else(|| nested_text(nested, key))
}

fn nested_text<'a>(nested: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a str> {
    nested?.get(key).and_then(Value::as_str)
}

fn document_address(doc: &Map<String, Value>) -> Option<String> {
    let nested = doc.get("metadata").and_then(Value::as_object);
    doc.get("address")
        .and_then(Value::as_str)
        .or_else(|| nested_text(nested, "address"))
        .map(str::to_string)
}

fn normalize_instructions(entries: &[Value]) -> Result<Vec<Instruction>, SchemaError> {
    let mut instructions = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_instruction(entry, index))
        .collect::<Result<Vec<_>, _>>()?;

    ensure_unique(
        "instructions",
        instructions
            .iter()
            .map(|ix| (ix.name.as_str(), &ix.discriminator)),
    )?;

    let aliases = naming_aliases(&instructions);
    instructions.extend(aliases);
    Ok(instructions)
}

fn parse_instruction(entry: &Value, index: usize) -> Result<Instruction, SchemaError> {
    let obj = entry_object(entry, "instructions", index)?;
    let name = entry_name(obj, "instructions", index)?;
    let discriminator = read_discriminator(obj, &name, ItemKind::Instruction)?;

    let accounts = optional_array(obj, "accounts", "instructions")?
        .iter()
        .enumerate()
        .map(|(index, account)| parse_instruction_account(account, index))
        .collect::<Result<Vec<_>, _>>()?;
    let args = parse_fields(optional_array(obj, "args", "instructions")?);

    Ok(Instruction {
        name,
        discriminator,
        accounts,
        args,
    })
}

/// snake_case duplicates of instructions whose declared name differs, in
/// declaration order. An alias is skipped when an instruction of that name
/// or with that discriminator already exists.
fn naming_aliases(instructions: &[Instruction]) -> Vec<Instruction> {
    let alias_names: Vec<String> = instructions
        .iter()
        .map(|ix| ix.name.to_snake_case())
        .collect();
    let mut taken_names: HashSet<&str> = instructions.iter().map(|ix| ix.name.as_str()).collect();
    let mut taken_discriminators: HashSet<Discriminator> =
        instructions.iter().map(|ix| ix.discriminator).collect();

    let mut aliases = Vec::new();
    for (ix, alias_name) in instructions.iter().zip(&alias_names) {
        if *alias_name == ix.name || taken_names.contains(alias_name.as_str()) {
            continue;
        }

        let discriminator = compute_for(ItemKind::Instruction, alias_name);
        if !taken_discriminators.insert(discriminator) {
            tracing::debug!(
                instruction = %ix.name,
                alias = %alias_name,
                %discriminator,
                "Alias discriminator already declared, skipping alias"
            );
            continue;
        }
        taken_names.insert(alias_name);

        tracing::debug!(
            instruction = %ix.name,
            alias = %alias_name,
            %discriminator,
            "Synthesized naming alias"
        );
        aliases.push(Instruction {
            name: alias_name.clone(),
            discriminator,
            accounts: ix.accounts.clone(),
            args: ix.args.clone(),
        });
    }
    aliases
}

fn parse_instruction_account(
    entry: &Value,
    index: usize,
) -> Result<InstructionAccount, SchemaError> {
    let obj = entry_object(entry, "instructions.accounts", index)?;
    let name = entry_name(obj, "instructions.accounts", index)?;

    if let Some(nested) = obj.get("accounts").and_then(Value::as_array) {
        let accounts = nested
            .iter()
            .enumerate()
            .map(|(index, account)| parse_instruction_account(account, index))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(InstructionAccount::Group { name, accounts });
    }

    Ok(InstructionAccount::Single(AccountMeta {
        name,
        writable: flag(obj, "isMut", "writable"),
        signer: flag(obj, "isSigner", "signer"),
        optional: flag(obj, "isOptional", "optional"),
        address: obj
            .get("address")
            .and_then(Value::as_str)
            .map(str::to_string),
        docs: obj.get("docs").cloned(),
        pda: obj.get("pda").cloned(),
        relations: obj.get("relations").cloned(),
    }))
}

/// Legacy `isMut`-style key first, then the current spelling.
fn flag(obj: &Map<String, Value>, legacy: &str, current: &str) -> bool {
    obj.get(legacy)
        .or_else(|| obj.get(current))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Reduce account or event entries to name + discriminator, moving any inline
/// layout into `types` unless a type of that name is already present.
fn restructure_items(
    entries: &[Value],
    kind: ItemKind,
    types: &mut Vec<TypeDef>,
) -> Result<Vec<ItemDescriptor>, SchemaError> {
    let section = section_name(kind);
    let mut items = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let obj = entry_object(entry, section, index)?;
        let name = entry_name(obj, section, index)?;
        let discriminator = read_discriminator(obj, &name, kind)?;

        if let Some(layout) = inline_layout(obj) {
            if types.iter().any(|def| def.name == name) {
                tracing::debug!(%kind, name = %name, "Type already present, keeping existing layout");
            } else {
                types.push(TypeDef {
                    name: name.clone(),
                    kind: layout,
                });
            }
        }

        items.push(ItemDescriptor {
            name,
            discriminator,
        });
    }

    ensure_unique(
        section,
        items
            .iter()
            .map(|item| (item.name.as_str(), &item.discriminator)),
    )?;
    Ok(items)
}

/// Legacy accounts carry `type: {kind, fields}`; legacy events carry `fields`.
fn inline_layout(obj: &Map<String, Value>) -> Option<TypeDefKind> {
    if let Some(def) = obj.get("type") {
        return Some(parse_type_def(def));
    }
    obj.get("fields")
        .and_then(Value::as_array)
        .map(|fields| TypeDefKind::Struct(parse_fields(fields)))
}

fn parse_named_type(entry: &Value, index: usize) -> Result<TypeDef, SchemaError> {
    let obj = entry_object(entry, "types", index)?;
    let name = entry_name(obj, "types", index)?;
    let kind = match obj.get("type") {
        Some(def) => parse_type_def(def),
        None => TypeDefKind::Opaque(Value::Null),
    };
    Ok(TypeDef { name, kind })
}

fn parse_type_def(def: &Value) -> TypeDefKind {
    let Some(map) = def.as_object() else {
        return TypeDefKind::Opaque(def.clone());
    };
    let kind = map.get("kind").and_then(Value::as_str);

    match kind {
        None | Some("enum") => {
            if let Some(variants) = map.get("variants").and_then(Value::as_array) {
                if let Some(variants) = variants.iter().map(parse_variant).collect::<Option<Vec<_>>>() {
                    return TypeDefKind::Enum(variants);
                }
                return TypeDefKind::Opaque(def.clone());
            }
        }
        _ => {}
    }

    match kind {
        None | Some("struct") => match map.get("fields") {
            Some(Value::Array(fields)) => TypeDefKind::Struct(parse_fields(fields)),
            None if kind.is_some() => TypeDefKind::Struct(Vec::new()),
            _ => TypeDefKind::Opaque(def.clone()),
        },
        Some("type") => match map.get("alias") {
            Some(alias) => TypeDefKind::Alias(parse_type(alias)),
            None => TypeDefKind::Opaque(def.clone()),
        },
        _ => TypeDefKind::Opaque(def.clone()),
    }
}

fn parse_variant(entry: &Value) -> Option<VariantDef> {
    let obj = entry.as_object()?;
    let name = obj.get("name")?.as_str()?.to_string();
    let fields = obj
        .get("fields")
        .and_then(Value::as_array)
        .map(|fields| parse_variant_fields(fields.as_slice()))
        .unwrap_or_default();
    Some(VariantDef { name, fields })
}

/// Struct, argument and event fields. Bare types (tuple structs) are named
/// by position.
fn parse_fields(entries: &[Value]) -> Vec<Field> {
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| match entry {
            Value::Object(map) => match map.get("name").and_then(Value::as_str) {
                Some(name) => Field::new(name, field_type(map, entry)),
                None => Field::new(position.to_string(), field_type(map, entry)),
            },
            _ => Field::new(position.to_string(), parse_type(entry)),
        })
        .collect()
}

fn field_type(map: &Map<String, Value>, entry: &Value) -> TypeExpr {
    match map.get("type") {
        Some(ty) => parse_type(ty),
        None => parse_inline(map).unwrap_or_else(|| parse_type(entry)),
    }
}

/// Enum variant payloads. Unnamed fields are called `value` when they are
/// the only field, otherwise they are named by position.
fn parse_variant_fields(entries: &[Value]) -> Vec<Field> {
    let lone = entries.len() == 1;
    let unnamed = |position: usize| {
        if lone {
            UNNAMED_FIELD.to_string()
        } else {
            position.to_string()
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| match entry {
            Value::String(_) => Field::new(unnamed(position), parse_type(entry)),
            Value::Object(map) => {
                if let Some(ty) = map.get("type") {
                    let name = map
                        .get("name")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| unnamed(position));
                    Field::new(name, parse_type(ty))
                } else {
                    let ty = parse_inline(map).unwrap_or_else(|| TypeExpr::Opaque(entry.clone()));
                    Field::new(unnamed(position), ty)
                }
            }
            _ => Field::new(unnamed(position), TypeExpr::Opaque(entry.clone())),
        })
        .collect()
}

fn read_discriminator(
    obj: &Map<String, Value>,
    name: &str,
    kind: ItemKind,
) -> Result<Discriminator, SchemaError> {
    let invalid = |reason: String| SchemaError::InvalidDiscriminator {
        item: name.to_string(),
        reason,
    };

    match obj.get("discriminator") {
        None | Some(Value::Null) => Ok(compute_for(kind, name)),
        Some(Value::Array(items)) => {
            let bytes = items
                .iter()
                .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
                .collect::<Option<Vec<u8>>>()
                .ok_or_else(|| invalid("expected byte values 0-255".to_string()))?;
            Discriminator::try_from(bytes.as_slice())
                .map_err(|len| invalid(format!("expected 8 bytes, got {}", len)))
        }
        Some(other) => Err(invalid(format!("expected an array, got {}", json_kind(other)))),
    }
}

fn ensure_unique<'a>(
    section: &'static str,
    items: impl Iterator<Item = (&'a str, &'a Discriminator)>,
) -> Result<(), SchemaError> {
    let mut seen: HashMap<Discriminator, &str> = HashMap::new();
    for (name, discriminator) in items {
        if let Some(first) = seen.insert(*discriminator, name) {
            return Err(SchemaError::DuplicateDiscriminator {
                section,
                discriminator: *discriminator,
                first: first.to_string(),
                second: name.to_string(),
            });
        }
    }
    Ok(())
}

fn section<'a>(doc: &'a Map<String, Value>, key: &'static str) -> Result<&'a [Value], SchemaError> {
    optional_array(doc, key, key)
}

fn optional_array<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    section: &'static str,
) -> Result<&'a [Value], SchemaError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(SchemaError::InvalidSection {
            section,
            reason: format!("'{}' must be an array, got {}", key, json_kind(other)),
        }),
    }
}

fn entry_object<'a>(
    entry: &'a Value,
    section: &'static str,
    index: usize,
) -> Result<&'a Map<String, Value>, SchemaError> {
    entry.as_object().ok_or_else(|| SchemaError::InvalidSection {
        section,
        reason: format!("entry {} must be an object, got {}", index, json_kind(entry)),
    })
}

fn entry_name(
    obj: &Map<String, Value>,
    section: &'static str,
    index: usize,
) -> Result<String, SchemaError> {
    obj.get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or(SchemaError::MissingName { section, index })
}

fn section_name(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Instruction => "instructions",
        ItemKind::Account => "accounts",
        ItemKind::Event => "events",
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Walks a schema's field type tree over a payload.
//!
//! The first 8 bytes select the item through the registry; the rest is read
//! Borsh-style: little-endian integers, `u32` length prefixes for `vec`,
//! `string` and `bytes`, a presence byte for `option` and a `u8` tag for
//! enums. Bytes left over after the last declared field are ignored.

use super::numeric::{signed_le, unsigned_le};
use super::reader::ByteReader;
use super::value::{DecodedField, DecodedItem, DecodedValue};
use super::DecodeError;
use crate::consts::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_SEQUENCE_LEN, PUBKEY, PUBKEY_LEN};
use crate::registry::SchemaRegistry;
use crate::types::{
    DISCRIMINATOR_LEN, Discriminator, Field, ItemKind, Schema, TypeDefKind, TypeExpr,
};
use num_bigint::BigInt;

/// Ceilings guarding against hostile payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Deepest chain of named types followed before giving up.
    pub max_depth: usize,
    /// Largest element count accepted from a length prefix or array size.
    pub max_sequence_len: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
        }
    }
}

pub struct InstructionDecoder<'r> {
    registry: &'r SchemaRegistry,
    limits: DecodeLimits,
}

impl<'r> InstructionDecoder<'r> {
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            limits: DecodeLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }

    /// Decode instruction data.
    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedItem, DecodeError> {
        self.decode_kind(ItemKind::Instruction, bytes)
    }

    /// Decode account data, laid out by the type-table struct named after
    /// the account.
    pub fn decode_account(&self, bytes: &[u8]) -> Result<DecodedItem, DecodeError> {
        self.decode_kind(ItemKind::Account, bytes)
    }

    /// Decode event data, laid out by the type-table struct named after the
    /// event.
    pub fn decode_event(&self, bytes: &[u8]) -> Result<DecodedItem, DecodeError> {
        self.decode_kind(ItemKind::Event, bytes)
    }

    pub fn decode_kind(&self, kind: ItemKind, bytes: &[u8]) -> Result<DecodedItem, DecodeError> {
        let discriminator =
            Discriminator::from_prefix(bytes).ok_or_else(|| DecodeError::TruncatedInput {
                field: "discriminator".to_string(),
                offset: 0,
                needed: DISCRIMINATOR_LEN,
                available: bytes.len(),
            })?;

        let schema = self.registry.identify_kind(kind, &discriminator)?;
        let (name, fields) = layout(schema, kind, &discriminator)?;

        let mut walker = Walker {
            schema,
            limits: self.limits,
            reader: ByteReader::at(bytes, DISCRIMINATOR_LEN),
        };

        let mut decoded = Vec::with_capacity(fields.len());
        for field in fields {
            let value = walker.read(&field.ty, &field.name, 0)?;
            decoded.push(DecodedField {
                name: field.name.clone(),
                type_label: field.ty.to_string(),
                value,
            });
        }

        let trailing = walker.reader.remaining();
        if trailing > 0 {
            tracing::debug!(item = %name, trailing, "Ignoring trailing bytes");
        }

        tracing::debug!(
            %kind,
            program = %schema.name(),
            item = %name,
            %discriminator,
            fields = decoded.len(),
            "Decoded item"
        );

        Ok(DecodedItem {
            kind,
            program: schema.name().to_string(),
            name: name.to_string(),
            discriminator,
            fields: decoded,
        })
    }
}

/// Name and ordered fields of the item `discriminator` selects in `schema`.
fn layout<'s>(
    schema: &'s Schema,
    kind: ItemKind,
    discriminator: &Discriminator,
) -> Result<(&'s str, &'s [Field]), DecodeError> {
    let unknown = || DecodeError::UnknownDiscriminator {
        kind,
        discriminator: *discriminator,
    };

    if kind == ItemKind::Instruction {
        let instruction = schema.find_instruction(discriminator).ok_or_else(unknown)?;
        return Ok((instruction.name.as_str(), instruction.args.as_slice()));
    }

    let item = schema.find_item(kind, discriminator).ok_or_else(unknown)?;
    match schema.find_type(&item.name).map(|def| &def.kind) {
        Some(TypeDefKind::Struct(fields)) => Ok((item.name.as_str(), fields.as_slice())),
        Some(_) => Err(DecodeError::malformed(
            &item.name,
            DISCRIMINATOR_LEN,
            format!("{} layout '{}' is not a struct", kind, item.name),
        )),
        None => Err(DecodeError::malformed(
            &item.name,
            DISCRIMINATOR_LEN,
            format!("no type definition for {} '{}'", kind, item.name),
        )),
    }
}

struct Walker<'s, 'b> {
    schema: &'s Schema,
    limits: DecodeLimits,
    reader: ByteReader<'b>,
}

impl Walker<'_, '_> {
    fn read(&mut self, ty: &TypeExpr, path: &str, depth: usize) -> Result<DecodedValue, DecodeError> {
        tracing::trace!(path, ty = %ty, offset = self.reader.offset(), "Reading value");

        match ty {
            TypeExpr::Scalar(name) => self.read_scalar(name, path),
            TypeExpr::FixedArray { element, len } => {
                let len = self.check_len(*len as usize, path)?;
                self.read_elements(element, len, path, depth)
            }
            TypeExpr::List(element) => {
                let len = self.reader.read_u32(path)? as usize;
                let len = self.check_len(len, path)?;
                self.read_elements(element, len, path, depth)
            }
            TypeExpr::Optional(inner) => {
                let offset = self.reader.offset();
                match self.reader.read_u8(path)? {
                    0 => Ok(DecodedValue::Optional(None)),
                    1 => Ok(DecodedValue::Optional(Some(Box::new(
                        self.read(inner, path, depth)?,
                    )))),
                    tag => Err(DecodeError::malformed(
                        path,
                        offset,
                        format!("invalid option tag {}", tag),
                    )),
                }
            }
            TypeExpr::NamedRef(name) => self.read_named(name, path, depth + 1),
            TypeExpr::Opaque(raw) => Err(DecodeError::malformed(
                path,
                self.reader.offset(),
                format!("cannot decode unrecognised type shape {}", raw),
            )),
        }
    }

    fn read_named(
        &mut self,
        name: &str,
        path: &str,
        depth: usize,
    ) -> Result<DecodedValue, DecodeError> {
        let offset = self.reader.offset();
        if depth > self.limits.max_depth {
            return Err(DecodeError::malformed(
                path,
                offset,
                format!(
                    "type nesting exceeds {} levels at '{}'",
                    self.limits.max_depth, name
                ),
            ));
        }

        let schema = self.schema;
        let def = schema.find_type(name).ok_or_else(|| {
            DecodeError::malformed(path, offset, format!("undefined type '{}'", name))
        })?;

        match &def.kind {
            TypeDefKind::Struct(fields) => Ok(DecodedValue::Struct(
                self.read_fields(fields, path, depth)?,
            )),
            TypeDefKind::Enum(variants) => {
                let tag = self.reader.read_u8(path)?;
                let variant = variants.get(tag as usize).ok_or_else(|| {
                    DecodeError::malformed(
                        path,
                        offset,
                        format!(
                            "variant tag {} out of range for '{}' ({} variants)",
                            tag,
                            name,
                            variants.len()
                        ),
                    )
                })?;
                let variant_path = format!("{}.{}", path, variant.name);
                Ok(DecodedValue::Enum {
                    variant: variant.name.clone(),
                    fields: self.read_fields(&variant.fields, &variant_path, depth)?,
                })
            }
            TypeDefKind::Alias(target) => self.read(target, path, depth),
            TypeDefKind::Opaque(_) => Err(DecodeError::malformed(
                path,
                offset,
                format!("type '{}' has an unsupported layout", name),
            )),
        }
    }

    fn read_fields(
        &mut self,
        fields: &[Field],
        path: &str,
        depth: usize,
    ) -> Result<Vec<(String, DecodedValue)>, DecodeError> {
        fields
            .iter()
            .map(|field| {
                let field_path = format!("{}.{}", path, field.name);
                Ok((field.name.clone(), self.read(&field.ty, &field_path, depth)?))
            })
            .collect()
    }

    fn read_elements(
        &mut self,
        element: &TypeExpr,
        len: usize,
        path: &str,
        depth: usize,
    ) -> Result<DecodedValue, DecodeError> {
        // Never trust the prefix for the allocation size.
        let mut items = Vec::with_capacity(len.min(self.reader.remaining()));
        for index in 0..len {
            let item_path = format!("{}[{}]", path, index);
            items.push(self.read(element, &item_path, depth)?);
        }
        Ok(DecodedValue::List(items))
    }

    fn check_len(&self, len: usize, path: &str) -> Result<usize, DecodeError> {
        if len > self.limits.max_sequence_len {
            return Err(DecodeError::malformed(
                path,
                self.reader.offset(),
                format!(
                    "sequence length {} exceeds limit {}",
                    len, self.limits.max_sequence_len
                ),
            ));
        }
        Ok(len)
    }

    fn read_scalar(&mut self, name: &str, path: &str) -> Result<DecodedValue, DecodeError> {
        let offset = self.reader.offset();
        let reader = &mut self.reader;

        let value = match name {
            "bool" => match reader.read_u8(path)? {
                0 => DecodedValue::Bool(false),
                1 => DecodedValue::Bool(true),
                other => {
                    return Err(DecodeError::malformed(
                        path,
                        offset,
                        format!("invalid bool byte {}", other),
                    ));
                }
            },
            "u8" => DecodedValue::Int(reader.read_u8(path)?.into()),
            "i8" => DecodedValue::Int(i8::from_le_bytes(reader.take_array(path)?).into()),
            "u16" => DecodedValue::Int(u16::from_le_bytes(reader.take_array(path)?).into()),
            "i16" => DecodedValue::Int(i16::from_le_bytes(reader.take_array(path)?).into()),
            "u32" => DecodedValue::Int(reader.read_u32(path)?.into()),
            "i32" => DecodedValue::Int(i32::from_le_bytes(reader.take_array(path)?).into()),
            "u64" => DecodedValue::Wide(BigInt::from(u64::from_le_bytes(reader.take_array(path)?))),
            "i64" => DecodedValue::Wide(BigInt::from(i64::from_le_bytes(reader.take_array(path)?))),
            "u128" => DecodedValue::Wide(unsigned_le(reader.take(16, path)?)),
            "i128" => DecodedValue::Wide(signed_le(reader.take(16, path)?)),
            "u256" => DecodedValue::Wide(unsigned_le(reader.take(32, path)?)),
            "i256" => DecodedValue::Wide(signed_le(reader.take(32, path)?)),
            "f32" => DecodedValue::F32(f32::from_le_bytes(reader.take_array(path)?)),
            "f64" => DecodedValue::F64(f64::from_le_bytes(reader.take_array(path)?)),
            "string" => {
                let len = reader.read_u32(path)? as usize;
                let raw = reader.take(len, path)?;
                let text = std::str::from_utf8(raw).map_err(|err| {
                    DecodeError::malformed(path, offset, format!("invalid UTF-8: {}", err))
                })?;
                DecodedValue::String(text.to_string())
            }
            "bytes" => {
                let len = reader.read_u32(path)? as usize;
                DecodedValue::Bytes(reader.take(len, path)?.to_vec())
            }
            PUBKEY => DecodedValue::Address(reader.take_array::<PUBKEY_LEN>(path)?),
            other => {
                return Err(DecodeError::malformed(
                    path,
                    offset,
                    format!("unsupported scalar type '{}'", other),
                ));
            }
        };

        Ok(value)
    }
}

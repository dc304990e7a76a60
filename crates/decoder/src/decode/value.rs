// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoded value tree and its JSON presentation.
//!
//! Presentation rules:
//! - integers up to 32 bits become JSON numbers
//! - 64-bit and wider integers become decimal strings
//! - finite floats become JSON numbers printed from their own width, so an
//!   `f32` 0.1 stays 0.1; NaN and infinities become the strings `NaN`, `inf`
//!   and `-inf`
//! - public keys become base58 strings, `bytes` become `0x` hex
//! - unit enum variants become the bare variant name, other variants
//!   `{"Variant": {fields}}`
//! - structs keep declaration order

use crate::types::{Discriminator, ItemKind};
use num_bigint::BigInt;
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    Bool(bool),
    /// Any integer of 32 bits or fewer.
    Int(i64),
    /// 64-bit and wider integers.
    Wide(BigInt),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    Address([u8; 32]),
    /// Fixed arrays and vectors.
    List(Vec<DecodedValue>),
    Optional(Option<Box<DecodedValue>>),
    Struct(Vec<(String, DecodedValue)>),
    Enum {
        variant: String,
        fields: Vec<(String, DecodedValue)>,
    },
}

impl DecodedValue {
    pub fn to_json(&self) -> Value {
        match self {
            DecodedValue::Bool(value) => Value::Bool(*value),
            DecodedValue::Int(value) => Value::from(*value),
            DecodedValue::Wide(value) => Value::String(value.to_string()),
            DecodedValue::F32(value) => float_to_json(value.to_string()),
            DecodedValue::F64(value) => float_to_json(value.to_string()),
            DecodedValue::String(value) => Value::String(value.clone()),
            DecodedValue::Bytes(bytes) => Value::String(format!("0x{}", hex::encode(bytes))),
            DecodedValue::Address(key) => Value::String(bs58::encode(key).into_string()),
            DecodedValue::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            DecodedValue::Optional(inner) => inner
                .as_deref()
                .map(Self::to_json)
                .unwrap_or(Value::Null),
            DecodedValue::Struct(fields) => fields_to_json(fields),
            DecodedValue::Enum { variant, fields } if fields.is_empty() => {
                Value::String(variant.clone())
            }
            DecodedValue::Enum { variant, fields } => {
                let mut map = Map::new();
                map.insert(variant.clone(), fields_to_json(fields));
                Value::Object(map)
            }
        }
    }
}

/// `text` is the float's shortest round-trip rendering at its own width.
fn float_to_json(text: String) -> Value {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::String(text))
}

fn fields_to_json(fields: &[(String, DecodedValue)]) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect(),
    )
}

/// One top-level field of a decoded item, with its declared type label.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField {
    pub name: String,
    pub type_label: String,
    pub value: DecodedValue,
}

/// A fully decoded instruction, account or event.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedItem {
    pub kind: ItemKind,
    /// Name of the schema that declared the item.
    pub program: String,
    pub name: String,
    pub discriminator: Discriminator,
    pub fields: Vec<DecodedField>,
}

impl DecodedItem {
    pub fn field(&self, name: &str) -> Option<&DecodedField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// `{name, discriminator, fields: {<name>: {type, value}}}`
    pub fn to_json(&self) -> Value {
        let fields: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| {
                let mut entry = Map::new();
                entry.insert("type".into(), Value::String(field.type_label.clone()));
                entry.insert("value".into(), field.value.to_json());
                (field.name.clone(), Value::Object(entry))
            })
            .collect();

        let mut out = Map::new();
        out.insert("name".into(), Value::String(self.name.clone()));
        out.insert(
            "discriminator".into(),
            Value::String(self.discriminator.to_string()),
        );
        out.insert("fields".into(), Value::Object(fields));
        Value::Object(out)
    }
}

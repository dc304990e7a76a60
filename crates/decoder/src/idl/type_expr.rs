// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Type expression parsing and normalization.
//!
//! IDL documents spell the same type several ways depending on the Anchor
//! version that produced them: `"publicKey"` or `"pubkey"`, `{"defined": "X"}`
//! or `{"defined": {"name": "X"}}`. `parse_type` pattern-matches the known
//! shapes into a `TypeExpr`; anything else becomes `TypeExpr::Opaque` and is
//! carried through untouched so newer IDL features never fail normalization.

use crate::consts::PUBKEY;
use crate::types::TypeExpr;
use serde_json::{Map, Value, json};

/// Parse any supported type shape and normalize it.
pub fn parse_type(value: &Value) -> TypeExpr {
    normalize(parse_shape(value))
}

/// Rewrite scalar aliases throughout `ty`. Idempotent.
pub fn normalize(ty: TypeExpr) -> TypeExpr {
    match ty {
        TypeExpr::Scalar(name) => TypeExpr::Scalar(canonical_scalar(name)),
        TypeExpr::FixedArray { element, len } => TypeExpr::array(normalize(*element), len),
        TypeExpr::List(element) => TypeExpr::list(normalize(*element)),
        TypeExpr::Optional(inner) => TypeExpr::optional(normalize(*inner)),
        named @ TypeExpr::NamedRef(_) => named,
        opaque @ TypeExpr::Opaque(_) => opaque,
    }
}

/// Canonical JSON spelling of `ty`, as written to normalized IDL documents.
pub fn to_value(ty: &TypeExpr) -> Value {
    match ty {
        TypeExpr::Scalar(name) => Value::String(name.clone()),
        TypeExpr::FixedArray { element, len } => json!({ "array": [to_value(element), len] }),
        TypeExpr::List(element) => json!({ "vec": to_value(element) }),
        TypeExpr::Optional(inner) => json!({ "option": to_value(inner) }),
        TypeExpr::NamedRef(name) => json!({ "defined": { "name": name } }),
        TypeExpr::Opaque(raw) => raw.clone(),
    }
}

/// Recognise a type written directly at the top level of `map`, as older
/// IDLs do for enum variant payloads (`{"vec": "u8"}` instead of
/// `{"name": .., "type": {"vec": "u8"}}`).
pub fn parse_inline(map: &Map<String, Value>) -> Option<TypeExpr> {
    if map.contains_key("type") {
        return None;
    }
    ["array", "defined", "vec", "option"]
        .iter()
        .any(|key| map.contains_key(*key))
        .then(|| parse_type(&Value::Object(map.clone())))
}

fn canonical_scalar(name: String) -> String {
    match name.as_str() {
        "publicKey" | "PublicKey" | "address" => PUBKEY.to_string(),
        _ => name,
    }
}

fn parse_shape(value: &Value) -> TypeExpr {
    let Value::Object(map) = value else {
        return match value {
            Value::String(name) => TypeExpr::Scalar(name.clone()),
            _ => opaque(value),
        };
    };

    if let Some(defined) = map.get("defined") {
        return parse_defined(defined).unwrap_or_else(|| opaque(value));
    }
    if let Some(array) = map.get("array") {
        return parse_array(array).unwrap_or_else(|| opaque(value));
    }
    if let Some(element) = map.get("vec") {
        return TypeExpr::list(parse_shape(element));
    }
    if let Some(inner) = map.get("option") {
        return TypeExpr::optional(parse_shape(inner));
    }

    opaque(value)
}

/// `"Name"` or `{"name": "Name"}`. Generic instantiations are not decodable
/// and stay opaque.
fn parse_defined(defined: &Value) -> Option<TypeExpr> {
    match defined {
        Value::String(name) => Some(TypeExpr::NamedRef(name.clone())),
        Value::Object(inner) => {
            let has_generics = inner
                .get("generics")
                .and_then(Value::as_array)
                .is_some_and(|generics| !generics.is_empty());
            if has_generics {
                return None;
            }
            inner
                .get("name")
                .and_then(Value::as_str)
                .map(TypeExpr::named)
        }
        _ => None,
    }
}

/// `[element, length]`; a generic length stays opaque.
fn parse_array(array: &Value) -> Option<TypeExpr> {
    let [element, len] = array.as_array()?.as_slice() else {
        return None;
    };
    let len = u32::try_from(len.as_u64()?).ok()?;
    Some(TypeExpr::array(parse_shape(element), len))
}

fn opaque(value: &Value) -> TypeExpr {
    tracing::warn!(shape = %value, "Unrecognised type shape, passing through unchanged");
    TypeExpr::Opaque(value.clone())
}

// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Canonical JSON form of a normalized schema.
//!
//! Key order is part of the format: consumers index instruction objects
//! positionally (`name, discriminator, accounts, args`).

use super::type_expr::to_value;
use crate::types::{
    Field, Instruction, InstructionAccount, ItemDescriptor, Schema, TypeDef, TypeDefKind,
    VariantDef,
};
use serde_json::{Map, Value, json};

pub fn to_document(schema: &Schema) -> Value {
    let metadata = schema.metadata();
    json!({
        "address": schema.address(),
        "metadata": {
            "name": metadata.name,
            "version": metadata.version,
            "spec": metadata.spec,
            "description": metadata.description,
        },
        "instructions": schema.instructions().iter().map(instruction_value).collect::<Vec<_>>(),
        "accounts": schema.accounts().iter().map(item_value).collect::<Vec<_>>(),
        "types": schema.types().iter().map(type_def_value).collect::<Vec<_>>(),
        "events": schema.events().iter().map(item_value).collect::<Vec<_>>(),
        "errors": schema.errors(),
    })
}

fn instruction_value(ix: &Instruction) -> Value {
    json!({
        "name": ix.name,
        "discriminator": ix.discriminator,
        "accounts": ix.accounts.iter().map(account_value).collect::<Vec<_>>(),
        "args": fields_value(&ix.args),
    })
}

fn account_value(account: &InstructionAccount) -> Value {
    let mut map = Map::new();
    match account {
        InstructionAccount::Group { name, accounts } => {
            map.insert("name".into(), name.clone().into());
            map.insert(
                "accounts".into(),
                accounts.iter().map(account_value).collect::<Vec<_>>().into(),
            );
        }
        InstructionAccount::Single(meta) => {
            map.insert("name".into(), meta.name.clone().into());
            if let Some(docs) = &meta.docs {
                map.insert("docs".into(), docs.clone());
            }
            // Flags are only written when set.
            for (key, set) in [
                ("writable", meta.writable),
                ("signer", meta.signer),
                ("optional", meta.optional),
            ] {
                if set {
                    map.insert(key.into(), Value::Bool(true));
                }
            }
            if let Some(address) = &meta.address {
                map.insert("address".into(), address.clone().into());
            }
            if let Some(pda) = &meta.pda {
                map.insert("pda".into(), pda.clone());
            }
            if let Some(relations) = &meta.relations {
                map.insert("relations".into(), relations.clone());
            }
        }
    }
    Value::Object(map)
}

fn item_value(item: &ItemDescriptor) -> Value {
    json!({
        "name": item.name,
        "discriminator": item.discriminator,
    })
}

fn type_def_value(def: &TypeDef) -> Value {
    let ty = match &def.kind {
        TypeDefKind::Struct(fields) => json!({
            "kind": "struct",
            "fields": fields_value(fields),
        }),
        TypeDefKind::Enum(variants) => json!({
            "kind": "enum",
            "variants": variants.iter().map(variant_value).collect::<Vec<_>>(),
        }),
        TypeDefKind::Alias(alias) => json!({
            "kind": "type",
            "alias": to_value(alias),
        }),
        TypeDefKind::Opaque(raw) => raw.clone(),
    };
    json!({ "name": def.name, "type": ty })
}

fn variant_value(variant: &VariantDef) -> Value {
    if variant.fields.is_empty() {
        json!({ "name": variant.name })
    } else {
        json!({ "name": variant.name, "fields": fields_value(&variant.fields) })
    }
}

fn fields_value(fields: &[Field]) -> Value {
    fields
        .iter()
        .map(|field| json!({ "name": field.name, "type": to_value(&field.ty) }))
        .collect::<Vec<_>>()
        .into()
}

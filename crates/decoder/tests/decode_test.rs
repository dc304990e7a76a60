// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end decoding: IDL document -> normalize -> register -> decode.

use ix_decoder::consts::DECODE_STACK_SIZE;
use ix_decoder::idl::{compute, normalize};
use ix_decoder::{DecodeError, DecodeLimits, DecodedValue, InstructionDecoder, SchemaRegistry};
use ix_decoder_config::MAX_DEPTH_LIMIT;
use num_bigint::BigInt;
use serde_json::{Value, json};

/// Borsh-style payload builder.
#[derive(Default)]
struct Payload(Vec<u8>);

impl Payload {
    fn instruction(name: &str) -> Self {
        Self::with_prefix("global", name)
    }

    fn with_prefix(namespace: &str, name: &str) -> Self {
        Self(compute(namespace, name).as_bytes().to_vec())
    }

    fn u8(mut self, value: u8) -> Self {
        self.0.push(value);
        self
    }

    fn u16(mut self, value: u16) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn i16(mut self, value: i16) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn f32(mut self, value: f32) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn f64(mut self, value: f64) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn u32(mut self, value: u32) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn u64(mut self, value: u64) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn i64(mut self, value: i64) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn i128(mut self, value: i128) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn u128(mut self, value: u128) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn string(self, value: &str) -> Self {
        self.u32(value.len() as u32).raw(value.as_bytes())
    }

    fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    fn build(self) -> Vec<u8> {
        self.0
    }
}

fn registry_of(documents: &[Value]) -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    for document in documents {
        registry.register(normalize(document).unwrap());
    }
    registry
}

fn token_idl() -> Value {
    json!({
        "version": "0.1.0",
        "name": "token",
        "instructions": [{
            "name": "transfer",
            "accounts": [
                { "name": "from", "isMut": true, "isSigner": true },
                { "name": "to", "isMut": true, "isSigner": false }
            ],
            "args": [
                { "name": "amount", "type": "u64" },
                { "name": "to", "type": "publicKey" }
            ]
        }]
    })
}

#[test]
fn test_decode_transfer() {
    let registry = registry_of(&[token_idl()]);
    let key = [7u8; 32];
    let data = Payload::instruction("transfer").u64(1000).raw(&key).build();

    let item = InstructionDecoder::new(&registry).decode(&data).unwrap();
    assert_eq!(item.program, "token");

    let expected = json!({
        "name": "transfer",
        "discriminator": compute("global", "transfer").to_string(),
        "fields": {
            "amount": { "type": "u64", "value": "1000" },
            "to": { "type": "pubkey", "value": bs58::encode(key).into_string() }
        }
    });
    assert_eq!(item.to_json(), expected);
}

#[test]
fn test_decode_transfer_truncated_key() {
    let registry = registry_of(&[token_idl()]);
    let data = Payload::instruction("transfer")
        .u64(1000)
        .raw(&[7u8; 31])
        .build();

    match InstructionDecoder::new(&registry).decode(&data) {
        Err(DecodeError::TruncatedInput {
            field,
            offset,
            needed,
            available,
        }) => {
            assert_eq!(field, "to");
            assert_eq!(offset, 16);
            assert_eq!(needed, 32);
            assert_eq!(available, 31);
        }
        other => panic!("expected truncation, got {other:?}"),
    }
}

#[test]
fn test_unknown_discriminator() {
    let registry = registry_of(&[token_idl()]);
    let data = Payload::instruction("mint").u64(1).build();

    let err = InstructionDecoder::new(&registry).decode(&data).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownDiscriminator { .. }));
    assert!(err.to_string().contains(&compute("global", "mint").to_string()));
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let registry = registry_of(&[token_idl()]);
    let data = Payload::instruction("transfer")
        .u64(5)
        .raw(&[1u8; 32])
        .raw(&[0xaa, 0xbb, 0xcc])
        .build();

    let item = InstructionDecoder::new(&registry).decode(&data).unwrap();
    assert_eq!(item.fields.len(), 2);
}

#[test]
fn test_camel_case_instruction_decodes_under_both_names() {
    let registry = registry_of(&[json!({
        "metadata": { "name": "yield" },
        "instructions": [{
            "name": "getAPYData",
            "accounts": [],
            "args": [{ "name": "epoch", "type": "u16" }]
        }]
    })]);
    let decoder = InstructionDecoder::new(&registry);

    let item = decoder
        .decode(&Payload::instruction("get_apy_data").u16(9).build())
        .unwrap();
    assert_eq!(item.name, "get_apy_data");
    assert_eq!(item.field("epoch").unwrap().value, DecodedValue::Int(9));

    let item = decoder
        .decode(&Payload::instruction("getAPYData").u16(9).build())
        .unwrap();
    assert_eq!(item.name, "getAPYData");
}

#[test]
fn test_wide_integers() {
    let registry = registry_of(&[json!({
        "metadata": { "name": "math" },
        "instructions": [{
            "name": "settle",
            "accounts": [],
            "args": [
                { "name": "delta", "type": "i128" },
                { "name": "floor", "type": "i128" },
                { "name": "cap", "type": "u128" },
                { "name": "fee", "type": "i64" }
            ]
        }]
    })]);
    let decoder = InstructionDecoder::new(&registry);

    let data = Payload::instruction("settle")
        .i128(-1)
        .i128(i128::MIN)
        .u128(u128::MAX)
        .i64(-42)
        .build();
    let item = decoder.decode(&data).unwrap();

    assert_eq!(item.field("delta").unwrap().value, DecodedValue::Wide(BigInt::from(-1)));
    assert_eq!(
        item.field("floor").unwrap().value.to_json(),
        json!("-170141183460469231731687303715884105728")
    );
    assert_eq!(
        item.field("cap").unwrap().value.to_json(),
        json!(u128::MAX.to_string())
    );
    assert_eq!(item.field("fee").unwrap().value.to_json(), json!("-42"));

    let data = Payload::instruction("settle")
        .i128(i128::MAX)
        .i128(0)
        .u128(0)
        .i64(0)
        .build();
    let item = decoder.decode(&data).unwrap();
    assert_eq!(
        item.field("delta").unwrap().value.to_json(),
        json!(i128::MAX.to_string())
    );
}

#[test]
fn test_floats_wide_words_and_bytes() {
    let registry = registry_of(&[json!({
        "metadata": { "name": "scalars" },
        "instructions": [{
            "name": "record",
            "accounts": [],
            "args": [
                { "name": "tilt", "type": "i16" },
                { "name": "ratio", "type": "f32" },
                { "name": "price", "type": "f64" },
                { "name": "supply", "type": "u256" },
                { "name": "debt", "type": "i256" },
                { "name": "floor", "type": "i256" },
                { "name": "blob", "type": "bytes" }
            ]
        }]
    })]);

    let mut floor = [0u8; 32];
    floor[31] = 0x80;
    let data = Payload::instruction("record")
        .i16(-300)
        .f32(0.1)
        .f64(-2.5)
        .raw(&[0xff; 32])
        .raw(&[0xff; 32])
        .raw(&floor)
        .u32(3)
        .raw(&[0xde, 0xad, 0x01])
        .build();

    let item = InstructionDecoder::new(&registry).decode(&data).unwrap();
    assert_eq!(item.field("tilt").unwrap().value, DecodedValue::Int(-300));
    assert_eq!(item.field("ratio").unwrap().value, DecodedValue::F32(0.1));
    assert_eq!(item.field("price").unwrap().value, DecodedValue::F64(-2.5));
    assert_eq!(item.field("debt").unwrap().value, DecodedValue::Wide(BigInt::from(-1)));
    assert_eq!(
        item.field("blob").unwrap().value,
        DecodedValue::Bytes(vec![0xde, 0xad, 0x01])
    );

    assert_eq!(
        item.to_json()["fields"],
        json!({
            "tilt": { "type": "i16", "value": -300 },
            "ratio": { "type": "f32", "value": 0.1 },
            "price": { "type": "f64", "value": -2.5 },
            "supply": {
                "type": "u256",
                "value": "115792089237316195423570985008687907853269984665640564039457584007913129639935"
            },
            "debt": { "type": "i256", "value": "-1" },
            "floor": {
                "type": "i256",
                "value": "-57896044618658097711785492504343953926634992332820282019728792003956564819968"
            },
            "blob": { "type": "bytes", "value": "0xdead01" }
        })
    );
}

#[test]
fn test_non_finite_floats_render_as_text() {
    let registry = registry_of(&[json!({
        "metadata": { "name": "scalars" },
        "instructions": [{
            "name": "measure",
            "accounts": [],
            "args": [
                { "name": "a", "type": "f64" },
                { "name": "b", "type": "f32" }
            ]
        }]
    })]);

    let data = Payload::instruction("measure")
        .f64(f64::NAN)
        .f32(f32::NEG_INFINITY)
        .build();
    let item = InstructionDecoder::new(&registry).decode(&data).unwrap();
    assert_eq!(item.to_json()["fields"]["a"]["value"], json!("NaN"));
    assert_eq!(item.to_json()["fields"]["b"]["value"], json!("-inf"));
}

fn exchange_idl() -> Value {
    json!({
        "address": "Exch1111111111111111111111111111111111111111",
        "metadata": { "name": "exchange", "version": "0.3.0", "spec": "0.1.0" },
        "instructions": [{
            "name": "place_order",
            "discriminator": compute("global", "place_order").as_bytes().to_vec(),
            "accounts": [],
            "args": [
                { "name": "order", "type": { "defined": { "name": "Order" } } },
                { "name": "tag", "type": { "array": ["u8", 4] } }
            ]
        }],
        "types": [
            {
                "name": "Order",
                "type": {
                    "kind": "struct",
                    "fields": [
                        { "name": "side", "type": { "defined": { "name": "Side" } } },
                        { "name": "legs", "type": { "vec": { "defined": { "name": "Leg" } } } },
                        { "name": "memo", "type": { "option": "string" } },
                        { "name": "expiry", "type": { "option": "i64" } }
                    ]
                }
            },
            {
                "name": "Leg",
                "type": {
                    "kind": "struct",
                    "fields": [
                        { "name": "market", "type": "u8" },
                        { "name": "amount", "type": "u64" }
                    ]
                }
            },
            {
                "name": "Side",
                "type": {
                    "kind": "enum",
                    "variants": [
                        { "name": "Buy" },
                        { "name": "Sell", "fields": [{ "name": "limit", "type": "u64" }] },
                        { "name": "Spread", "fields": ["u16", "u16"] }
                    ]
                }
            }
        ]
    })
}

#[test]
fn test_nested_struct_enum_list_option() {
    let registry = registry_of(&[exchange_idl()]);
    let data = Payload::instruction("place_order")
        .u8(1)
        .u64(250)
        .u32(2)
        .u8(3)
        .u64(10)
        .u8(4)
        .u64(20)
        .u8(1)
        .string("gm")
        .u8(0)
        .raw(&[1, 2, 3, 4])
        .build();

    let item = InstructionDecoder::new(&registry).decode(&data).unwrap();
    assert_eq!(item.field("order").unwrap().type_label, "Order");
    assert_eq!(item.field("tag").unwrap().type_label, "u8[4]");

    assert_eq!(
        item.to_json()["fields"],
        json!({
            "order": {
                "type": "Order",
                "value": {
                    "side": { "Sell": { "limit": "250" } },
                    "legs": [
                        { "market": 3, "amount": "10" },
                        { "market": 4, "amount": "20" }
                    ],
                    "memo": "gm",
                    "expiry": null
                }
            },
            "tag": { "type": "u8[4]", "value": [1, 2, 3, 4] }
        })
    );
}

#[test]
fn test_unit_and_tuple_variants() {
    let registry = registry_of(&[exchange_idl()]);
    let decoder = InstructionDecoder::new(&registry);

    let order = |side: Payload| side.u32(0).u8(0).u8(0).raw(&[0; 4]).build();

    let item = decoder
        .decode(&order(Payload::instruction("place_order").u8(0)))
        .unwrap();
    assert_eq!(item.to_json()["fields"]["order"]["value"]["side"], json!("Buy"));

    let item = decoder
        .decode(&order(Payload::instruction("place_order").u8(2).u16(5).u16(6)))
        .unwrap();
    assert_eq!(
        item.to_json()["fields"]["order"]["value"]["side"],
        json!({ "Spread": { "0": 5, "1": 6 } })
    );
}

#[test]
fn test_enum_tag_out_of_range() {
    let registry = registry_of(&[exchange_idl()]);
    let data = Payload::instruction("place_order").u8(3).build();

    match InstructionDecoder::new(&registry).decode(&data) {
        Err(DecodeError::MalformedValue { field, offset, .. }) => {
            assert_eq!(field, "order.side");
            assert_eq!(offset, 8);
        }
        other => panic!("expected malformed tag, got {other:?}"),
    }
}

#[test]
fn test_truncated_nested_path() {
    let registry = registry_of(&[exchange_idl()]);
    let data = Payload::instruction("place_order")
        .u8(0)
        .u32(3)
        .u8(1)
        .u64(1)
        .u8(2)
        .u64(2)
        .u8(3)
        .raw(&[0; 4])
        .build();

    match InstructionDecoder::new(&registry).decode(&data) {
        Err(DecodeError::TruncatedInput { field, .. }) => {
            assert_eq!(field, "order.legs[2].amount");
        }
        other => panic!("expected truncation, got {other:?}"),
    }
}

#[test]
fn test_sequence_length_guard() {
    let registry = registry_of(&[json!({
        "metadata": { "name": "blob" },
        "instructions": [{
            "name": "store",
            "accounts": [],
            "args": [{ "name": "chunks", "type": { "vec": "u8" } }]
        }]
    })]);

    let data = Payload::instruction("store").u32(u32::MAX).build();
    assert!(matches!(
        InstructionDecoder::new(&registry).decode(&data),
        Err(DecodeError::MalformedValue { .. })
    ));

    let limited = InstructionDecoder::new(&registry).with_limits(DecodeLimits {
        max_depth: 64,
        max_sequence_len: 4,
    });
    let data = Payload::instruction("store").u32(5).raw(&[0; 5]).build();
    assert!(matches!(
        limited.decode(&data),
        Err(DecodeError::MalformedValue { .. })
    ));

    let data = Payload::instruction("store").u32(4).raw(&[9; 2]).build();
    assert!(matches!(
        limited.decode(&data),
        Err(DecodeError::TruncatedInput { .. })
    ));
}

#[test]
fn test_depth_guard_on_recursive_type() {
    let registry = registry_of(&[json!({
        "metadata": { "name": "list" },
        "instructions": [{
            "name": "push",
            "accounts": [],
            "args": [{ "name": "head", "type": { "defined": "Node" } }]
        }],
        "types": [{
            "name": "Node",
            "type": {
                "kind": "struct",
                "fields": [
                    { "name": "value", "type": "u8" },
                    { "name": "next", "type": { "option": { "defined": "Node" } } }
                ]
            }
        }]
    })]);
    let decoder = InstructionDecoder::new(&registry).with_limits(DecodeLimits {
        max_depth: 3,
        max_sequence_len: 16,
    });

    // Three nodes fit.
    let data = Payload::instruction("push")
        .u8(1)
        .u8(1)
        .u8(2)
        .u8(1)
        .u8(3)
        .u8(0)
        .build();
    let item = decoder.decode(&data).unwrap();
    assert_eq!(
        item.to_json()["fields"]["head"]["value"],
        json!({ "value": 1, "next": { "value": 2, "next": { "value": 3, "next": null } } })
    );

    let data = Payload::instruction("push")
        .u8(1)
        .u8(1)
        .u8(2)
        .u8(1)
        .u8(3)
        .u8(1)
        .u8(4)
        .u8(0)
        .build();
    assert!(matches!(
        decoder.decode(&data),
        Err(DecodeError::MalformedValue { .. })
    ));
}

/// `nodes` chained `Node`s, the last one without a successor.
fn node_chain(nodes: usize) -> Vec<u8> {
    let mut payload = Payload::instruction("push");
    for index in 0..nodes {
        let has_next = index + 1 < nodes;
        payload = payload.u8(index as u8).u8(u8::from(has_next));
    }
    payload.build()
}

#[test]
fn test_depth_guard_at_configured_ceiling() {
    let registry = registry_of(&[json!({
        "metadata": { "name": "list" },
        "instructions": [{
            "name": "push",
            "accounts": [],
            "args": [{ "name": "head", "type": { "defined": "Node" } }]
        }],
        "types": [{
            "name": "Node",
            "type": {
                "kind": "struct",
                "fields": [
                    { "name": "value", "type": "u8" },
                    { "name": "next", "type": { "option": { "defined": "Node" } } }
                ]
            }
        }]
    })]);
    let decoder = InstructionDecoder::new(&registry).with_limits(DecodeLimits {
        max_depth: MAX_DEPTH_LIMIT,
        max_sequence_len: 16,
    });

    let (deepest, too_deep) = std::thread::scope(|scope| {
        std::thread::Builder::new()
            .stack_size(DECODE_STACK_SIZE)
            .spawn_scoped(scope, || {
                (
                    decoder.decode(&node_chain(MAX_DEPTH_LIMIT)),
                    decoder.decode(&node_chain(MAX_DEPTH_LIMIT + 1)),
                )
            })
            .unwrap()
            .join()
            .unwrap()
    });

    assert!(deepest.is_ok());
    assert!(matches!(too_deep, Err(DecodeError::MalformedValue { .. })));
}

#[test]
fn test_account_and_event_decoding() {
    let registry = registry_of(&[json!({
        "version": "0.1.0",
        "name": "vault",
        "instructions": [],
        "accounts": [{
            "name": "Vault",
            "type": {
                "kind": "struct",
                "fields": [
                    { "name": "owner", "type": "publicKey" },
                    { "name": "balance", "type": "u64" }
                ]
            }
        }],
        "events": [{
            "name": "Deposited",
            "fields": [
                { "name": "amount", "type": "u64", "index": false },
                { "name": "note", "type": "string", "index": false }
            ]
        }]
    })]);
    let decoder = InstructionDecoder::new(&registry);

    let owner = [3u8; 32];
    let data = Payload::with_prefix("account", "Vault")
        .raw(&owner)
        .u64(77)
        .build();
    let item = decoder.decode_account(&data).unwrap();
    assert_eq!(item.name, "Vault");
    assert_eq!(
        item.field("owner").unwrap().value,
        DecodedValue::Address(owner)
    );

    let data = Payload::with_prefix("event", "Deposited")
        .u64(5)
        .string("thanks")
        .build();
    let item = decoder.decode_event(&data).unwrap();
    assert_eq!(item.name, "Deposited");
    assert_eq!(
        item.to_json()["fields"]["note"],
        json!({ "type": "string", "value": "thanks" })
    );

    // Account data is not an instruction.
    let data = Payload::with_prefix("account", "Vault")
        .raw(&owner)
        .u64(77)
        .build();
    assert!(matches!(
        decoder.decode(&data),
        Err(DecodeError::UnknownDiscriminator { .. })
    ));
}

#[test]
fn test_registry_picks_owning_program() {
    let registry = registry_of(&[token_idl(), exchange_idl()]);
    let data = Payload::instruction("place_order")
        .u8(0)
        .u32(0)
        .u8(0)
        .u8(0)
        .raw(&[0; 4])
        .build();

    let item = InstructionDecoder::new(&registry).decode(&data).unwrap();
    assert_eq!(item.program, "exchange");
}

#[test]
fn test_strict_registry_reports_shared_discriminator() {
    let mut registry = SchemaRegistry::strict();
    registry.register(normalize(&token_idl()).unwrap());
    let mut fork = token_idl();
    fork["name"] = json!("token_fork");
    registry.register(normalize(&fork).unwrap());

    let data = Payload::instruction("transfer").u64(1).raw(&[0; 32]).build();
    match InstructionDecoder::new(&registry).decode(&data) {
        Err(DecodeError::AmbiguousDiscriminator { schemas, .. }) => {
            assert_eq!(schemas, vec!["token".to_string(), "token_fork".to_string()]);
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }

    let mut permissive = SchemaRegistry::new();
    permissive.register(normalize(&token_idl()).unwrap());
    permissive.register(normalize(&fork).unwrap());
    let item = InstructionDecoder::new(&permissive).decode(&data).unwrap();
    assert_eq!(item.program, "token");
}

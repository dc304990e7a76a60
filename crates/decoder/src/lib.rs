// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Schema-driven decoder for Anchor program instruction, account and event
//! data.
//!
//! IDL documents of any supported layout are normalized into a [`Schema`],
//! registered in a [`SchemaRegistry`] and used by an [`InstructionDecoder`]
//! to turn raw payload bytes into a labelled value tree.
//!
//! ```no_run
//! use ix_decoder::{InstructionDecoder, SchemaRegistry, idl};
//!
//! let schema = idl::load_schema("program.json", None)?;
//! let mut registry = SchemaRegistry::new();
//! registry.register(schema);
//!
//! let data = ix_decoder::input::decode_input("0x...", Default::default())?;
//! let item = InstructionDecoder::new(&registry).decode(&data)?;
//! println!("{}", item.to_json());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod consts;
pub mod decode;
pub mod idl;
pub mod input;
pub mod logging;
pub mod registry;
pub mod types;

pub use decode::{DecodeError, DecodeLimits, DecodedItem, DecodedValue, InstructionDecoder};
pub use registry::SchemaRegistry;
pub use types::Schema;

// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Payload decoding against registered schemas.

pub mod error;
pub mod instruction;
pub mod numeric;
pub mod reader;
pub mod value;

pub use error::DecodeError;
pub use instruction::{DecodeLimits, InstructionDecoder};
pub use reader::ByteReader;
pub use value::{DecodedField, DecodedItem, DecodedValue};

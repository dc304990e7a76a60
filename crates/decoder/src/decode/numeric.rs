// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Little-endian integers wider than 64 bits.
//!
//! Values are accumulated into an unbounded `BigInt` so the same routine
//! serves 128- and 256-bit widths.

use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Unsigned little-endian integer of any width.
pub fn unsigned_le(bytes: &[u8]) -> BigInt {
    let mut value = BigInt::zero();
    for (i, byte) in bytes.iter().enumerate() {
        value += BigInt::from(*byte) << (8 * i);
    }
    value
}

/// Two's-complement little-endian integer of any width: when the top bit of
/// the most significant byte is set, `2^(8 * len)` is subtracted.
pub fn signed_le(bytes: &[u8]) -> BigInt {
    let mut value = unsigned_le(bytes);
    if bytes.last().is_some_and(|msb| msb & 0x80 != 0) {
        value -= BigInt::one() << (8 * bytes.len());
    }
    value
}

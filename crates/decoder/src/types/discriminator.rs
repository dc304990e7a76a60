// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length in bytes of every discriminator.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Leading bytes that identify which schema item produced a payload.
///
/// Serializes as an array of numbers, the form IDL documents use. `Display`
/// renders `0x`-prefixed lowercase hex for logs and decoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Discriminator(pub [u8; DISCRIMINATOR_LEN]);

impl Discriminator {
    /// Take the first eight bytes of `data`, or `None` if it is shorter.
    pub fn from_prefix(data: &[u8]) -> Option<Self> {
        let bytes: [u8; DISCRIMINATOR_LEN] = data.get(..DISCRIMINATOR_LEN)?.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; DISCRIMINATOR_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Discriminator {
    type Error = usize;

    /// Fails with the actual length when `bytes` is not exactly eight long.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; DISCRIMINATOR_LEN] = bytes.try_into().map_err(|_| bytes.len())?;
        Ok(Self(array))
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

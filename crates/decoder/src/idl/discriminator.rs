// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::types::{DISCRIMINATOR_LEN, Discriminator, ItemKind};

/// First eight bytes of `sha256("<namespace>:<name>")`.
pub fn compute(namespace: &str, name: &str) -> Discriminator {
    let preimage = format!("{}:{}", namespace, name);
    let hash = sp_crypto_hashing::sha2_256(preimage.as_bytes());

    let mut bytes = [0u8; DISCRIMINATOR_LEN];
    bytes.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    Discriminator(bytes)
}

/// `compute` in the namespace belonging to `kind`.
pub fn compute_for(kind: ItemKind, name: &str) -> Discriminator {
    compute(kind.namespace(), name)
}

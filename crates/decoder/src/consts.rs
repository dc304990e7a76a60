// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

/// Discriminator namespace for instructions
pub const NAMESPACE_GLOBAL: &str = "global";
/// Discriminator namespace for accounts
pub const NAMESPACE_ACCOUNT: &str = "account";
/// Discriminator namespace for events
pub const NAMESPACE_EVENT: &str = "event";

/// Canonical scalar name for 32-byte public keys
pub const PUBKEY: &str = "pubkey";

/// Field name given to a lone unnamed enum payload
pub const UNNAMED_FIELD: &str = "value";

/// Metadata fallbacks for documents that do not say
pub const UNKNOWN_NAME: &str = "unknown";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_SPEC: &str = "0.1.0";

/// Byte width of a public key on the wire
pub const PUBKEY_LEN: usize = 32;

/// Default bound on named-type nesting followed by the decoder
pub const DEFAULT_MAX_DEPTH: usize = 64;
/// Stack reserved for the thread that walks payloads; covers the deepest
/// named-type nesting the configuration accepts, in debug builds too.
pub const DECODE_STACK_SIZE: usize = 64 * 1024 * 1024;
/// Default bound on element counts read from a length prefix
pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 1 << 20;

// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Turning textual payloads (hex, base58, base64) into bytes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref HEX: Regex = Regex::new(r"^[0-9a-fA-F]+$").expect("Failed to compile hex regex");
    static ref BASE58: Regex = Regex::new(r"^[1-9A-HJ-NP-Za-km-z]+$").expect("Failed to compile base58 regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    #[default]
    Auto,
    Hex,
    Base58,
    Base64,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Input is empty")]
    Empty,

    #[error("Invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Invalid base58 input: {0}")]
    InvalidBase58(#[from] bs58::decode::Error),

    #[error("Invalid base64 input: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Decode `input` as `format`, or sniff the encoding when `format` is `Auto`.
pub fn decode_input(input: &str, format: InputFormat) -> Result<Vec<u8>, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(InputError::Empty);
    }

    let format = match format {
        InputFormat::Auto => detect_format(input),
        forced => forced,
    };

    let bytes = match format {
        InputFormat::Hex => hex::decode(strip_0x(input))?,
        InputFormat::Base58 => bs58::decode(strip_0x(input)).into_vec()?,
        InputFormat::Base64 | InputFormat::Auto => STANDARD.decode(input)?,
    };

    if bytes.is_empty() {
        return Err(InputError::Empty);
    }
    tracing::debug!(?format, len = bytes.len(), "Decoded input");
    Ok(bytes)
}

/// Guess the encoding of trimmed, non-empty `input`.
///
/// A `0x` prefix means hex when the rest is hex, base58 when the rest only
/// uses the base58 alphabet and base64 otherwise. Without a prefix, text made
/// only of base58 characters is base58 and anything else base64.
pub fn detect_format(input: &str) -> InputFormat {
    match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(rest) if HEX.is_match(rest) => InputFormat::Hex,
        Some(rest) if BASE58.is_match(rest) => InputFormat::Base58,
        Some(_) => InputFormat::Base64,
        None if BASE58.is_match(input) => InputFormat::Base58,
        None => InputFormat::Base64,
    }
}

fn strip_0x(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::DecodeError;

/// Forward-only cursor over a payload. Offsets are absolute positions in the
/// original buffer so errors point at the failing byte.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Start reading at `offset`, clamped to the buffer length.
    pub fn at(data: &'a [u8], offset: usize) -> Self {
        Self {
            data,
            offset: offset.min(data.len()),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Consume exactly `len` bytes on behalf of `field`.
    pub fn take(&mut self, len: usize, field: &str) -> Result<&'a [u8], DecodeError> {
        let available = self.remaining();
        if len > available {
            return Err(DecodeError::TruncatedInput {
                field: field.to_string(),
                offset: self.offset,
                needed: len,
                available,
            });
        }

        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub fn take_array<const N: usize>(&mut self, field: &str) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    pub fn read_u8(&mut self, field: &str) -> Result<u8, DecodeError> {
        Ok(self.take_array::<1>(field)?[0])
    }

    /// Little-endian u32, the length prefix of `vec`, `string` and `bytes`.
    pub fn read_u32(&mut self, field: &str) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.take_array(field)?))
    }
}

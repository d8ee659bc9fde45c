//! Big-endian length prefixes, the building block of every TLS vector.

use crate::error::{DecodeError, EncodeError};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixWidth {
    U8,
    U16,
    U24,
}

impl PrefixWidth {
    pub const fn bytes(self) -> usize {
        match self {
            PrefixWidth::U8 => 1,
            PrefixWidth::U16 => 2,
            PrefixWidth::U24 => 3,
        }
    }

    /// Largest payload length the prefix can carry.
    pub const fn max_len(self) -> usize {
        (1 << (8 * self.bytes())) - 1
    }
}

impl fmt::Display for PrefixWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrefixWidth::U8 => "u8",
            PrefixWidth::U16 => "u16",
            PrefixWidth::U24 => "u24",
        };
        f.write_str(s)
    }
}

/// Appends `prefix(len) || payload` to `buf`. Leaves `buf` untouched on error.
pub fn put_prefixed(
    buf: &mut BytesMut,
    width: PrefixWidth,
    payload: &[u8],
) -> Result<(), EncodeError> {
    let len = payload.len();
    let max = width.max_len();
    if len > max {
        return Err(EncodeError::Length { width, len, max });
    }

    buf.reserve(width.bytes() + len);
    buf.put_uint(len as u64, width.bytes());
    buf.put_slice(payload);
    Ok(())
}

pub fn encode_prefixed(width: PrefixWidth, payload: &[u8]) -> Result<Bytes, EncodeError> {
    let mut buf = BytesMut::with_capacity(width.bytes() + payload.len());
    put_prefixed(&mut buf, width, payload)?;
    Ok(buf.freeze())
}

pub fn u8_prefix(payload: &[u8]) -> Result<Bytes, EncodeError> {
    encode_prefixed(PrefixWidth::U8, payload)
}

pub fn u16_prefix(payload: &[u8]) -> Result<Bytes, EncodeError> {
    encode_prefixed(PrefixWidth::U16, payload)
}

pub fn u24_prefix(payload: &[u8]) -> Result<Bytes, EncodeError> {
    encode_prefixed(PrefixWidth::U24, payload)
}

/// Reads one prefixed vector off the front of `input`, returning `(payload, rest)`.
pub fn split_prefixed(width: PrefixWidth, input: &[u8]) -> Result<(&[u8], &[u8]), DecodeError> {
    let needed = width.bytes();
    if input.len() < needed {
        return Err(DecodeError::TruncatedPrefix {
            width,
            needed,
            available: input.len(),
        });
    }

    let mut header = &input[..needed];
    let declared = header.get_uint(needed) as usize;
    let body = &input[needed..];
    if body.len() < declared {
        return Err(DecodeError::TruncatedPayload {
            declared,
            available: body.len(),
        });
    }
    Ok(body.split_at(declared))
}

/// Decodes an input that must be exactly one prefixed vector. Returns `(declared_len, payload)`.
pub fn decode_prefixed(width: PrefixWidth, input: &[u8]) -> Result<(usize, &[u8]), DecodeError> {
    let (payload, rest) = split_prefixed(width, input)?;
    if !rest.is_empty() {
        return Err(DecodeError::TrailingBytes(rest.len()));
    }
    Ok((payload.len(), payload))
}

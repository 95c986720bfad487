//! Length-tiered byte strings.
//!
//! | Length             | Tag    | Header                              |
//! |--------------------|--------|-------------------------------------|
//! | `< 32`             | fixstr | `0b101` + 5-bit length              |
//! | `< 256`            | str8   | tag + 1-byte length                 |
//! | `< 65536`          | str16  | tag + 2-byte length, low byte first |
//! | `<= 2^32 - 1`      | str32  | tag + 4-byte big-endian length      |
//!
//! The `str16` length is the one little-endian header on the wire. Decoders
//! of this format read it the same way, so it is kept as is.

use bytestream::{ByteReader, ByteWriter};

use crate::error::{LimitKind, WireError, WireResult};
use crate::limits::Limits;
use crate::tag::{self, Tag};

/// Encodes `bytes` with the narrowest string tag.
///
/// Fails with [`WireError::LimitsExceeded`] without writing anything when the
/// string is longer than the limits or the wire allow.
#[allow(clippy::cast_possible_truncation)]
pub fn encode_str(bytes: &[u8], limits: &Limits, out: &mut ByteWriter) -> WireResult<()> {
    let len = bytes.len() as u64;
    let limit = limits.string_limit();
    if len > limit {
        return Err(WireError::LimitsExceeded {
            kind: LimitKind::StringLength,
            limit,
            actual: len,
        });
    }

    match len {
        0..=31 => out.write_u8(tag::FIXSTR | len as u8),
        32..=255 => {
            out.write_u8(tag::STR8);
            out.write_u8(len as u8);
        }
        256..=65_535 => {
            out.write_u8(tag::STR16);
            out.write_u16_le(len as u16);
        }
        _ => {
            out.write_u8(tag::STR32);
            out.write_u32_be(len as u32);
        }
    }
    out.write_bytes(bytes);
    Ok(())
}

/// Writes the zero-length string used in place of an oversized one.
pub fn encode_empty_str(out: &mut ByteWriter) {
    out.write_u8(tag::FIXSTR);
}

/// Decodes the header and payload of a string tag already read from `reader`.
///
/// The payload is borrowed from the underlying buffer.
pub fn decode_str<'a>(
    tag: Tag,
    reader: &mut ByteReader<'a>,
    limits: &Limits,
) -> WireResult<&'a [u8]> {
    let len = match tag {
        Tag::FixStr(len) => u64::from(len),
        Tag::Str8 => u64::from(reader.read_u8()?),
        Tag::Str16 => u64::from(reader.read_u16_le()?),
        Tag::Str32 => u64::from(reader.read_u32_be()?),
        other => {
            return Err(WireError::MalformedTag {
                tag: other.to_byte(),
                offset: reader.position().saturating_sub(1),
            })
        }
    };

    let limit = limits.string_limit();
    if len > limit {
        return Err(WireError::LimitsExceeded {
            kind: LimitKind::StringLength,
            limit,
            actual: len,
        });
    }
    let len = usize::try_from(len).unwrap_or(usize::MAX);
    Ok(reader.read_slice(len)?)
}

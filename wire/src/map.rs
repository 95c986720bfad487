//! Map headers.
//!
//! | Count           | Tag    | Header                        |
//! |-----------------|--------|-------------------------------|
//! | `< 15`          | fixmap | `0b1000` + 4-bit count        |
//! | `< 65536`       | map16  | tag + 2-byte big-endian count |
//! | `<= 2^32 - 1`   | map32  | tag + 4-byte big-endian count |
//!
//! A count of 15 is never written as a fixmap, but `0x8f` still decodes.

use bytestream::{ByteReader, ByteWriter};

use crate::error::{LimitKind, WireError, WireResult};
use crate::limits::Limits;
use crate::tag::{self, Tag};

/// Smallest encoding of one key/value pair (two single-byte items).
const MIN_PAIR_BYTES: usize = 2;

/// Encodes a map header for `count` pairs.
///
/// Fails with [`WireError::LimitsExceeded`] without writing anything when the
/// count is above the limits or the wire ceiling.
#[allow(clippy::cast_possible_truncation)]
pub fn encode_map_header(count: u64, limits: &Limits, out: &mut ByteWriter) -> WireResult<()> {
    let limit = limits.map_limit();
    if count > limit {
        return Err(WireError::LimitsExceeded {
            kind: LimitKind::MapEntries,
            limit,
            actual: count,
        });
    }

    match count {
        0..=14 => out.write_u8(tag::FIXMAP | count as u8),
        15..=65_535 => {
            out.write_u8(tag::MAP16);
            out.write_u16_be(count as u16);
        }
        _ => {
            out.write_u8(tag::MAP32);
            out.write_u32_be(count as u32);
        }
    }
    Ok(())
}

/// Decodes the pair count of a map tag already read from `reader`.
///
/// A count whose pairs cannot fit in the remaining bytes is rejected as
/// truncated before the caller allocates for it.
pub fn decode_map_len(tag: Tag, reader: &mut ByteReader<'_>, limits: &Limits) -> WireResult<usize> {
    let count = match tag {
        Tag::FixMap(count) => u64::from(count),
        Tag::Map16 => u64::from(reader.read_u16_be()?),
        Tag::Map32 => u64::from(reader.read_u32_be()?),
        other => {
            return Err(WireError::MalformedTag {
                tag: other.to_byte(),
                offset: reader.position().saturating_sub(1),
            })
        }
    };

    let limit = limits.map_limit();
    if count > limit {
        return Err(WireError::LimitsExceeded {
            kind: LimitKind::MapEntries,
            limit,
            actual: count,
        });
    }

    let count = usize::try_from(count).unwrap_or(usize::MAX);
    let needed = count.saturating_mul(MIN_PAIR_BYTES);
    if needed > reader.remaining() {
        return Err(WireError::Truncated {
            offset: reader.position(),
            needed,
            available: reader.remaining(),
        });
    }
    Ok(count)
}

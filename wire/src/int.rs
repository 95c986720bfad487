//! Variable-width integer encoding.
//!
//! The encoder picks the narrowest family whose range holds the value:
//!
//! | Range                 | Family          | Bytes |
//! |-----------------------|-----------------|-------|
//! | `-32 ..= 127`         | fixint          | 1     |
//! | `-128 ..= -33`        | int8            | 2     |
//! | `-32768 ..= -129`     | int16           | 3     |
//! | `-2^31 ..= -32769`    | int32           | 5     |
//! | `128 ..= 255`         | uint8           | 2     |
//! | `256 ..= 65535`       | uint16          | 3     |
//! | `65536 ..= 2^32 - 1`  | uint32          | 5     |
//! | anything else         | int64 / uint64  | 9     |
//!
//! All multi-byte payloads are big-endian; signed payloads are two's complement.

use bytestream::{ByteReader, ByteWriter};

use crate::error::{WireError, WireResult};
use crate::tag::{self, Tag};

/// A decoded integer.
///
/// Values that fit `i64` always decode as [`WireInt::Int`]; only `uint64`
/// payloads above `i64::MAX` decode as [`WireInt::UInt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireInt {
    Int(i64),
    UInt(u64),
}

/// Encodes a signed integer with the narrowest tag.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn encode_int(value: i64, out: &mut ByteWriter) {
    match value {
        -32..=127 => out.write_u8(value as u8),
        -128..=-33 => {
            out.write_u8(tag::INT8);
            out.write_u8(value as u8);
        }
        -32_768..=-129 => {
            out.write_u8(tag::INT16);
            out.write_bytes(&(value as i16).to_be_bytes());
        }
        -2_147_483_648..=-32_769 => {
            out.write_u8(tag::INT32);
            out.write_bytes(&(value as i32).to_be_bytes());
        }
        128..=255 => {
            out.write_u8(tag::UINT8);
            out.write_u8(value as u8);
        }
        256..=65_535 => {
            out.write_u8(tag::UINT16);
            out.write_u16_be(value as u16);
        }
        65_536..=4_294_967_295 => {
            out.write_u8(tag::UINT32);
            out.write_u32_be(value as u32);
        }
        _ if value < 0 => {
            out.write_u8(tag::INT64);
            out.write_bytes(&value.to_be_bytes());
        }
        _ => {
            out.write_u8(tag::UINT64);
            out.write_u64_be(value as u64);
        }
    }
}

/// Encodes an unsigned integer with the narrowest tag.
pub fn encode_uint(value: u64, out: &mut ByteWriter) {
    match i64::try_from(value) {
        Ok(signed) => encode_int(signed, out),
        Err(_) => {
            out.write_u8(tag::UINT64);
            out.write_u64_be(value);
        }
    }
}

/// Decodes the payload of an integer tag already read from `reader`.
///
/// Fixint tags carry their value in the tag byte and consume nothing more.
pub fn decode_int(tag: Tag, reader: &mut ByteReader<'_>) -> WireResult<WireInt> {
    let value = match tag {
        Tag::PositiveFixint(value) => i64::from(value),
        Tag::NegativeFixint(value) => i64::from(value),
        Tag::UInt8 => i64::from(reader.read_u8()?),
        Tag::UInt16 => i64::from(reader.read_u16_be()?),
        Tag::UInt32 => i64::from(reader.read_u32_be()?),
        Tag::UInt64 => {
            let value = reader.read_u64_be()?;
            return Ok(i64::try_from(value).map_or(WireInt::UInt(value), WireInt::Int));
        }
        Tag::Int8 => i64::from(i8::from_be_bytes(reader.read_array()?)),
        Tag::Int16 => i64::from(i16::from_be_bytes(reader.read_array()?)),
        Tag::Int32 => i64::from(i32::from_be_bytes(reader.read_array()?)),
        Tag::Int64 => i64::from_be_bytes(reader.read_array()?),
        other => {
            return Err(WireError::MalformedTag {
                tag: other.to_byte(),
                offset: reader.position().saturating_sub(1),
            })
        }
    };
    Ok(WireInt::Int(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::read_tag;

    fn encoded(value: i64) -> Vec<u8> {
        let mut out = ByteWriter::new();
        encode_int(value, &mut out);
        out.finish()
    }

    fn decoded(bytes: &[u8]) -> WireInt {
        let mut reader = ByteReader::new(bytes);
        let tag = read_tag(&mut reader).unwrap();
        let value = decode_int(tag, &mut reader).unwrap();
        assert!(reader.is_empty(), "trailing bytes after {bytes:02x?}");
        value
    }

    #[test]
    fn fixint_range() {
        assert_eq!(encoded(0), vec![0x00]);
        assert_eq!(encoded(127), vec![0x7f]);
        assert_eq!(encoded(-1), vec![0xff]);
        assert_eq!(encoded(-32), vec![0xe0]);
    }

    #[test]
    fn boundaries_switch_family() {
        assert_eq!(encoded(-33), vec![tag::INT8, 0xdf]);
        assert_eq!(encoded(128), vec![tag::UINT8, 0x80]);
        assert_eq!(encoded(255), vec![tag::UINT8, 0xff]);
        assert_eq!(encoded(256), vec![tag::UINT16, 0x01, 0x00]);
        assert_eq!(encoded(65_535), vec![tag::UINT16, 0xff, 0xff]);
        assert_eq!(encoded(65_536), vec![tag::UINT32, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(encoded(-128), vec![tag::INT8, 0x80]);
        assert_eq!(encoded(-129), vec![tag::INT16, 0xff, 0x7f]);
        assert_eq!(encoded(-32_768), vec![tag::INT16, 0x80, 0x00]);
        assert_eq!(encoded(-32_769), vec![tag::INT32, 0xff, 0xff, 0x7f, 0xff]);
    }

    #[test]
    fn sixty_four_bit_path() {
        let max_u32 = i64::from(u32::MAX);
        assert_eq!(encoded(max_u32)[0], tag::UINT32);
        assert_eq!(
            encoded(max_u32 + 1),
            vec![tag::UINT64, 0, 0, 0, 1, 0, 0, 0, 0]
        );
        assert_eq!(encoded(i64::from(i32::MIN))[0], tag::INT32);
        assert_eq!(
            encoded(i64::from(i32::MIN) - 1),
            vec![tag::INT64, 0xff, 0xff, 0xff, 0xff, 0x7f, 0xff, 0xff, 0xff]
        );
        assert_eq!(
            encoded(i64::MIN),
            vec![tag::INT64, 0x80, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn unsigned_above_signed_range() {
        let mut out = ByteWriter::new();
        encode_uint(u64::MAX, &mut out);
        let bytes = out.finish();
        assert_eq!(bytes, vec![tag::UINT64, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
        assert_eq!(decoded(&bytes), WireInt::UInt(u64::MAX));

        let mut out = ByteWriter::new();
        encode_uint(200, &mut out);
        assert_eq!(out.finish(), vec![tag::UINT8, 200]);
    }

    #[test]
    fn decode_matches_encode_at_edges() {
        for value in [
            0,
            1,
            -1,
            -32,
            -33,
            127,
            128,
            255,
            256,
            65_535,
            65_536,
            -128,
            -129,
            -32_768,
            -32_769,
            i64::from(i32::MIN),
            i64::from(i32::MIN) - 1,
            i64::from(u32::MAX),
            i64::from(u32::MAX) + 1,
            i64::MAX,
            i64::MIN,
        ] {
            assert_eq!(decoded(&encoded(value)), WireInt::Int(value), "value {value}");
        }
    }

    #[test]
    fn decode_non_canonical_widths() {
        // A wide tag for a small value still decodes to the value.
        assert_eq!(decoded(&[tag::INT32, 0xff, 0xff, 0xff, 0xff]), WireInt::Int(-1));
        assert_eq!(decoded(&[tag::UINT64, 0, 0, 0, 0, 0, 0, 0, 5]), WireInt::Int(5));
        assert_eq!(decoded(&[tag::INT16, 0x00, 0x05]), WireInt::Int(5));
    }

    #[test]
    fn decode_truncated_payload() {
        let mut reader = ByteReader::new(&[tag::UINT32, 0x00, 0x01]);
        let tag = read_tag(&mut reader).unwrap();
        assert!(decode_int(tag, &mut reader).unwrap_err().is_truncated());
    }

    #[test]
    fn decode_rejects_non_integer_tag() {
        let mut reader = ByteReader::new(&[tag::NIL]);
        let tag = read_tag(&mut reader).unwrap();
        assert_eq!(
            decode_int(tag, &mut reader).unwrap_err(),
            WireError::MalformedTag {
                tag: tag::NIL,
                offset: 0
            }
        );
    }
}

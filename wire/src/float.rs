//! 64-bit float encoding.
//!
//! Doubles are always written as a `float64` tag and eight bytes, most
//! significant byte first. Single precision is never emitted.

use bytestream::{ByteReader, ByteWriter};

use crate::error::WireResult;
use crate::tag;

/// Encodes a double with its tag.
pub fn encode_f64(value: f64, out: &mut ByteWriter) {
    out.write_u8(tag::FLOAT64);
    out.write_bytes(&value.to_be_bytes());
}

/// Decodes the eight payload bytes following a `float64` tag.
pub fn decode_f64(reader: &mut ByteReader<'_>) -> WireResult<f64> {
    Ok(f64::from_be_bytes(reader.read_array()?))
}

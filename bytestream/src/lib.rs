//! Byte-level cursor and writer primitives for the tagpack codec.
//!
//! This crate provides [`ByteWriter`] and [`ByteReader`] for byte-oriented encoding
//! and decoding. It is designed for bounded, panic-free operation with explicit
//! error handling.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked against the buffer.
//! - **No format knowledge** - This crate knows nothing about tags, strings or maps.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_u8(0xcd);
//! writer.write_u16_be(0x1234);
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_u8().unwrap(), 0xcd);
//! assert_eq!(reader.read_u16_be().unwrap(), 0x1234);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roundtrip() {
        let writer = ByteWriter::new();
        let bytes = writer.finish();
        assert!(bytes.is_empty());

        let reader = ByteReader::new(&bytes);
        assert!(reader.is_empty());
    }

    #[test]
    fn mixed_widths_roundtrip() {
        let mut writer = ByteWriter::new();
        writer.write_u8(0xa3);
        writer.write_u16_be(0xBEEF);
        writer.write_u16_le(0x0102);
        writer.write_u32_be(0xDEAD_BEEF);
        writer.write_u64_be(u64::MAX - 1);
        writer.write_bytes(b"abc");
        let bytes = writer.finish();

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u8().unwrap(), 0xa3);
        assert_eq!(reader.read_u16_be().unwrap(), 0xBEEF);
        assert_eq!(reader.read_u16_le().unwrap(), 0x0102);
        assert_eq!(reader.read_u32_be().unwrap(), 0xDEAD_BEEF);
        assert_eq!(reader.read_u64_be().unwrap(), u64::MAX - 1);
        assert_eq!(reader.read_slice(3).unwrap(), b"abc");
        assert!(reader.is_empty());
    }

    #[test]
    fn doctest_example() {
        let mut writer = ByteWriter::new();
        writer.write_u8(0xcd);
        writer.write_u16_be(0x1234);

        let bytes = writer.finish();
        assert_eq!(bytes, vec![0xcd, 0x12, 0x34]);

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u8().unwrap(), 0xcd);
        assert_eq!(reader.read_u16_be().unwrap(), 0x1234);
    }
}

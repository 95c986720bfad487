//! Byte-level reader with bounded operations.

use crate::error::{ByteError, ByteResult};

/// A byte cursor for decoding binary data.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input. A failed read leaves the
/// cursor where it was.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` positioned at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a new `ByteReader` positioned at `offset`.
    ///
    /// An offset past the end is clamped to the buffer length.
    #[must_use]
    pub fn at(data: &'a [u8], offset: usize) -> Self {
        Self {
            data,
            pos: offset.min(data.len()),
        }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the whole underlying buffer.
    #[must_use]
    pub const fn buffer(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> ByteResult<u8> {
        self.ensure_bytes(1)?;
        Ok(self.data[self.pos])
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> ByteResult<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Reads a big-endian `u16`.
    pub fn read_u16_be(&mut self) -> ByteResult<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16_le(&mut self) -> ByteResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Reads a big-endian `u32`.
    pub fn read_u32_be(&mut self) -> ByteResult<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Reads a big-endian `u64`.
    pub fn read_u64_be(&mut self) -> ByteResult<u64> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> ByteResult<[u8; N]> {
        let slice = self.read_slice(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Reads `len` bytes as a borrowed slice of the underlying buffer.
    pub fn read_slice(&mut self, len: usize) -> ByteResult<&'a [u8]> {
        self.ensure_bytes(len)?;
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Skips `len` bytes.
    pub fn skip(&mut self, len: usize) -> ByteResult<()> {
        self.read_slice(len).map(|_| ())
    }

    fn ensure_bytes(&self, len: usize) -> ByteResult<()> {
        let available = self.remaining();
        if len > available {
            return Err(ByteError::UnexpectedEof {
                offset: self.pos,
                requested: len,
                available,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reader() {
        let reader = ByteReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut reader = ByteReader::new(&[]);
        let result = reader.read_u8();
        assert!(matches!(
            result,
            Err(ByteError::UnexpectedEof {
                offset: 0,
                requested: 1,
                available: 0
            })
        ));
    }

    #[test]
    fn read_u32_be() {
        let mut reader = ByteReader::new(&[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(reader.read_u32_be().unwrap(), 0x1234_5678);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_u16_le_swaps() {
        let mut reader = ByteReader::new(&[0x00, 0x01]);
        assert_eq!(reader.read_u16_le().unwrap(), 0x0100);
    }

    #[test]
    fn failed_read_keeps_position() {
        let mut reader = ByteReader::new(&[0x01, 0x02, 0x03]);
        reader.read_u8().unwrap();
        let err = reader.read_u32_be().unwrap_err();
        assert_eq!(
            err,
            ByteError::UnexpectedEof {
                offset: 1,
                requested: 4,
                available: 2
            }
        );
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_u16_be().unwrap(), 0x0203);
    }

    #[test]
    fn peek_does_not_advance() {
        let reader = ByteReader::new(&[0xc0]);
        assert_eq!(reader.peek_u8().unwrap(), 0xc0);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn at_clamps_offset() {
        let data = [1u8, 2, 3];
        let reader = ByteReader::at(&data, 10);
        assert_eq!(reader.position(), 3);
        assert!(reader.is_empty());

        let mut reader = ByteReader::at(&data, 1);
        assert_eq!(reader.read_u8().unwrap(), 2);
    }

    #[test]
    fn read_slice_borrows_buffer() {
        let data = [0xa3, b'a', b'b', b'c'];
        let mut reader = ByteReader::new(&data);
        reader.skip(1).unwrap();
        let slice = reader.read_slice(3).unwrap();
        assert_eq!(slice, b"abc");
        assert_eq!(reader.buffer().len(), 4);
    }
}

//! Leading tag bytes.
//!
//! ```text
//! 0x00-0x7f  positive fixint      0xcb        float64
//! 0x80-0x8f  fixmap               0xcc-0xcf   uint8/16/32/64
//! 0x90-0x9f  reserved (arrays)    0xd0-0xd3   int8/16/32/64
//! 0xa0-0xbf  fixstr               0xd9-0xdb   str8/16/32
//! 0xc0       null                 0xde-0xdf   map16/32
//! 0xc2/0xc3  false/true           0xe0-0xff   negative fixint
//! ```
//!
//! Every other byte is malformed input.

use bytestream::ByteReader;

use crate::error::{WireError, WireResult};

pub const FIXMAP: u8 = 0x80;
pub const FIXSTR: u8 = 0xa0;
pub const NIL: u8 = 0xc0;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;
pub const FLOAT64: u8 = 0xcb;
pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;
pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;
pub const INT64: u8 = 0xd3;
pub const STR8: u8 = 0xd9;
pub const STR16: u8 = 0xda;
pub const STR32: u8 = 0xdb;
pub const MAP16: u8 = 0xde;
pub const MAP32: u8 = 0xdf;

/// A parsed leading byte.
///
/// Single-byte kinds carry their value inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    PositiveFixint(u8),
    FixMap(u8),
    FixStr(u8),
    Nil,
    False,
    True,
    Float64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Str8,
    Str16,
    Str32,
    Map16,
    Map32,
    NegativeFixint(i8),
}

impl Tag {
    /// Parses a tag from its leading byte.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        let tag = match byte {
            0x00..=0x7f => Self::PositiveFixint(byte),
            0x80..=0x8f => Self::FixMap(byte & 0x0f),
            0xa0..=0xbf => Self::FixStr(byte & 0x1f),
            NIL => Self::Nil,
            FALSE => Self::False,
            TRUE => Self::True,
            FLOAT64 => Self::Float64,
            UINT8 => Self::UInt8,
            UINT16 => Self::UInt16,
            UINT32 => Self::UInt32,
            UINT64 => Self::UInt64,
            INT8 => Self::Int8,
            INT16 => Self::Int16,
            INT32 => Self::Int32,
            INT64 => Self::Int64,
            STR8 => Self::Str8,
            STR16 => Self::Str16,
            STR32 => Self::Str32,
            MAP16 => Self::Map16,
            MAP32 => Self::Map32,
            #[allow(clippy::cast_possible_wrap)]
            0xe0..=0xff => Self::NegativeFixint(byte as i8),
            _ => return None,
        };
        Some(tag)
    }

    /// Returns the leading byte for this tag.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::PositiveFixint(value) => value,
            Self::FixMap(count) => FIXMAP | (count & 0x0f),
            Self::FixStr(len) => FIXSTR | (len & 0x1f),
            Self::Nil => NIL,
            Self::False => FALSE,
            Self::True => TRUE,
            Self::Float64 => FLOAT64,
            Self::UInt8 => UINT8,
            Self::UInt16 => UINT16,
            Self::UInt32 => UINT32,
            Self::UInt64 => UINT64,
            Self::Int8 => INT8,
            Self::Int16 => INT16,
            Self::Int32 => INT32,
            Self::Int64 => INT64,
            Self::Str8 => STR8,
            Self::Str16 => STR16,
            Self::Str32 => STR32,
            Self::Map16 => MAP16,
            Self::Map32 => MAP32,
            #[allow(clippy::cast_sign_loss)]
            Self::NegativeFixint(value) => value as u8,
        }
    }

    /// Returns the tag family name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PositiveFixint(_) => "positive fixint",
            Self::FixMap(_) => "fixmap",
            Self::FixStr(_) => "fixstr",
            Self::Nil => "null",
            Self::False => "false",
            Self::True => "true",
            Self::Float64 => "float64",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Str8 => "str8",
            Self::Str16 => "str16",
            Self::Str32 => "str32",
            Self::Map16 => "map16",
            Self::Map32 => "map32",
            Self::NegativeFixint(_) => "negative fixint",
        }
    }

    /// Returns `true` for the integer families.
    #[must_use]
    pub const fn is_int(self) -> bool {
        matches!(
            self,
            Self::PositiveFixint(_)
                | Self::NegativeFixint(_)
                | Self::UInt8
                | Self::UInt16
                | Self::UInt32
                | Self::UInt64
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
        )
    }

    /// Returns `true` for the string families.
    #[must_use]
    pub const fn is_str(self) -> bool {
        matches!(self, Self::FixStr(_) | Self::Str8 | Self::Str16 | Self::Str32)
    }

    /// Returns `true` for the map families.
    #[must_use]
    pub const fn is_map(self) -> bool {
        matches!(self, Self::FixMap(_) | Self::Map16 | Self::Map32)
    }
}

/// Reads and parses the leading byte at the reader's position.
pub fn read_tag(reader: &mut ByteReader<'_>) -> WireResult<Tag> {
    let offset = reader.position();
    let byte = reader.read_u8()?;
    Tag::from_byte(byte).ok_or(WireError::MalformedTag { tag: byte, offset })
}

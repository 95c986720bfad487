//! Error types for codec operations.

use std::fmt;

use crate::record::RestoreError;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Fatal errors that abort an encode or decode call.
///
/// Conditions the codec recovers from are reported as
/// [`Diagnostic`](crate::Diagnostic)s instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    /// Wire format error (malformed tag, truncated buffer, decode limits).
    Wire(wire::WireError),

    /// Map or record has more entries than a header can state.
    ContainerTooLarge { count: u64, limit: u64 },

    /// String longer than allowed (strict mode only).
    StringTooLong { len: u64, limit: u64 },

    /// Integer outside the configured native width (strict mode only).
    IntegerTooLarge { value: i128 },

    /// Value kind with no wire representation (strict mode only).
    UnsupportedValueKind { kind: String },

    /// Nesting deeper than the configured maximum.
    DepthLimitExceeded { limit: usize },

    /// Record type name contains a NUL byte, which would break private field
    /// keys.
    InvalidTypeName { type_name: String },

    /// Record type name is not registered, or has no factory.
    UnknownRecordType { type_name: String },

    /// A record was required but another kind of value was decoded.
    NotARecord { found: &'static str },

    /// The host type rejected a decoded field.
    Restore {
        type_name: String,
        field: String,
        reason: RestoreError,
    },
}

impl CodecError {
    /// Returns `true` if decoding failed because the buffer ended early.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::Wire(err) if err.is_truncated())
    }

    /// Returns `true` if decoding hit a byte outside the tag table.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Wire(wire::WireError::MalformedTag { .. }))
    }
}

impl From<wire::WireError> for CodecError {
    fn from(err: wire::WireError) -> Self {
        Self::Wire(err)
    }
}

impl From<bytestream::ByteError> for CodecError {
    fn from(err: bytestream::ByteError) -> Self {
        Self::Wire(err.into())
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::ContainerTooLarge { count, limit } => {
                write!(f, "container too large: {count} entries, limit {limit}")
            }
            Self::StringTooLong { len, limit } => {
                write!(f, "string too long: {len} bytes, limit {limit}")
            }
            Self::IntegerTooLarge { value } => {
                write!(f, "integer {value} exceeds the native integer width")
            }
            Self::UnsupportedValueKind { kind } => {
                write!(f, "value kind {kind} has no wire representation")
            }
            Self::DepthLimitExceeded { limit } => {
                write!(f, "nesting depth exceeds limit {limit}")
            }
            Self::InvalidTypeName { type_name } => {
                write!(f, "record type name {type_name:?} contains a NUL byte")
            }
            Self::UnknownRecordType { type_name } => {
                write!(f, "unknown record type {type_name:?}")
            }
            Self::NotARecord { found } => write!(f, "expected a record, found {found}"),
            Self::Restore {
                type_name,
                field,
                reason,
            } => {
                write!(f, "cannot restore {type_name}::{field}: {reason}")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            Self::Restore { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

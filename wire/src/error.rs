//! Error types for wire format operations.

use std::fmt;

use bytestream::ByteError;

/// Result type for wire format operations.
pub type WireResult<T> = Result<T, WireError>;

/// Errors raised while reading or writing a single tagged item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WireError {
    /// Leading byte is not part of the tag table, or is not valid where it
    /// was found.
    MalformedTag { tag: u8, offset: usize },

    /// Buffer ends before the item does.
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A length or count exceeds the configured limit or the wire ceiling.
    LimitsExceeded {
        kind: LimitKind,
        limit: u64,
        actual: u64,
    },
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    StringLength,
    MapEntries,
}

impl WireError {
    /// Returns `true` if the error means the buffer ended early.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

impl From<ByteError> for WireError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::UnexpectedEof {
                offset,
                requested,
                available,
            } => Self::Truncated {
                offset,
                needed: requested,
                available,
            },
        }
    }
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTag { tag, offset } => {
                write!(f, "malformed tag 0x{tag:02x} at offset {offset}")
            }
            Self::Truncated {
                offset,
                needed,
                available,
            } => {
                write!(
                    f,
                    "truncated buffer at offset {offset}: need {needed} bytes, have {available}"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StringLength => "string length",
            Self::MapEntries => "map entries",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for WireError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_malformed_tag() {
        let err = WireError::MalformedTag {
            tag: 0xc1,
            offset: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("0xc1"));
        assert!(msg.contains("offset 3"));
    }

    #[test]
    fn display_limits_exceeded() {
        let err = WireError::LimitsExceeded {
            kind: LimitKind::MapEntries,
            limit: 4,
            actual: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("map entries"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn byte_error_becomes_truncated() {
        let err: WireError = ByteError::UnexpectedEof {
            offset: 1,
            requested: 2,
            available: 1,
        }
        .into();
        assert!(err.is_truncated());
        assert_eq!(
            err,
            WireError::Truncated {
                offset: 1,
                needed: 2,
                available: 1
            }
        );
    }
}

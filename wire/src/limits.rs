//! Configurable limits for bounded encoding and decoding.

/// Largest length or count any header on the wire can carry (`2^32 - 1`).
pub const MAX_WIRE_LEN: u64 = u32::MAX as u64;

/// Wire-level limits for string and map headers.
///
/// On encode, a string over `max_string_len` is reported as
/// [`WireError::LimitsExceeded`](crate::WireError::LimitsExceeded) and nothing is
/// written; the caller decides whether to degrade. On decode, declared lengths
/// and counts above the limits are rejected before any allocation. Values above
/// [`MAX_WIRE_LEN`] are clamped to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum string length in bytes.
    pub max_string_len: u64,

    /// Maximum number of key/value pairs in a map.
    pub max_map_len: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_string_len: MAX_WIRE_LEN,
            max_map_len: MAX_WIRE_LEN,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_string_len: 1024,
            max_map_len: 64,
        }
    }

    /// Creates limits that only enforce the wire ceiling.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_string_len: MAX_WIRE_LEN,
            max_map_len: MAX_WIRE_LEN,
        }
    }

    pub(crate) fn string_limit(&self) -> u64 {
        self.max_string_len.min(MAX_WIRE_LEN)
    }

    pub(crate) fn map_limit(&self) -> u64 {
        self.max_map_len.min(MAX_WIRE_LEN)
    }
}

//! Limits and options for codec-level encoding and decoding.

/// Default maximum nesting depth of maps and records.
///
/// Unoptimized builds must hit this limit before exhausting a 2 MiB thread
/// stack.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Codec-specific limits enforced on every recursive step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum number of maps and records nested inside each other. A flat
    /// map has depth 1; a scalar has depth 0.
    pub max_depth: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self { max_depth: 16 }
    }

    /// Creates limits with no restrictions (use with caution).
    ///
    /// Deeply nested input can then exhaust the call stack.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}

/// Native integer width of the host the encoder emulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntWidth {
    /// Full 64-bit signed and unsigned range.
    #[default]
    W64,
    /// Host limited to 32-bit integers: values below `-2^31` or at or above
    /// `2^32` cannot be encoded.
    W32,
}

impl IntWidth {
    /// Returns `true` if `value` can be encoded at this width.
    #[must_use]
    pub fn fits(self, value: i128) -> bool {
        match self {
            Self::W64 => i128::from(i64::MIN) <= value && value <= i128::from(u64::MAX),
            Self::W32 => i128::from(i32::MIN) <= value && value <= i128::from(u32::MAX),
        }
    }
}

/// Options shared by [`Encoder`](crate::Encoder) and [`Decoder`](crate::Decoder).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodecOptions {
    /// Fail instead of degrading oversized strings, out-of-range integers and
    /// unsupported values.
    pub strict: bool,
    /// Native integer width.
    pub int_width: IntWidth,
    /// Codec limits.
    pub limits: CodecLimits,
    /// Wire limits for string and map headers.
    pub wire_limits: wire::Limits,
}

impl CodecOptions {
    /// Default options with strict mode turned on.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Options with small limits, for tests.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            strict: false,
            int_width: IntWidth::W64,
            limits: CodecLimits::for_testing(),
            wire_limits: wire::Limits::for_testing(),
        }
    }

    /// Returns a copy with strict mode set to `strict`.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns a copy with the given integer width.
    #[must_use]
    pub fn with_int_width(mut self, int_width: IntWidth) -> Self {
        self.int_width = int_width;
        self
    }

    /// Returns a copy with the given maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.limits.max_depth = max_depth;
        self
    }
}

//! Self-describing value and record encoding/decoding for tagpack.
//!
//! This is the main codec crate. It ties together `bytestream` and `wire` to
//! encode a dynamically typed [`Value`] as one tagged buffer and decode it
//! back, including structured records whose field keys carry their access
//! qualifier.
//!
//! # Features
//!
//! - Closed [`Value`] model with exhaustive dispatch
//! - Records with public, protected and private fields
//! - Host types via [`Serializable`] and [`TypeRegistry`]
//! - Lenient degrade policy with [`Diagnostic`]s, or strict mode
//! - Configurable nesting depth
//!
//! # Design Principles
//!
//! - **Byte-exact** - Encoding is deterministic and matches the wire table.
//! - **Fail loudly** - Fatal conditions return a [`CodecError`]; recoverable
//!   ones are reported, never swallowed.
//! - **Bounded** - Lengths, counts and depth are checked before recursing or
//!   allocating.

mod decode;
mod diagnostic;
mod encode;
mod error;
mod limits;
mod object;
mod record;
#[cfg(feature = "serde")]
mod serde_impl;
mod value;
mod visibility;

pub use decode::{decode, decode_value, unserialize, Decoded, Decoder};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use encode::{encode, serialize, Encoded, Encoder};
pub use error::{CodecError, CodecResult};
pub use limits::{CodecLimits, CodecOptions, IntWidth, DEFAULT_MAX_DEPTH};
pub use object::{serialize_object, unserialize_into, unserialize_object};
pub use record::{RestoreError, Serializable, TypeRegistry};
pub use value::{Field, Record, Value};
pub use visibility::{demangle, mangle, DemangleError, Visibility};
pub use wire::Limits as WireLimits;

//! Wire encodings for the tagpack codec.
//!
//! This crate owns the byte-exact wire format: the leading tag table and the
//! scalar and header encodings (integers, doubles, strings, map headers). It
//! does not know about values, records or field visibility; only about how a
//! single tag and its payload are laid out.
//!
//! # Design Principles
//!
//! - **Stable wire format** - Every threshold and byte order is fixed; see the
//!   tag table in [`tag`].
//! - **Bounded decoding** - All length fields are validated against [`Limits`]
//!   and the remaining buffer before anything is allocated.
//! - **No domain knowledge** - This crate frames scalars, not records.

mod error;
mod float;
mod int;
mod limits;
mod map;
mod string;
pub mod tag;

pub use error::{LimitKind, WireError, WireResult};
pub use float::{decode_f64, encode_f64};
pub use int::{decode_int, encode_int, encode_uint, WireInt};
pub use limits::{Limits, MAX_WIRE_LEN};
pub use map::{decode_map_len, encode_map_header};
pub use string::{decode_str, encode_empty_str, encode_str};
pub use tag::{read_tag, Tag};

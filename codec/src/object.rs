//! Top-level entry points for host types implementing [`Serializable`].

use crate::decode::{unserialize, Decoded};
use crate::encode::{serialize, Encoded};
use crate::error::{CodecError, CodecResult};
use crate::limits::CodecOptions;
use crate::record::{restore_fields, Serializable, TypeRegistry};
use crate::value::{Record, Value};

/// Encodes a host value.
///
/// If the value supplies [`Serializable::custom_encode`] its bytes are
/// returned verbatim; otherwise its record is encoded. Nested host values go
/// through [`Serializable::to_value`] the same way.
pub fn serialize_object(object: &dyn Serializable, options: &CodecOptions) -> CodecResult<Encoded> {
    serialize(&object.to_value(), options)
}

/// Decodes a record of any registered type from `buf` and builds its host
/// value, then runs its [`Serializable::after_decode`] hook with `buf`.
pub fn unserialize_object(
    buf: &[u8],
    options: &CodecOptions,
    registry: &TypeRegistry,
) -> CodecResult<Decoded<Box<dyn Serializable>>> {
    let Decoded {
        value,
        consumed,
        diagnostics,
    } = unserialize(buf, options, Some(registry))?;
    let mut object = registry.instantiate(expect_record(value)?)?;
    object.after_decode(buf);
    Ok(Decoded {
        value: object,
        consumed,
        diagnostics,
    })
}

/// Decodes `buf` into a fresh `T`.
///
/// The record must carry `T`'s type name. Only `T` needs to be known, so no
/// registry is taken.
pub fn unserialize_into<T>(buf: &[u8], options: &CodecOptions) -> CodecResult<Decoded<T>>
where
    T: Serializable + Default,
{
    let mut object = T::default();
    let mut registry = TypeRegistry::new();
    registry.register_name(object.type_name());

    let Decoded {
        value,
        consumed,
        diagnostics,
    } = unserialize(buf, options, Some(&registry))?;
    restore_fields(&mut object, expect_record(value)?)?;
    object.after_decode(buf);
    Ok(Decoded {
        value: object,
        consumed,
        diagnostics,
    })
}

fn expect_record(value: Value) -> CodecResult<Record> {
    match value {
        Value::Record(record) => Ok(record),
        other => Err(CodecError::NotARecord {
            found: other.kind_name(),
        }),
    }
}

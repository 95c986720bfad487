//! `serde::Serialize` for the value model, for JSON and other text output.
//!
//! Maps serialize as sequences of `[key, value]` pairs since keys may be any
//! value. Byte strings serialize as strings when they are UTF-8 and as byte
//! sequences otherwise.

use serde::ser::{SerializeSeq, SerializeStruct, SerializeTuple};
use serde::{Serialize, Serializer};

use crate::value::{Field, Record, Value};
use crate::visibility::Visibility;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::UInt(value) => serializer.serialize_u64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => serializer.serialize_str(text),
                Err(_) => serializer.serialize_bytes(bytes),
            },
            Self::Map(pairs) => {
                let mut seq = serializer.serialize_seq(Some(pairs.len()))?;
                for (key, value) in pairs {
                    seq.serialize_element(&Pair(key, value))?;
                }
                seq.end()
            }
            Self::Record(record) => record.serialize(serializer),
            Self::Unsupported(kind) => serializer.serialize_str(kind),
            Self::Custom(bytes) => serializer.serialize_bytes(bytes),
        }
    }
}

struct Pair<'a>(&'a Value, &'a Value);

impl Serialize for Pair<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(self.0)?;
        tuple.serialize_element(self.1)?;
        tuple.end()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Record", 2)?;
        state.serialize_field("type", &self.type_name)?;
        state.serialize_field("fields", &self.fields)?;
        state.end()
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Field", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("visibility", &self.visibility)?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

impl Serialize for Visibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn map_as_pairs() {
        let value = Value::map([(Value::from("a"), Value::Int(1)), (Value::Null, Value::Bool(true))]);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!([["a", 1], [null, true]])
        );
    }

    #[test]
    fn non_utf8_bytes_as_array() {
        let value = Value::Bytes(vec![0xff, 0x00]);
        assert_eq!(serde_json::to_value(&value).unwrap(), json!([255, 0]));
    }

    #[test]
    fn record_shape() {
        let record = Record::new("P").field("x", Visibility::Private, 2);
        assert_eq!(
            serde_json::to_value(Value::Record(record)).unwrap(),
            json!({
                "type": "P",
                "fields": [{ "name": "x", "visibility": "private", "value": 2 }]
            })
        );
    }
}

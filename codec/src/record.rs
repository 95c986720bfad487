//! Host types that round-trip through records, and the registry that knows
//! how to build them.
//!
//! There is no reflection: a type lists its own stored fields (including
//! protected and private ones it chooses to expose) and accepts them back by
//! name.

use std::collections::HashMap;
use std::fmt;

use crate::error::{CodecError, CodecResult};
use crate::value::{Field, Record, Value};
use crate::visibility::Visibility;

/// A host type that can be written as, and rebuilt from, a [`Record`].
pub trait Serializable {
    /// Type name written into the record sentinel.
    fn type_name(&self) -> &str;

    /// Stored fields in declaration order. Static or derived state is left out.
    fn fields(&self) -> Vec<Field>;

    /// Restores one decoded field.
    fn restore_field(
        &mut self,
        name: &str,
        visibility: Visibility,
        value: Value,
    ) -> Result<(), RestoreError>;

    /// Full custom encoding. When this returns bytes they are used verbatim
    /// and nothing else about the value is encoded.
    fn custom_encode(&self) -> Option<Vec<u8>> {
        None
    }

    /// Called after the value was rebuilt from `buf` at the top level.
    fn after_decode(&mut self, _buf: &[u8]) {}

    /// Builds the record for this value.
    fn to_record(&self) -> Record {
        Record {
            type_name: self.type_name().to_owned(),
            fields: self.fields(),
        }
    }

    /// Builds the value to encode: the custom bytes if
    /// [`custom_encode`](Self::custom_encode) supplies them, the record
    /// otherwise. Use this for host values nested in another type's fields.
    fn to_value(&self) -> Value {
        self.custom_encode()
            .map_or_else(|| Value::Record(self.to_record()), Value::Custom)
    }
}

/// Why a host type refused a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreError {
    /// The type has no field by that name.
    UnknownField,
    /// The field exists with a different visibility.
    VisibilityMismatch { expected: Visibility },
    /// The value has the wrong kind for the field.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl RestoreError {
    /// Shorthand for a kind mismatch against `found`.
    #[must_use]
    pub const fn type_mismatch(expected: &'static str, found: &Value) -> Self {
        Self::TypeMismatch {
            expected,
            found: found.kind_name(),
        }
    }
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField => write!(f, "no such field"),
            Self::VisibilityMismatch { expected } => {
                write!(f, "field is {expected}")
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
        }
    }
}

impl std::error::Error for RestoreError {}

type Factory = fn() -> Box<dyn Serializable>;

/// Known record types, by name.
///
/// The decoder only treats a map as a record when its sentinel names a type
/// in the registry.
#[derive(Default)]
pub struct TypeRegistry {
    types: HashMap<String, Option<Factory>>,
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.types.keys().collect();
        names.sort();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under the name its default value reports.
    pub fn register<T>(&mut self) -> &mut Self
    where
        T: Serializable + Default + 'static,
    {
        let name = T::default().type_name().to_owned();
        let factory: Factory = || Box::new(T::default());
        self.types.insert(name, Some(factory));
        self
    }

    /// Marks `name` as a record type without a host factory. Maps carrying it
    /// decode as records but cannot be instantiated.
    pub fn register_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.types.entry(name.into()).or_insert(None);
        self
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Builds the host value for `record` and restores every field into it.
    pub fn instantiate(&self, record: Record) -> CodecResult<Box<dyn Serializable>> {
        let factory = self
            .types
            .get(&record.type_name)
            .copied()
            .flatten()
            .ok_or_else(|| CodecError::UnknownRecordType {
                type_name: record.type_name.clone(),
            })?;
        let mut object = factory();
        restore_fields(object.as_mut(), record)?;
        Ok(object)
    }
}

/// Restores every field of `record` into `object`.
pub(crate) fn restore_fields(object: &mut dyn Serializable, record: Record) -> CodecResult<()> {
    let Record { type_name, fields } = record;
    for field in fields {
        object
            .restore_field(&field.name, field.visibility, field.value)
            .map_err(|reason| CodecError::Restore {
                type_name: type_name.clone(),
                field: field.name,
                reason,
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Counter {
        label: String,
        count: i64,
    }

    impl Serializable for Counter {
        fn type_name(&self) -> &str {
            "Counter"
        }

        fn fields(&self) -> Vec<Field> {
            vec![
                Field::new("label", Visibility::Public, self.label.as_str()),
                Field::new("count", Visibility::Private, self.count),
            ]
        }

        fn restore_field(
            &mut self,
            name: &str,
            _visibility: Visibility,
            value: Value,
        ) -> Result<(), RestoreError> {
            match name {
                "label" => {
                    self.label = value
                        .as_str()
                        .ok_or_else(|| RestoreError::type_mismatch("string", &value))?
                        .to_owned();
                }
                "count" => {
                    self.count = value
                        .as_i64()
                        .ok_or_else(|| RestoreError::type_mismatch("integer", &value))?;
                }
                _ => return Err(RestoreError::UnknownField),
            }
            Ok(())
        }
    }

    #[test]
    fn register_uses_type_name() {
        let mut registry = TypeRegistry::new();
        registry.register::<Counter>().register_name("Opaque");
        assert!(registry.contains("Counter"));
        assert!(registry.contains("Opaque"));
        assert!(!registry.contains("counter"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn instantiate_restores_fields() {
        let mut registry = TypeRegistry::new();
        registry.register::<Counter>();
        let source = Counter {
            label: "hits".to_string(),
            count: 9,
        };
        let object = registry.instantiate(source.to_record()).unwrap();
        assert_eq!(object.to_record(), source.to_record());
    }

    #[test]
    fn instantiate_unknown_or_factoryless() {
        let mut registry = TypeRegistry::new();
        registry.register_name("Opaque");
        assert!(matches!(
            registry.instantiate(Record::new("Opaque")),
            Err(CodecError::UnknownRecordType { .. })
        ));
        assert!(matches!(
            registry.instantiate(Record::new("Missing")),
            Err(CodecError::UnknownRecordType { .. })
        ));
    }

    #[test]
    fn rejected_field_is_fatal() {
        let mut registry = TypeRegistry::new();
        registry.register::<Counter>();
        let record = Record::new("Counter").field("count", Visibility::Private, "nine");
        let err = registry.instantiate(record).err().unwrap();
        assert_eq!(
            err,
            CodecError::Restore {
                type_name: "Counter".to_string(),
                field: "count".to_string(),
                reason: RestoreError::TypeMismatch {
                    expected: "integer",
                    found: "string"
                },
            }
        );
    }

    #[test]
    fn register_name_keeps_existing_factory() {
        let mut registry = TypeRegistry::new();
        registry.register::<Counter>().register_name("Counter");
        assert!(registry.instantiate(Record::new("Counter")).is_ok());
    }
}

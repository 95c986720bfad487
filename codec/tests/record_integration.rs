use codec::{
    encode, serialize_object, unserialize, unserialize_into, unserialize_object, CodecError,
    CodecOptions, DiagnosticKind, Field, Record, RestoreError, Serializable, Severity,
    TypeRegistry, Value, Visibility,
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Account {
    owner: String,
    balance: i64,
    pin: u32,
    loaded: bool,
}

impl Serializable for Account {
    fn type_name(&self) -> &str {
        "Account"
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("owner", Visibility::Public, self.owner.as_str()),
            Field::new("balance", Visibility::Protected, self.balance),
            Field::new("pin", Visibility::Private, self.pin),
        ]
    }

    fn restore_field(
        &mut self,
        name: &str,
        visibility: Visibility,
        value: Value,
    ) -> Result<(), RestoreError> {
        let expected = match name {
            "owner" => Visibility::Public,
            "balance" => Visibility::Protected,
            "pin" => Visibility::Private,
            _ => return Err(RestoreError::UnknownField),
        };
        if visibility != expected {
            return Err(RestoreError::VisibilityMismatch { expected });
        }
        match name {
            "owner" => {
                self.owner = value
                    .as_str()
                    .ok_or_else(|| RestoreError::type_mismatch("string", &value))?
                    .to_owned();
            }
            "balance" => {
                self.balance = value
                    .as_i64()
                    .ok_or_else(|| RestoreError::type_mismatch("integer", &value))?;
            }
            _ => {
                self.pin = value
                    .as_u64()
                    .and_then(|pin| u32::try_from(pin).ok())
                    .ok_or_else(|| RestoreError::type_mismatch("u32", &value))?;
            }
        }
        Ok(())
    }

    fn after_decode(&mut self, _buf: &[u8]) {
        self.loaded = true;
    }
}

fn account() -> Account {
    Account {
        owner: "lee".to_string(),
        balance: -250,
        pin: 4321,
        loaded: false,
    }
}

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register::<Account>();
    registry
}

#[test]
fn record_roundtrip_recovers_visibility() {
    let options = CodecOptions::default();
    let bytes = serialize_object(&account(), &options).unwrap().bytes;
    let decoded = unserialize(&bytes, &options, Some(&registry())).unwrap();
    let record = decoded.value.as_record().unwrap();
    assert_eq!(record.type_name, "Account");
    let visibilities: Vec<_> = record
        .fields
        .iter()
        .map(|field| (field.name.as_str(), field.visibility))
        .collect();
    assert_eq!(
        visibilities,
        vec![
            ("owner", Visibility::Public),
            ("balance", Visibility::Protected),
            ("pin", Visibility::Private),
        ]
    );
    assert_eq!(record.get("balance").unwrap().value, Value::Int(-250));
    assert_eq!(encode(&decoded.value).unwrap(), bytes);
}

#[test]
fn host_object_roundtrip_runs_hook() {
    let options = CodecOptions::default();
    let bytes = serialize_object(&account(), &options).unwrap().bytes;

    let typed = unserialize_into::<Account>(&bytes, &options).unwrap();
    assert!(typed.value.loaded);
    assert_eq!(
        typed.value,
        Account {
            loaded: true,
            ..account()
        }
    );

    let dynamic = unserialize_object(&bytes, &options, &registry()).unwrap();
    assert_eq!(dynamic.value.to_record(), account().to_record());
    assert_eq!(dynamic.consumed, bytes.len());
}

#[test]
fn wrong_owner_skips_only_that_field() {
    // Encoded as if `pin` belonged to another type.
    let forged = Value::Record(
        Record::new("Account")
            .field("owner", Visibility::Public, "lee")
            .field("balance", Visibility::Protected, -250),
    );
    let mut bytes = encode(&forged).unwrap();
    bytes[0] += 1;
    bytes.extend_from_slice(&[0xa9, 0x00, b'S', b'a', b'v', b'e', b'r', 0x00, b'p', b'i']);
    bytes.push(0x05);

    let decoded = unserialize(&bytes, &CodecOptions::default(), Some(&registry())).unwrap();
    assert_eq!(decoded.value, forged);
    assert_eq!(decoded.diagnostics.len(), 1);
    assert_eq!(decoded.diagnostics[0].kind, DiagnosticKind::FieldNameMismatch);
    assert_eq!(decoded.diagnostics[0].severity, Severity::Error);

    let typed = unserialize_into::<Account>(&bytes, &CodecOptions::default()).unwrap();
    assert_eq!(typed.value.owner, "lee");
    assert_eq!(typed.value.pin, 0);
}

#[test]
fn unknown_type_decodes_as_plain_map() {
    let bytes = serialize_object(&account(), &CodecOptions::default())
        .unwrap()
        .bytes;
    let decoded = unserialize(&bytes, &CodecOptions::default(), Some(&TypeRegistry::new()))
        .unwrap();
    let pairs = decoded.value.as_map().unwrap();
    assert_eq!(pairs.len(), 4);
    assert_eq!(pairs[0].0, Value::from("owner"));
    assert_eq!(pairs[1].0, Value::from("\0*\0balance"));
    assert_eq!(pairs[2].0, Value::from("\0Account\0pin"));
    assert_eq!(pairs[3], (Value::from(""), Value::from("Account")));
    assert!(decoded.diagnostics.is_empty());
}

#[test]
fn rejected_field_is_fatal() {
    let record = Record::new("Account").field("balance", Visibility::Public, 1);
    let bytes = encode(&Value::Record(record)).unwrap();
    let err = unserialize_into::<Account>(&bytes, &CodecOptions::default())
        .err()
        .unwrap();
    assert_eq!(
        err,
        CodecError::Restore {
            type_name: "Account".to_string(),
            field: "balance".to_string(),
            reason: RestoreError::VisibilityMismatch {
                expected: Visibility::Protected
            },
        }
    );
}

#[test]
fn nested_records() {
    let inner = Record::new("Account").field("owner", Visibility::Public, "kim");
    let outer = Value::map([("primary", Value::Record(inner))]);
    let bytes = encode(&outer).unwrap();
    let decoded = unserialize(&bytes, &CodecOptions::default(), Some(&registry())).unwrap();
    assert_eq!(decoded.value, outer);
}

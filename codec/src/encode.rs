//! Value encoding.

use bytestream::ByteWriter;
use wire::{tag, WireError};

use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::error::{CodecError, CodecResult};
use crate::limits::CodecOptions;
use crate::value::{Record, Value};
use crate::visibility::mangle;

/// Output of a successful encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    /// Degradations applied while encoding (empty in strict mode).
    pub diagnostics: Vec<Diagnostic>,
}

/// Encodes values into one growing buffer.
///
/// Oversized strings, out-of-range integers and unsupported values are
/// degraded and reported unless [`CodecOptions::strict`] is set. Map headers
/// that cannot be written and excessive nesting always fail.
#[derive(Debug)]
pub struct Encoder<'a> {
    out: ByteWriter,
    options: &'a CodecOptions,
    diagnostics: Diagnostics,
}

impl<'a> Encoder<'a> {
    #[must_use]
    pub fn new(options: &'a CodecOptions) -> Self {
        Self {
            out: ByteWriter::new(),
            options,
            diagnostics: Diagnostics::default(),
        }
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Appends the encoding of `value`.
    ///
    /// On error the buffer is rolled back to where this call started.
    pub fn encode(&mut self, value: &Value) -> CodecResult<()> {
        let mark = self.out.len();
        let result = self.encode_at(value, 0);
        if result.is_err() {
            self.out.truncate(mark);
        }
        result
    }

    /// Finishes encoding and returns the bytes and diagnostics.
    #[must_use]
    pub fn finish(self) -> Encoded {
        Encoded {
            bytes: self.out.finish(),
            diagnostics: self.diagnostics.into_vec(),
        }
    }

    fn encode_at(&mut self, value: &Value, depth: usize) -> CodecResult<()> {
        match value {
            Value::Null => self.out.write_u8(tag::NIL),
            Value::Bool(false) => self.out.write_u8(tag::FALSE),
            Value::Bool(true) => self.out.write_u8(tag::TRUE),
            Value::Int(v) => {
                if self.int_fits(i128::from(*v))? {
                    wire::encode_int(*v, &mut self.out);
                }
            }
            Value::UInt(v) => {
                if self.int_fits(i128::from(*v))? {
                    wire::encode_uint(*v, &mut self.out);
                }
            }
            Value::Float(v) => wire::encode_f64(*v, &mut self.out),
            Value::Bytes(bytes) => self.encode_string(bytes)?,
            Value::Map(pairs) => {
                self.enter(depth)?;
                self.encode_map_header(pairs.len())?;
                for (key, value) in pairs {
                    self.encode_at(key, depth + 1)?;
                    self.encode_at(value, depth + 1)?;
                }
            }
            Value::Record(record) => self.encode_record(record, depth)?,
            Value::Unsupported(kind) => {
                if self.options.strict {
                    return Err(CodecError::UnsupportedValueKind { kind: kind.clone() });
                }
                self.diagnostics.report(
                    DiagnosticKind::UnsupportedValueKind,
                    self.out.len(),
                    format!("{kind} is unsupported, encoded as null"),
                );
                self.out.write_u8(tag::NIL);
            }
            Value::Custom(bytes) => self.out.write_bytes(bytes),
        }
        Ok(())
    }

    /// A record is a map whose first pair is `(null, type name)`, followed by
    /// one `(mangled key, value)` pair per field.
    fn encode_record(&mut self, record: &Record, depth: usize) -> CodecResult<()> {
        if record.type_name.contains('\0') {
            return Err(CodecError::InvalidTypeName {
                type_name: record.type_name.clone(),
            });
        }
        self.enter(depth)?;
        self.encode_map_header(record.fields.len().saturating_add(1))?;
        self.out.write_u8(tag::NIL);
        self.encode_string(record.type_name.as_bytes())?;
        for field in &record.fields {
            let key = mangle(&field.name, field.visibility, &record.type_name);
            self.encode_string(&key)?;
            self.encode_at(&field.value, depth + 1)?;
        }
        Ok(())
    }

    fn enter(&self, depth: usize) -> CodecResult<()> {
        let limit = self.options.limits.max_depth;
        if depth >= limit {
            return Err(CodecError::DepthLimitExceeded { limit });
        }
        Ok(())
    }

    fn encode_map_header(&mut self, count: usize) -> CodecResult<()> {
        let count = u64::try_from(count).unwrap_or(u64::MAX);
        wire::encode_map_header(count, &self.options.wire_limits, &mut self.out).map_err(
            |err| match err {
                WireError::LimitsExceeded { limit, actual, .. } => CodecError::ContainerTooLarge {
                    count: actual,
                    limit,
                },
                other => CodecError::Wire(other),
            },
        )
    }

    fn encode_string(&mut self, bytes: &[u8]) -> CodecResult<()> {
        match wire::encode_str(bytes, &self.options.wire_limits, &mut self.out) {
            Ok(()) => Ok(()),
            Err(WireError::LimitsExceeded { limit, actual, .. }) => {
                if self.options.strict {
                    return Err(CodecError::StringTooLong { len: actual, limit });
                }
                self.diagnostics.report(
                    DiagnosticKind::StringTooLong,
                    self.out.len(),
                    format!("string of {actual} bytes exceeds {limit}, encoded as empty"),
                );
                wire::encode_empty_str(&mut self.out);
                Ok(())
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Returns `false` after writing a null placeholder for an integer the
    /// configured width cannot hold.
    fn int_fits(&mut self, value: i128) -> CodecResult<bool> {
        if self.options.int_width.fits(value) {
            return Ok(true);
        }
        if self.options.strict {
            return Err(CodecError::IntegerTooLarge { value });
        }
        self.diagnostics.report(
            DiagnosticKind::IntegerTooLarge,
            self.out.len(),
            format!("integer {value} is too large, encoded as null"),
        );
        self.out.write_u8(tag::NIL);
        Ok(false)
    }
}

/// Encodes one value with `options`.
pub fn serialize(value: &Value, options: &CodecOptions) -> CodecResult<Encoded> {
    let mut encoder = Encoder::new(options);
    encoder.encode(value)?;
    Ok(encoder.finish())
}

/// Encodes one value with default options. Diagnostics are only logged.
pub fn encode(value: &Value) -> CodecResult<Vec<u8>> {
    serialize(value, &CodecOptions::default()).map(|encoded| encoded.bytes)
}

//! Value decoding.

use bytestream::ByteReader;
use wire::{Tag, WireInt};

use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::error::{CodecError, CodecResult};
use crate::limits::CodecOptions;
use crate::record::TypeRegistry;
use crate::value::{Field, Record, Value};
use crate::visibility::demangle;

/// Output of a successful top-level decode.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T = Value> {
    pub value: T,
    /// Bytes read from the start of the buffer, including the value.
    pub consumed: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// A decoded map pair together with the offset of its key.
type Entry = (usize, Value, Value);

/// Decodes values from a buffer, one at a time.
///
/// Without a registry every map decodes as [`Value::Map`]; a map whose null
/// key holds a type name known to the registry decodes as [`Value::Record`].
#[derive(Debug)]
pub struct Decoder<'a> {
    reader: ByteReader<'a>,
    options: &'a CodecOptions,
    registry: Option<&'a TypeRegistry>,
    diagnostics: Diagnostics,
}

impl<'a> Decoder<'a> {
    #[must_use]
    pub const fn new(buf: &'a [u8], options: &'a CodecOptions) -> Self {
        Self {
            reader: ByteReader::new(buf),
            options,
            registry: None,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Starts decoding at `offset` (clamped to the buffer length).
    #[must_use]
    pub fn at(buf: &'a [u8], offset: usize, options: &'a CodecOptions) -> Self {
        Self {
            reader: ByteReader::at(buf, offset),
            ..Self::new(buf, options)
        }
    }

    /// Uses `registry` to recognize records.
    #[must_use]
    pub fn with_registry(mut self, registry: &'a TypeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Offset of the next unread byte.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.reader.position()
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.reader.remaining()
    }

    /// Decodes the value at the current position.
    ///
    /// On error the position is left where this call started.
    pub fn decode(&mut self) -> CodecResult<Value> {
        let start = self.reader.position();
        let result = self.decode_at(0);
        if result.is_err() {
            self.reader = ByteReader::at(self.reader.buffer(), start);
        }
        result
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.as_slice()
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_vec()
    }

    fn decode_at(&mut self, depth: usize) -> CodecResult<Value> {
        let tag = wire::read_tag(&mut self.reader)?;
        let value = match tag {
            Tag::Nil => Value::Null,
            Tag::False => Value::Bool(false),
            Tag::True => Value::Bool(true),
            Tag::Float64 => Value::Float(wire::decode_f64(&mut self.reader)?),
            Tag::PositiveFixint(_)
            | Tag::NegativeFixint(_)
            | Tag::UInt8
            | Tag::UInt16
            | Tag::UInt32
            | Tag::UInt64
            | Tag::Int8
            | Tag::Int16
            | Tag::Int32
            | Tag::Int64 => match wire::decode_int(tag, &mut self.reader)? {
                WireInt::Int(value) => Value::Int(value),
                WireInt::UInt(value) => Value::from(value),
            },
            Tag::FixStr(_) | Tag::Str8 | Tag::Str16 | Tag::Str32 => {
                let bytes =
                    wire::decode_str(tag, &mut self.reader, &self.options.wire_limits)?;
                Value::Bytes(bytes.to_vec())
            }
            Tag::FixMap(_) | Tag::Map16 | Tag::Map32 => self.decode_map(tag, depth)?,
        };
        Ok(value)
    }

    fn decode_map(&mut self, tag: Tag, depth: usize) -> CodecResult<Value> {
        let limit = self.options.limits.max_depth;
        if depth >= limit {
            return Err(CodecError::DepthLimitExceeded { limit });
        }
        let count = wire::decode_map_len(tag, &mut self.reader, &self.options.wire_limits)?;

        let mut entries: Vec<Entry> = Vec::with_capacity(count);
        let mut sentinel: Option<(usize, Value)> = None;
        for _ in 0..count {
            let key_offset = self.reader.position();
            let key = self.decode_at(depth + 1)?;
            let value = self.decode_at(depth + 1)?;
            if !key.is_null() {
                entries.push((key_offset, key, value));
                continue;
            }
            if let Some((discarded, _)) = sentinel.replace((key_offset, value)) {
                self.diagnostics.report(
                    DiagnosticKind::DiscardedSentinel,
                    discarded,
                    "map has more than one null key, keeping the last".to_string(),
                );
            }
        }

        // A null-valued sentinel marks nothing and is dropped.
        let Some((sentinel_offset, candidate)) = sentinel.filter(|(_, value)| !value.is_null())
        else {
            return Ok(Value::Map(into_pairs(entries)));
        };
        if let Some(type_name) = self.known_type(&candidate) {
            return Ok(Value::Record(self.build_record(type_name, entries)));
        }
        tracing::debug!(
            offset = sentinel_offset,
            "null key does not name a known type, decoding as a plain map"
        );
        entries.push((sentinel_offset, Value::Bytes(Vec::new()), candidate));
        Ok(Value::Map(into_pairs(entries)))
    }

    fn known_type(&self, candidate: &Value) -> Option<String> {
        let name = candidate.as_str()?;
        self.registry
            .filter(|registry| registry.contains(name))
            .map(|_| name.to_owned())
    }

    fn build_record(&mut self, type_name: String, entries: Vec<Entry>) -> Record {
        let mut fields = Vec::with_capacity(entries.len());
        for (offset, key, value) in entries {
            let Some(key) = key.as_bytes() else {
                self.diagnostics.report(
                    DiagnosticKind::InvalidFieldKey,
                    offset,
                    format!("{type_name} field key is {}, skipped", key.kind_name()),
                );
                continue;
            };
            let (visibility, name) = match demangle(key, &type_name) {
                Ok(parts) => parts,
                Err(err) => {
                    self.diagnostics.report(
                        DiagnosticKind::FieldNameMismatch,
                        offset,
                        format!("{type_name} field key rejected: {err}"),
                    );
                    continue;
                }
            };
            let Ok(name) = std::str::from_utf8(name) else {
                self.diagnostics.report(
                    DiagnosticKind::InvalidFieldKey,
                    offset,
                    format!("{type_name} field name is not UTF-8, skipped"),
                );
                continue;
            };
            fields.push(Field::new(name, visibility, value));
        }
        Record { type_name, fields }
    }
}

fn into_pairs(entries: Vec<Entry>) -> Vec<(Value, Value)> {
    entries
        .into_iter()
        .map(|(_, key, value)| (key, value))
        .collect()
}

/// Decodes the single value in `buf`.
///
/// Bytes left after the value are reported as [`DiagnosticKind::TrailingBytes`].
pub fn unserialize(
    buf: &[u8],
    options: &CodecOptions,
    registry: Option<&TypeRegistry>,
) -> CodecResult<Decoded> {
    let mut decoder = Decoder::new(buf, options);
    if let Some(registry) = registry {
        decoder = decoder.with_registry(registry);
    }
    let value = decoder.decode()?;
    let consumed = decoder.position();
    if decoder.remaining() > 0 {
        let trailing = decoder.remaining();
        decoder.diagnostics.report(
            DiagnosticKind::TrailingBytes,
            consumed,
            format!("{trailing} bytes after the top-level value"),
        );
    }
    Ok(Decoded {
        value,
        consumed,
        diagnostics: decoder.into_diagnostics(),
    })
}

/// Decodes the single value in `buf` with default options and no registry.
pub fn decode(buf: &[u8]) -> CodecResult<Value> {
    unserialize(buf, &CodecOptions::default(), None).map(|decoded| decoded.value)
}

/// Decodes one value starting at `offset` and returns it with the offset just
/// past it. Bytes after the value are left alone.
pub fn decode_value(
    buf: &[u8],
    offset: usize,
    options: &CodecOptions,
    registry: Option<&TypeRegistry>,
) -> CodecResult<(Value, usize)> {
    let mut decoder = Decoder::at(buf, offset, options);
    if let Some(registry) = registry {
        decoder = decoder.with_registry(registry);
    }
    let value = decoder.decode()?;
    Ok((value, decoder.position()))
}

//! Introspection and conversion tools for the tagpack codec.
//!
//! This crate provides utilities for looking inside encoded buffers:
//!
//! - Walk a buffer tag by tag with offsets, depth and byte spans
//! - Decode a buffer to JSON or indented text, with its diagnostics
//! - Encode a JSON document into the wire format
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use std::fmt::Write as _;

use anyhow::{bail, Context, Result};
use bytestream::ByteReader;
use codec::{CodecOptions, Encoded, TypeRegistry, Value};
use serde::Serialize;
use wire::{Tag, WireInt};

/// One tagged item found while walking a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagEntry {
    pub offset: usize,
    /// Number of enclosing maps.
    pub depth: usize,
    pub family: &'static str,
    /// Bytes covered by the item, including nested items.
    pub span: usize,
    pub detail: String,
}

/// Layout of a buffer holding one top-level value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub total_len: usize,
    pub consumed: usize,
    pub trailing: usize,
    pub entries: Vec<TagEntry>,
}

/// Walks the top-level value in `bytes` without building it.
pub fn inspect_buffer(bytes: &[u8], options: &CodecOptions) -> Result<InspectReport> {
    let mut walker = Walker {
        reader: ByteReader::new(bytes),
        options,
        entries: Vec::new(),
    };
    walker.walk(0)?;
    let consumed = walker.reader.position();
    Ok(InspectReport {
        total_len: bytes.len(),
        consumed,
        trailing: bytes.len() - consumed,
        entries: walker.entries,
    })
}

struct Walker<'a> {
    reader: ByteReader<'a>,
    options: &'a CodecOptions,
    entries: Vec<TagEntry>,
}

impl Walker<'_> {
    fn walk(&mut self, depth: usize) -> Result<()> {
        let offset = self.reader.position();
        let tag = wire::read_tag(&mut self.reader)
            .with_context(|| format!("read tag at offset {offset}"))?;
        let index = self.entries.len();
        self.entries.push(TagEntry {
            offset,
            depth,
            family: tag.name(),
            span: 0,
            detail: String::new(),
        });

        let detail = match tag {
            Tag::Nil | Tag::False | Tag::True => String::new(),
            Tag::Float64 => wire::decode_f64(&mut self.reader)?.to_string(),
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
                WireInt::Int(value) => value.to_string(),
                WireInt::UInt(value) => value.to_string(),
            },
            Tag::FixStr(_) | Tag::Str8 | Tag::Str16 | Tag::Str32 => {
                let bytes = wire::decode_str(tag, &mut self.reader, &self.options.wire_limits)
                    .with_context(|| format!("string at offset {offset}"))?;
                format!("{} bytes {}", bytes.len(), preview(bytes))
            }
            Tag::FixMap(_) | Tag::Map16 | Tag::Map32 => {
                let max_depth = self.options.limits.max_depth;
                if depth >= max_depth {
                    bail!("maps nested deeper than {max_depth} at offset {offset}");
                }
                let count = wire::decode_map_len(tag, &mut self.reader, &self.options.wire_limits)
                    .with_context(|| format!("map at offset {offset}"))?;
                for _ in 0..count {
                    self.walk(depth + 1)?;
                    self.walk(depth + 1)?;
                }
                format!("{count} pairs")
            }
        };

        let entry = &mut self.entries[index];
        entry.span = self.reader.position() - offset;
        entry.detail = detail;
        Ok(())
    }
}

fn preview(bytes: &[u8]) -> String {
    const MAX_CHARS: usize = 32;
    let text = String::from_utf8_lossy(bytes);
    if text.chars().count() > MAX_CHARS {
        let head: String = text.chars().take(MAX_CHARS).collect();
        format!("{head:?}...")
    } else {
        format!("{text:?}")
    }
}

/// A decoded buffer with the diagnostics raised while decoding it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodeOutput {
    pub value: Value,
    pub consumed: usize,
    pub diagnostics: Vec<String>,
}

/// Decodes `bytes`, treating maps tagged with any of `record_types` as records.
pub fn decode_buffer(
    bytes: &[u8],
    options: &CodecOptions,
    record_types: &[String],
) -> Result<DecodeOutput> {
    let mut registry = TypeRegistry::new();
    for name in record_types {
        registry.register_name(name.as_str());
    }
    let decoded = codec::unserialize(bytes, options, Some(&registry)).context("decode buffer")?;
    Ok(DecodeOutput {
        value: decoded.value,
        consumed: decoded.consumed,
        diagnostics: decoded
            .diagnostics
            .iter()
            .map(ToString::to_string)
            .collect(),
    })
}

/// Renders a decode result as indented text.
pub fn format_decode_pretty(output: &DecodeOutput) -> String {
    let mut out = String::new();
    write_value(&mut out, &output.value, 0);
    let _ = writeln!(out, "consumed: {} bytes", output.consumed);
    if !output.diagnostics.is_empty() {
        out.push_str("diagnostics:\n");
        for diagnostic in &output.diagnostics {
            let _ = writeln!(out, "  {diagnostic}");
        }
    }
    out
}

fn write_value(out: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Map(pairs) => {
            let _ = writeln!(out, "map ({} pairs)", pairs.len());
            for (key, value) in pairs {
                let _ = write!(out, "{:width$}", "", width = (indent + 1) * 2);
                write_scalar(out, key);
                out.push_str(": ");
                write_value(out, value, indent + 1);
            }
        }
        Value::Record(record) => {
            let _ = writeln!(out, "record {}", record.type_name);
            for field in &record.fields {
                let _ = write!(
                    out,
                    "{:width$}{} [{}]: ",
                    "",
                    field.name,
                    field.visibility,
                    width = (indent + 1) * 2
                );
                write_value(out, &field.value, indent + 1);
            }
        }
        scalar => {
            write_scalar(out, scalar);
            out.push('\n');
        }
    }
}

fn write_scalar(out: &mut String, value: &Value) {
    let _ = match value {
        Value::Null => write!(out, "null"),
        Value::Bool(value) => write!(out, "{value}"),
        Value::Int(value) => write!(out, "{value}"),
        Value::UInt(value) => write!(out, "{value}"),
        Value::Float(value) => write!(out, "{value:?}"),
        Value::Bytes(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => write!(out, "{text:?}"),
            Err(_) => write!(out, "0x{}", hex(bytes)),
        },
        Value::Map(pairs) => write!(out, "<map of {}>", pairs.len()),
        Value::Record(record) => write!(out, "<record {}>", record.type_name),
        Value::Unsupported(kind) => write!(out, "<{kind}>"),
        Value::Custom(bytes) => write!(out, "<custom 0x{}>", hex(bytes)),
    };
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::new(), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}

/// Converts a JSON document into a value.
///
/// Objects become maps with string keys and arrays become maps keyed
/// `0..n`, since the wire format has no array family.
pub fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(value) => Value::Bool(*value),
        serde_json::Value::Number(number) => {
            if let Some(value) = number.as_i64() {
                Value::Int(value)
            } else if let Some(value) = number.as_u64() {
                Value::UInt(value)
            } else {
                Value::Float(number.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(text) => Value::from(text.as_str()),
        serde_json::Value::Array(items) => Value::Map(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| (Value::from(index as u64), json_to_value(item)))
                .collect(),
        ),
        serde_json::Value::Object(object) => Value::Map(
            object
                .iter()
                .map(|(key, item)| (Value::from(key.as_str()), json_to_value(item)))
                .collect(),
        ),
    }
}

/// Parses `text` as JSON and encodes it.
pub fn encode_json(text: &str, options: &CodecOptions) -> Result<Encoded> {
    let json: serde_json::Value = serde_json::from_str(text).context("parse json")?;
    codec::serialize(&json_to_value(&json), options).context("encode value")
}

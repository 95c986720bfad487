//! Non-fatal conditions reported while encoding or decoding.
//!
//! Each diagnostic is collected for the caller and also emitted through
//! `tracing`, so hosts that only install a subscriber still see them.

use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

/// What a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A value with no wire representation was encoded as null.
    UnsupportedValueKind,
    /// An oversized string was encoded as the empty string.
    StringTooLong,
    /// An integer outside the native width was encoded as null.
    IntegerTooLarge,
    /// A private field key named a different owner type; the field was skipped.
    FieldNameMismatch,
    /// A record field key was not a UTF-8 string; the field was skipped.
    InvalidFieldKey,
    /// A map held more than one null key; only the last one was kept.
    DiscardedSentinel,
    /// Bytes remained after the top-level value.
    TrailingBytes,
}

impl DiagnosticKind {
    /// Severity this kind is always reported with.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::FieldNameMismatch => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Short name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UnsupportedValueKind => "unsupported value kind",
            Self::StringTooLong => "string too long",
            Self::IntegerTooLarge => "integer too large",
            Self::FieldNameMismatch => "field name mismatch",
            Self::InvalidFieldKey => "invalid field key",
            Self::DiscardedSentinel => "discarded sentinel",
            Self::TrailingBytes => "trailing bytes",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single non-fatal report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Byte offset in the buffer being read or written.
    pub offset: usize,
    /// Human-readable detail.
    pub context: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: {} at offset {}: {}",
            self.severity, self.kind, self.offset, self.context
        )
    }
}

/// Collector for diagnostics raised during one call.
#[derive(Debug, Default, Clone)]
pub(crate) struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub(crate) const fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub(crate) fn report(&mut self, kind: DiagnosticKind, offset: usize, context: String) {
        let severity = kind.severity();
        match severity {
            Severity::Warning => {
                tracing::warn!(kind = %kind, offset, "{context}");
            }
            Severity::Error => {
                tracing::error!(kind = %kind, offset, "{context}");
            }
        }
        self.items.push(Diagnostic {
            severity,
            kind,
            offset,
            context,
        });
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }

    pub(crate) fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }
}

//! Per-build diagnostic sink.
//!
//! Passes never abort on a bad input file. A missing layout, malformed front
//! matter, an unparsable date or an unreadable file is recorded here and the
//! walk moves on to the next node. Each record is also emitted as a `tracing`
//! event at the point it happens, so a `RUST_LOG=debug` run shows the same
//! information in context.
//!
//! A [`Diagnostics`] value lives for exactly one build and is threaded through
//! every pass explicitly.

use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticKind {
    /// A path, layout or template could not be found.
    LookupMiss,
    /// Malformed front matter, an unparsable date or a failed render.
    Format,
    /// An I/O failure reading or writing a single file.
    Resource,
    /// A file that a pass could not handle yet because another conversion
    /// has to run first.
    Deferred,
}

impl DiagnosticKind {
    pub fn label(self) -> &'static str {
        match self {
            DiagnosticKind::LookupMiss => "missing",
            DiagnosticKind::Format => "format",
            DiagnosticKind::Resource => "io",
            DiagnosticKind::Deferred => "deferred",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Where it happened: a tree path or a filesystem path.
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.label(), self.subject, self.message)
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        kind: DiagnosticKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        let diagnostic = Diagnostic {
            kind,
            subject: subject.into(),
            message: message.into(),
        };
        match kind {
            DiagnosticKind::Deferred => debug!(subject = %diagnostic.subject, "{}", diagnostic.message),
            _ => warn!(kind = kind.label(), subject = %diagnostic.subject, "{}", diagnostic.message),
        }
        self.entries.push(diagnostic);
    }

    pub fn lookup_miss(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.record(DiagnosticKind::LookupMiss, subject, message);
    }

    pub fn format(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.record(DiagnosticKind::Format, subject, message);
    }

    pub fn resource(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.record(DiagnosticKind::Resource, subject, message);
    }

    pub fn deferred(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.record(DiagnosticKind::Deferred, subject, message);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

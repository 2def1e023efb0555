//! Diagnostic collection for reply validation
//!
//! The report is an append-only ordered sink: diagnostics come out in the
//! order they were produced, never reordered or deduplicated. Three sources
//! feed it: notes the lexer attached to a consumed token (rendered verbatim,
//! since the lexer already phrased them), type-registry findings for a field
//! value, and the validator's own structural findings (missing terminal,
//! empty field, repetition overflow, all-or-none violations).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a diagnostic came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagKind {
    /// Forwarded from the lexer, rendered verbatim
    Lexer,
    /// Produced by the type registry for a field value
    Type,
    /// Produced by the validator itself
    Structural,
}

/// One line-anchored validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based line of the relevant token, or the expected position for an
    /// omission
    pub line: u32,
    pub kind: DiagKind,
    pub message: String,
}

impl Diagnostic {
    pub fn lexer(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            kind: DiagKind::Lexer,
            message: message.into(),
        }
    }

    pub fn value(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            kind: DiagKind::Type,
            message: message.into(),
        }
    }

    pub fn structural(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            kind: DiagKind::Structural,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagKind::Lexer => write!(f, "{}", self.message),
            DiagKind::Type | DiagKind::Structural => {
                write!(f, "line {}: {}", self.line, self.message)
            }
        }
    }
}

/// Ordered, append-only collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Flatten to display strings, the boundary format callers print.
    pub fn rendered(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl IntoIterator for Report {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

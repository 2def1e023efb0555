//! Line-based token types for reply validation
//!
//! A registry reply is line oriented: every physical line carries exactly one
//! unit of meaning, so the lexer emits one token per line and the grammar only
//! ever reasons about whole lines. Each line must be classified into exactly
//! one category, and the classification order matters: a line consisting of a
//! lone repository identifier would also qualify as a generic non-empty line,
//! so the more specific kinds are tried first.
//!
//! # Line Kinds
//!
//! These are the line kinds the stock lexer emits:
//!
//! - Field: `Name: value` or a bare `Name:` (absent value), with optional
//!   bracketed label translations between name and colon
//! - EmptyLine: empty or whitespace only
//! - RoidLine: a lone repository object identifier (`D1234567-LROR`)
//! - NonEmptyLine: any other line with content
//! - Eof: synthetic end-of-input sentinel, one line past the last line
//!
//! The set is open: a transcript or an alternative lexer may emit further
//! kinds (AnyLine exists for that purpose); the validator only distinguishes
//! fields, end of input, and "everything else".

use std::fmt;

use serde::{Deserialize, Serialize};

/// The classification of a reply line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// `Name: value` line, possibly with an absent value
    Field,

    /// Empty or whitespace-only line
    EmptyLine,

    /// Any other line with visible content
    NonEmptyLine,

    /// Wildcard kind for transcripts; the stock lexer never emits it
    AnyLine,

    /// A lone repository object identifier
    RoidLine,

    /// End-of-input sentinel
    Eof,
}

impl LineKind {
    /// Format the kind as grammar notation, e.g. `<non-empty-line>`.
    pub fn as_grammar_str(&self) -> &'static str {
        match self {
            LineKind::Field => "<field>",
            LineKind::EmptyLine => "<empty-line>",
            LineKind::NonEmptyLine => "<non-empty-line>",
            LineKind::AnyLine => "<any-line>",
            LineKind::RoidLine => "<roid-line>",
            LineKind::Eof => "<eof>",
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_grammar_str())
    }
}

/// Payload of a [`LineKind::Field`] token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldData {
    /// Canonical field name, exactly as written before the colon
    pub name: String,

    /// Bracketed label translations between the name and the colon
    pub translations: Vec<String>,

    /// The field value; `None` for a bare `Name:` line
    pub value: Option<String>,
}

impl FieldData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            translations: Vec::new(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translations.push(translation.into());
        self
    }
}

/// Kind-specific token payload. Only the field payload has structure the
/// validator looks into; everything else is opaque line text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenData {
    Field(FieldData),
    Text(String),
    None,
}

/// One classified reply line.
///
/// Tokens carry the notes the lexer attached while reading the line (for
/// example an over-long-line warning). The validator forwards those notes
/// into its report whenever the token is consumed, even on otherwise silent
/// optional paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: LineKind,
    pub data: TokenData,

    /// Diagnostics the lexer attached to this line, forwarded verbatim
    pub lexer_notes: Vec<String>,

    /// 1-based source line number
    pub line: u32,
}

impl Token {
    /// A field token with the given payload.
    pub fn field(line: u32, data: FieldData) -> Self {
        Self {
            kind: LineKind::Field,
            data: TokenData::Field(data),
            lexer_notes: Vec::new(),
            line,
        }
    }

    /// An empty (blank) line token.
    pub fn empty(line: u32) -> Self {
        Self {
            kind: LineKind::EmptyLine,
            data: TokenData::None,
            lexer_notes: Vec::new(),
            line,
        }
    }

    /// A token of an arbitrary kind carrying opaque line text.
    pub fn text(line: u32, kind: LineKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            data: TokenData::Text(content.into()),
            lexer_notes: Vec::new(),
            line,
        }
    }

    /// The end-of-input sentinel, positioned one line past the last line.
    pub fn eof(line: u32) -> Self {
        Self {
            kind: LineKind::Eof,
            data: TokenData::None,
            lexer_notes: Vec::new(),
            line,
        }
    }

    /// Attach a lexer note (builder form, used by transcripts).
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.lexer_notes.push(note.into());
        self
    }

    /// Attach a lexer note in place (used by the lexer pipeline).
    pub fn push_note(&mut self, note: impl Into<String>) {
        self.lexer_notes.push(note.into());
    }

    /// The field payload, if this token is a field line.
    pub fn field_data(&self) -> Option<&FieldData> {
        match &self.data {
            TokenData::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == LineKind::Eof
    }
}

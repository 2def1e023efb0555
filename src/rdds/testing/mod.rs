//! Test support for reply validation
//!
//! Scenario tests are written against token transcripts: the exact token
//! sequence a lexer would have produced, scripted by hand so a test controls
//! every line number and lexer note. [`transcript`] plays such a sequence
//! back through the standard cursor.

pub mod transcript;

pub use transcript::{empty_field, field, note_on, transcript};

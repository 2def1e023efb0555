//! # rdds-check
//!
//! A grammar-driven validator for registry directory-service replies.
//!
//! Registry directory services (the port-43 "whois" style interfaces) answer
//! with line-oriented text: `Key: value` fields, repository object
//! identifiers, blank separators, and free-form disclaimer text. This crate
//! checks such a reply against a declarative grammar and reports every
//! violation as a line-anchored diagnostic instead of failing on the first
//! one.
//!
//! The pieces compose as a pipeline:
//!
//! 1. [`rdds::lexing`] turns the raw reply into one classified token per
//!    physical line (plus an end-of-input sentinel).
//! 2. [`rdds::grammar`] describes the expected reply shape: sequences,
//!    choice sections, occurrence quantifiers, and field types.
//! 3. [`rdds::types`] validates scalar field values (hostnames, timestamps,
//!    repository identifiers, ...).
//! 4. [`rdds::validating`] walks the grammar against the token stream with
//!    one-token look-ahead and collects the diagnostics.

pub mod rdds;

pub use rdds::grammar::{Entry, Grammar, GrammarError, Quantifier, RuleBody, Terminal};
pub use rdds::lexing::{ReplyLexer, TokenCursor};
pub use rdds::token::{FieldData, LineKind, Token};
pub use rdds::types::{StandardTypes, TypeRegistry};
pub use rdds::validating::{validate, Diagnostic, Report};

//! Grammar model for reply validation
//!
//! A grammar maps rule names to rule bodies. A body is either a sequence
//! (entries matched in order, each wrapped in an occurrence quantifier) or
//! a choice section (one line that must match exactly one of several field
//! alternatives). The grammar is data: the validator interprets it at run
//! time, so grammars can be built in code, loaded through serde, or
//! assembled by the fluent [`builder`] API.
//!
//! Malformed grammars are programmer errors, not input errors: they are
//! reported through [`GrammarError`] before validation touches a single
//! token, never through the diagnostic report.

pub mod builder;
pub mod catalog;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rdds::types::TypeRegistry;

pub use builder::GrammarBuilder;

/// Occurrence policy attached to a sequence entry.
///
/// `Once` is the default (an entry without an explicit quantifier).
/// The two optional single-occurrence flavors differ only in their empty
/// field handling: `OptionalFree` accepts a bare `Name:` silently, while
/// `OptionalConstrained` ties all constrained siblings of the enclosing
/// sequence into an all-or-none group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantifier {
    Once,
    OptionalConstrained,
    OptionalFree,
    OptionalRepeatable,
    Repeatable,
    RepeatableMax(u32),
}

impl Quantifier {
    /// Whether zero occurrences are acceptable.
    pub fn admits_omission(&self) -> bool {
        matches!(
            self,
            Quantifier::OptionalConstrained
                | Quantifier::OptionalFree
                | Quantifier::OptionalRepeatable
        )
    }

    /// Whether the entry may match more than once.
    pub fn repeats(&self) -> bool {
        matches!(
            self,
            Quantifier::OptionalRepeatable | Quantifier::Repeatable | Quantifier::RepeatableMax(_)
        )
    }
}

impl Default for Quantifier {
    fn default() -> Self {
        Quantifier::Once
    }
}

/// Terminal expectation of a sequence entry. An entry without a terminal
/// refers to another rule by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    /// A field line whose name equals the entry name (case-sensitive)
    Field,
    /// Any line except end of input
    AnyLine,
    /// The end-of-input sentinel
    Eof,
}

/// One element of a sequence: a terminal expectation or a rule reference,
/// wrapped in a quantifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Field name for field terminals, target rule name for references,
    /// informational otherwise
    pub name: String,

    /// Terminal kind; absent means `name` refers to another rule
    pub terminal: Option<Terminal>,

    /// Registry type for the field value (field terminals only)
    pub field_type: Option<String>,

    pub quantifier: Quantifier,
}

impl Entry {
    /// A field terminal with a value type.
    pub fn field(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            terminal: Some(Terminal::Field),
            field_type: Some(field_type.into()),
            quantifier: Quantifier::Once,
        }
    }

    /// An any-line terminal. No name or type matching applies.
    pub fn any_line() -> Self {
        Self {
            name: "any line".to_string(),
            terminal: Some(Terminal::AnyLine),
            field_type: None,
            quantifier: Quantifier::Once,
        }
    }

    /// The end-of-input terminal. The name is informational.
    pub fn eof() -> Self {
        Self {
            name: "EOF".to_string(),
            terminal: Some(Terminal::Eof),
            field_type: None,
            quantifier: Quantifier::Once,
        }
    }

    /// A reference to another rule.
    pub fn rule(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            terminal: None,
            field_type: None,
            quantifier: Quantifier::Once,
        }
    }

    pub fn with_quantifier(mut self, quantifier: Quantifier) -> Self {
        self.quantifier = quantifier;
        self
    }

    /// Human description of the expectation, used in diagnostics.
    pub fn describe(&self) -> String {
        match self.terminal {
            Some(Terminal::Field) => format!("field '{}'", self.name),
            Some(Terminal::AnyLine) => "a line".to_string(),
            Some(Terminal::Eof) => "end of input".to_string(),
            None => format!("'{}' section", self.name),
        }
    }
}

/// One alternative of a choice section. Choice arms never carry their own
/// quantifier; quantification is expressed on the referring entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceArm {
    /// Registry type for the field value
    pub field_type: Option<String>,
}

impl ChoiceArm {
    pub fn typed(field_type: impl Into<String>) -> Self {
        Self {
            field_type: Some(field_type.into()),
        }
    }

    pub fn untyped() -> Self {
        Self { field_type: None }
    }
}

/// A rule body: an ordered sequence or an unordered choice section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleBody {
    Sequence(Vec<Entry>),
    Choice(HashMap<String, ChoiceArm>),
}

/// A named set of rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    rules: HashMap<String, RuleBody>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fluent build; see [`GrammarBuilder`].
    pub fn build() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    pub fn insert(&mut self, name: impl Into<String>, body: RuleBody) {
        self.rules.insert(name.into(), body);
    }

    pub fn rule(&self, name: &str) -> Option<&RuleBody> {
        self.rules.get(name)
    }

    /// Check the grammar invariants against a type registry.
    ///
    /// Verifies that every rule reference resolves, every named type exists
    /// in the registry, and every bounded repetition allows at least one
    /// occurrence. The validator runs this before consuming any input.
    pub fn check<T: TypeRegistry + ?Sized>(&self, types: &T) -> Result<(), GrammarError> {
        for (rule_name, body) in &self.rules {
            match body {
                RuleBody::Sequence(entries) => {
                    for entry in entries {
                        if entry.terminal.is_none() && self.rules.get(&entry.name).is_none() {
                            return Err(GrammarError::UnknownRule {
                                rule: rule_name.clone(),
                                reference: entry.name.clone(),
                            });
                        }
                        if let Some(field_type) = &entry.field_type {
                            if !types.has_type(field_type) {
                                return Err(GrammarError::UnknownType {
                                    rule: rule_name.clone(),
                                    field_type: field_type.clone(),
                                });
                            }
                        }
                        if let Quantifier::RepeatableMax(0) = entry.quantifier {
                            return Err(GrammarError::ZeroRepetitionBound {
                                rule: rule_name.clone(),
                                entry: entry.name.clone(),
                            });
                        }
                    }
                }
                RuleBody::Choice(arms) => {
                    for (arm_name, arm) in arms {
                        if let Some(field_type) = &arm.field_type {
                            if !types.has_type(field_type) {
                                return Err(GrammarError::UnknownType {
                                    rule: format!("{rule_name}/{arm_name}"),
                                    field_type: field_type.clone(),
                                });
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Programmer errors in a grammar. These abort validation immediately and
/// never appear in the diagnostic report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A sequence entry refers to a rule that does not exist
    UnknownRule { rule: String, reference: String },
    /// An entry or choice arm names a type the registry does not know
    UnknownType { rule: String, field_type: String },
    /// A bounded repetition with a zero bound
    ZeroRepetitionBound { rule: String, entry: String },
    /// The rule passed to `validate` does not exist
    NoSuchRule(String),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::UnknownRule { rule, reference } => {
                write!(f, "rule '{rule}' refers to unknown rule '{reference}'")
            }
            GrammarError::UnknownType { rule, field_type } => {
                write!(f, "rule '{rule}' names unknown type '{field_type}'")
            }
            GrammarError::ZeroRepetitionBound { rule, entry } => {
                write!(
                    f,
                    "rule '{rule}' entry '{entry}' has a repetition bound of zero"
                )
            }
            GrammarError::NoSuchRule(name) => write!(f, "no such rule '{name}'"),
        }
    }
}

impl std::error::Error for GrammarError {}

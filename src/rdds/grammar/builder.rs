//! Fluent construction API for grammars
//!
//! Grammars are plain data; this builder only removes the map-insertion
//! boilerplate when assembling them in code:
//!
//! ```
//! use rdds_check::rdds::grammar::{Entry, Grammar, Quantifier};
//!
//! let grammar = Grammar::build()
//!     .sequence(
//!         "reply",
//!         vec![
//!             Entry::field("Domain Name", "hostname"),
//!             Entry::rule("status").with_quantifier(Quantifier::OptionalRepeatable),
//!             Entry::eof(),
//!         ],
//!     )
//!     .choice("status", vec![("Domain Status", "free text")])
//!     .finish();
//! assert!(grammar.rule("status").is_some());
//! ```

use std::collections::HashMap;

use super::{ChoiceArm, Entry, Grammar, RuleBody};

/// Accumulates rules for a [`Grammar`].
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    grammar: Grammar,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sequence rule.
    pub fn sequence(mut self, name: impl Into<String>, entries: Vec<Entry>) -> Self {
        self.grammar.insert(name, RuleBody::Sequence(entries));
        self
    }

    /// Add a choice section from `(field name, type)` pairs.
    pub fn choice(mut self, name: impl Into<String>, arms: Vec<(&str, &str)>) -> Self {
        let arms: HashMap<String, ChoiceArm> = arms
            .into_iter()
            .map(|(arm, field_type)| (arm.to_string(), ChoiceArm::typed(field_type)))
            .collect();
        self.grammar.insert(name, RuleBody::Choice(arms));
        self
    }

    /// Add a choice section with explicit arms.
    pub fn choice_arms(mut self, name: impl Into<String>, arms: HashMap<String, ChoiceArm>) -> Self {
        self.grammar.insert(name, RuleBody::Choice(arms));
        self
    }

    pub fn finish(self) -> Grammar {
        self.grammar
    }
}

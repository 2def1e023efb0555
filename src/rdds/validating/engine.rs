//! Validation engine - rule dispatch, quantifiers, and line matching
//!
//! The engine walks a rule table against the token stream with one-token
//! look-ahead. Four concerns compose here:
//!
//! 1. Dispatch: a sequence walks its entries in order; a choice section
//!    matches at most one line against its alternatives.
//! 2. Matching: a terminal expectation tests the head token and, on match,
//!    consumes it, forwards its lexer notes, and type-checks its value.
//! 3. Quantifiers: every entry match runs through an occurrence policy; an
//!    attempt yields `Matched`, `MatchedEmpty`, or `Declined`.
//! 4. Diagnostics: hard failures append to the report; soft failures in
//!    optional contexts stay silent.
//!
//! Token consumption is the commit signal throughout: an attempt that moved
//! the cursor has committed, one that did not can be declined without a
//! trace. Inside a sub-rule attempt made from an optional context the walk
//! stays in a probing state until the first token is consumed; a required
//! entry that declines while probing bails out of the sub-rule silently
//! instead of diagnosing, which is what lets a whole optional section be
//! omitted without noise.

use std::collections::HashMap;

use crate::rdds::grammar::{ChoiceArm, Entry, Grammar, GrammarError, Quantifier, RuleBody, Terminal};
use crate::rdds::lexing::TokenCursor;
use crate::rdds::token::LineKind;
use crate::rdds::types::TypeRegistry;

use super::diagnostics::{Diagnostic, Report};

/// Outcome of one attempt at an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    /// Tokens were consumed (possibly with diagnostics)
    Matched,
    /// A field with the expected name but an absent value was consumed
    MatchedEmpty { line: u32 },
    /// Nothing was consumed and nothing was reported
    Declined,
}

/// Flow control within one sequence walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// Abort the enclosing sub-rule attempt silently (probing context)
    Bail,
}

/// Outcome classes for the all-or-none group of `OptionalConstrained`
/// entries within one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConstrainedOutcome {
    PresentValue,
    PresentEmpty,
    Omitted,
}

/// Tracks the outcomes of constrained entries across one sequence walk.
#[derive(Debug, Default)]
struct ConstrainedGroup {
    seen: Vec<ConstrainedOutcome>,
}

impl ConstrainedGroup {
    /// Record an outcome; emits a diagnostic when it conflicts with any
    /// earlier outcome. The line is the mismatched token's line for present
    /// outcomes and the expected position for omissions.
    fn observe(
        &mut self,
        outcome: ConstrainedOutcome,
        line: u32,
        name: &str,
        report: &mut Report,
    ) {
        let conflicts = self.seen.iter().any(|earlier| *earlier != outcome);
        if conflicts {
            let state = match outcome {
                ConstrainedOutcome::PresentValue => "has a value",
                ConstrainedOutcome::PresentEmpty => "is empty",
                ConstrainedOutcome::Omitted => "is missing",
            };
            report.push(Diagnostic::structural(
                line,
                format!("field '{name}' {state}, which does not agree with its sibling optional fields"),
            ));
        }
        if !self.seen.contains(&outcome) {
            self.seen.push(outcome);
        }
    }
}

/// One validation run. All state is local to the run; the grammar and the
/// type registry are read-only.
pub struct Engine<'a, C, T>
where
    C: TokenCursor,
    T: TypeRegistry + ?Sized,
{
    grammar: &'a Grammar,
    types: &'a T,
    cursor: &'a mut C,
    report: Report,
}

impl<'a, C, T> Engine<'a, C, T>
where
    C: TokenCursor,
    T: TypeRegistry + ?Sized,
{
    pub fn new(grammar: &'a Grammar, types: &'a T, cursor: &'a mut C) -> Self {
        Self {
            grammar,
            types,
            cursor,
            report: Report::new(),
        }
    }

    /// Validate the stream against `rule` and return the report.
    pub fn run(mut self, rule: &str) -> Result<Report, GrammarError> {
        self.grammar.check(self.types)?;
        if self.grammar.rule(rule).is_none() {
            return Err(GrammarError::NoSuchRule(rule.to_string()));
        }
        self.walk_rule(rule, None, false)?;
        Ok(self.report)
    }

    /// Walk one rule body. `probe` carries the line at which the enclosing
    /// sub-rule attempt started while that attempt is still uncommitted (no
    /// token consumed); `empty_ok` tells a choice body whether the referring
    /// quantifier admits omission.
    fn walk_rule(
        &mut self,
        name: &str,
        probe: Option<u32>,
        empty_ok: bool,
    ) -> Result<Flow, GrammarError> {
        let grammar = self.grammar;
        let body = grammar
            .rule(name)
            .ok_or_else(|| GrammarError::NoSuchRule(name.to_string()))?;

        match body {
            RuleBody::Sequence(entries) => {
                let mut group = ConstrainedGroup::default();
                for entry in entries {
                    if self.apply(entry, &mut group, probe)? == Flow::Bail {
                        return Ok(Flow::Bail);
                    }
                }
                Ok(Flow::Continue)
            }
            RuleBody::Choice(arms) => {
                self.match_choice(arms, empty_ok);
                Ok(Flow::Continue)
            }
        }
    }

    /// Apply one sequence entry under its quantifier.
    fn apply(
        &mut self,
        entry: &Entry,
        group: &mut ConstrainedGroup,
        probe: Option<u32>,
    ) -> Result<Flow, GrammarError> {
        match entry.quantifier {
            Quantifier::Once => {
                let at = self.cursor.line_no();
                match self.attempt(entry, probe)? {
                    Attempt::Matched => Ok(Flow::Continue),
                    Attempt::MatchedEmpty { line } => {
                        self.empty_field(line, &entry.name);
                        Ok(Flow::Continue)
                    }
                    Attempt::Declined => {
                        if probe == Some(at) {
                            return Ok(Flow::Bail);
                        }
                        self.expected(at, entry);
                        Ok(Flow::Continue)
                    }
                }
            }
            Quantifier::OptionalFree => {
                // Declined and empty field are both silently acceptable.
                self.attempt(entry, probe)?;
                Ok(Flow::Continue)
            }
            Quantifier::OptionalConstrained => {
                let at = self.cursor.line_no();
                let outcome = match self.attempt(entry, probe)? {
                    Attempt::Matched => (ConstrainedOutcome::PresentValue, at),
                    Attempt::MatchedEmpty { line } => (ConstrainedOutcome::PresentEmpty, line),
                    Attempt::Declined => (ConstrainedOutcome::Omitted, at),
                };
                group.observe(outcome.0, outcome.1, &entry.name, &mut self.report);
                Ok(Flow::Continue)
            }
            Quantifier::Repeatable => self.repeat(entry, 1, None, probe),
            Quantifier::RepeatableMax(limit) => self.repeat(entry, 1, Some(limit), probe),
            Quantifier::OptionalRepeatable => self.repeat(entry, 0, None, probe),
        }
    }

    /// Drive repeated attempts at one entry. Every attempt probes at its own
    /// start line: a sub-rule whose first required entry declines before
    /// consuming anything ends the repetition silently instead of
    /// diagnosing, which is what lets a repetition over a sequence sub-rule
    /// terminate cleanly on conforming input. Repetition also stops on any
    /// attempt that consumed no tokens (a committed sub-rule can hard-fail
    /// without consuming; looping on it would never make progress). The
    /// minimum is checked after the loop; the maximum is reported on the
    /// attempt that first exceeds it and further matches drain silently.
    fn repeat(
        &mut self,
        entry: &Entry,
        min: u32,
        max: Option<u32>,
        probe: Option<u32>,
    ) -> Result<Flow, GrammarError> {
        let first_at = self.cursor.line_no();
        let mut occurrences = 0u32;

        loop {
            let at = self.cursor.line_no();
            match self.attempt(entry, Some(at))? {
                Attempt::Declined => break,
                Attempt::MatchedEmpty { line } => {
                    // Empty fields are hard failures in every repeating form.
                    self.empty_field(line, &entry.name);
                    occurrences += 1;
                }
                Attempt::Matched => {
                    occurrences += 1;
                    if let Some(limit) = max {
                        if occurrences == limit + 1 {
                            self.report.push(Diagnostic::structural(
                                at,
                                format!("too many repetitions of '{}'", entry.name),
                            ));
                        }
                    }
                }
            }
            if self.cursor.line_no() == at {
                break;
            }
        }

        if occurrences == 0 && min > 0 {
            if probe == Some(first_at) {
                return Ok(Flow::Bail);
            }
            self.expected(first_at, entry);
        }
        Ok(Flow::Continue)
    }

    /// One attempt at an entry: terminal match or sub-rule invocation.
    fn attempt(&mut self, entry: &Entry, probe: Option<u32>) -> Result<Attempt, GrammarError> {
        match entry.terminal {
            Some(Terminal::Field) => Ok(self.attempt_field(entry)),
            Some(Terminal::AnyLine) => Ok(self.attempt_any_line()),
            Some(Terminal::Eof) => Ok(self.attempt_eof()),
            None => self.attempt_rule(&entry.name, entry.quantifier.admits_omission(), probe),
        }
    }

    /// Terminal: a named field line. Soft-declines on any other token.
    fn attempt_field(&mut self, entry: &Entry) -> Attempt {
        let line = self.cursor.line_no();
        let matched = {
            let token = self.cursor.peek_line();
            match token.field_data() {
                Some(field) if token.kind == LineKind::Field && field.name == entry.name => {
                    Some((field.value.clone(), token.lexer_notes.clone()))
                }
                _ => None,
            }
        };

        let (value, notes) = match matched {
            Some(parts) => parts,
            None => return Attempt::Declined,
        };

        self.forward_notes(line, notes);
        let outcome = match value {
            None => Attempt::MatchedEmpty { line },
            Some(value) => {
                if let Some(field_type) = &entry.field_type {
                    for message in self.types.validate_type(field_type, &value) {
                        self.report.push(Diagnostic::value(line, message));
                    }
                }
                Attempt::Matched
            }
        };
        self.cursor.next_line();
        outcome
    }

    /// Terminal: any line except end of input. No name or type checks.
    fn attempt_any_line(&mut self) -> Attempt {
        let line = self.cursor.line_no();
        let notes = {
            let token = self.cursor.peek_line();
            if token.is_eof() {
                return Attempt::Declined;
            }
            token.lexer_notes.clone()
        };
        self.forward_notes(line, notes);
        self.cursor.next_line();
        Attempt::Matched
    }

    /// Terminal: the end-of-input sentinel.
    fn attempt_eof(&mut self) -> Attempt {
        let line = self.cursor.line_no();
        let notes = {
            let token = self.cursor.peek_line();
            if !token.is_eof() {
                return Attempt::Declined;
            }
            token.lexer_notes.clone()
        };
        self.forward_notes(line, notes);
        self.cursor.next_line();
        Attempt::Matched
    }

    /// Sub-rule invocation. The line number before the walk is the commit
    /// watermark: consumption or new diagnostics make the attempt a match,
    /// a perfectly silent walk is a decline.
    fn attempt_rule(
        &mut self,
        name: &str,
        admits_omission: bool,
        probe: Option<u32>,
    ) -> Result<Attempt, GrammarError> {
        let line_before = self.cursor.line_no();
        let report_before = self.report.len();

        let inner_probe = if admits_omission {
            Some(line_before)
        } else {
            probe
        };
        self.walk_rule(name, inner_probe, admits_omission)?;

        let consumed = self.cursor.line_no() > line_before;
        let diagnosed = self.report.len() > report_before;
        Ok(if consumed || diagnosed {
            Attempt::Matched
        } else {
            Attempt::Declined
        })
    }

    /// Choice section: one line against a set of field alternatives.
    /// Advances by exactly one token or not at all.
    fn match_choice(&mut self, arms: &HashMap<String, ChoiceArm>, empty_ok: bool) {
        let line = self.cursor.line_no();
        let matched = {
            let token = self.cursor.peek_line();
            match token.field_data() {
                Some(field) if token.kind == LineKind::Field && arms.contains_key(&field.name) => {
                    Some((
                        field.name.clone(),
                        field.value.clone(),
                        token.lexer_notes.clone(),
                    ))
                }
                _ => None,
            }
        };

        let (name, value, notes) = match matched {
            Some(parts) => parts,
            None => return,
        };

        self.forward_notes(line, notes);
        match value {
            None => {
                if !empty_ok {
                    self.empty_field(line, &name);
                }
            }
            Some(value) => {
                if let Some(field_type) = &arms[&name].field_type {
                    for message in self.types.validate_type(field_type, &value) {
                        self.report.push(Diagnostic::value(line, message));
                    }
                }
            }
        }
        self.cursor.next_line();
    }

    fn forward_notes(&mut self, line: u32, notes: Vec<String>) {
        for note in notes {
            self.report.push(Diagnostic::lexer(line, note));
        }
    }

    fn empty_field(&mut self, line: u32, name: &str) {
        self.report.push(Diagnostic::structural(
            line,
            format!("field '{name}' must not be empty"),
        ));
    }

    fn expected(&mut self, line: u32, entry: &Entry) {
        self.report.push(Diagnostic::structural(
            line,
            format!("expected {}", entry.describe()),
        ));
    }
}

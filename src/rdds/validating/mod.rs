//! Grammar-driven validation of a reply token stream
//!
//! The public entry point is [`validate`]: resolve a rule in a grammar,
//! reconcile it against the cursor's token stream, and return every
//! violation as a line-anchored [`Diagnostic`]. Validation never
//! short-circuits on the first problem; it keeps walking so one run reports
//! as many independent violations as it can reach.
//!
//! Malformed grammars (unknown rules or types, zero repetition bounds) are
//! programmer errors and surface as `Err(GrammarError)` before any token is
//! consumed; they never mix into the diagnostic report.

pub mod diagnostics;
pub mod engine;

pub use diagnostics::{DiagKind, Diagnostic, Report};
pub use engine::Engine;

use crate::rdds::grammar::{Grammar, GrammarError};
use crate::rdds::lexing::TokenCursor;
use crate::rdds::types::TypeRegistry;

/// Validate the cursor's token stream against `rule`.
///
/// The report is empty exactly when the input conforms. Diagnostics appear
/// in production order, which in practice is monotone non-decreasing by
/// line number.
pub fn validate<C, T>(
    rule: &str,
    cursor: &mut C,
    grammar: &Grammar,
    types: &T,
) -> Result<Report, GrammarError>
where
    C: TokenCursor,
    T: TypeRegistry + ?Sized,
{
    Engine::new(grammar, types, cursor).run(rule)
}

//! Lexing pipeline for registry replies
//!
//! The pipeline has two stages:
//!
//! 1. Core tokenization using the logos lexer. See [tokenizer]. Each
//!    physical line is tokenized on its own; a reply line never spans
//!    line breaks, so there is no cross-line lexer state.
//! 2. Line classification. See [line_classification]. The raw tokens of
//!    a line are folded into exactly one classified [`Token`], and a
//!    synthetic end-of-input token closes the stream.
//!
//! The validator consumes the result through the [`TokenCursor`] capability:
//! peek the head token, advance by one, and ask for the head's 1-based line
//! number. [`ReplyLexer`] is the production cursor over a raw reply string.

pub mod cursor;
pub mod line_classification;
pub mod tokenizer;

pub use cursor::{ReplyLexer, TokenCursor};
pub use line_classification::classify_line;

use crate::rdds::token::Token;

/// Maximum line length (in octets) before the lexer attaches a note.
pub const MAX_LINE_OCTETS: usize = 512;

/// Read a raw reply into classified line tokens plus the end-of-input
/// sentinel. Lines longer than [`MAX_LINE_OCTETS`] keep their classification
/// but carry a lexer note, which the validator forwards into its report.
pub fn read_lines(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut line_no = 0u32;

    for raw in source.lines() {
        line_no += 1;
        let mut token = classify_line(raw, line_no);
        if raw.len() > MAX_LINE_OCTETS {
            token.push_note(format!(
                "line {} exceeds {} octets ({} octets)",
                line_no,
                MAX_LINE_OCTETS,
                raw.len()
            ));
        }
        tokens.push(token);
    }

    tokens.push(Token::eof(line_no + 1));
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdds::token::LineKind;

    #[test]
    fn test_read_lines_appends_eof_sentinel() {
        let tokens = read_lines("Domain Name: EXAMPLE.ORG\n\nsome text\n");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].kind, LineKind::Field);
        assert_eq!(tokens[1].kind, LineKind::EmptyLine);
        assert_eq!(tokens[2].kind, LineKind::NonEmptyLine);
        assert_eq!(tokens[3].kind, LineKind::Eof);
        assert_eq!(tokens[3].line, 4);
    }

    #[test]
    fn test_empty_input_is_just_eof() {
        let tokens = read_lines("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
        assert_eq!(tokens[0].line, 1);
    }

    #[test]
    fn test_long_line_gets_a_note() {
        let long = format!("Remark: {}", "x".repeat(600));
        let tokens = read_lines(&long);
        assert_eq!(tokens[0].kind, LineKind::Field);
        assert_eq!(tokens[0].lexer_notes.len(), 1);
        assert!(tokens[0].lexer_notes[0].contains("exceeds 512 octets"));
    }
}

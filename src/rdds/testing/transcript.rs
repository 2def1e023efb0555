//! Scripted token transcripts
//!
//! A transcript is the list of tokens a lexer would have emitted, written
//! out literally. The helpers here keep scenario tests close to the shape
//! they are specified in: one constructor call per transcript line.

use crate::rdds::lexing::ReplyLexer;
use crate::rdds::token::{FieldData, Token};

/// Play back a scripted token sequence through the standard cursor. The
/// end-of-input sentinel is appended automatically when the script does not
/// end with one.
pub fn transcript(tokens: Vec<Token>) -> ReplyLexer {
    ReplyLexer::from_tokens(tokens)
}

/// A field token with a value.
pub fn field(line: u32, name: &str, value: &str) -> Token {
    Token::field(line, FieldData::new(name).with_value(value))
}

/// A field token with an absent value (a bare `Name:` line).
pub fn empty_field(line: u32, name: &str) -> Token {
    Token::field(line, FieldData::new(name))
}

/// Attach a lexer note to a token.
pub fn note_on(token: Token, note: &str) -> Token {
    token.with_note(note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdds::lexing::TokenCursor;
    use crate::rdds::token::LineKind;

    #[test]
    fn test_transcript_plays_back_in_order() {
        let mut cursor = transcript(vec![
            field(1, "Domain Name", "EXAMPLE.ORG"),
            empty_field(2, "Referral URL"),
        ]);
        assert_eq!(cursor.peek_line().kind, LineKind::Field);
        assert_eq!(cursor.line_no(), 1);
        cursor.next_line();
        assert_eq!(cursor.line_no(), 2);
        assert!(cursor.peek_line().field_data().unwrap().value.is_none());
        cursor.next_line();
        assert!(cursor.peek_line().is_eof());
        assert_eq!(cursor.line_no(), 3);
    }

    #[test]
    fn test_note_rides_along() {
        let token = note_on(field(1, "Domain Name", "EXAMPLE.ORG"), "BOOM!");
        assert_eq!(token.lexer_notes, vec!["BOOM!"]);
    }
}

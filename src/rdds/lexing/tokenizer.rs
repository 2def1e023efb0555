//! Base tokenization for reply lines
//!
//! This module provides the raw tokenization using the logos lexer library.
//! This is the entry point where a single reply line becomes a token stream.
//!
//! Classification operates on the token stream produced here; it never goes
//! back to the raw string except to slice a value span out of it.

use logos::Logos;

/// Raw tokens within one reply line.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum RawToken {
    #[token(":")]
    Colon,

    #[token("[")]
    OpenBracket,

    #[token("]")]
    CloseBracket,

    #[regex(r"[ \t]+")]
    Whitespace,

    // Catch-all for runs of non-special characters
    #[regex(r"[^ \t:\[\]]+", |lex| lex.slice().to_string())]
    Text(String),
}

/// Tokenize one reply line with location information.
///
/// Returns tokens paired with their byte spans within the line. Characters
/// logos cannot match (there are none in the token set above, which covers
/// all of UTF-8) would simply be skipped.
pub fn tokenize_line(line: &str) -> Vec<(RawToken, std::ops::Range<usize>)> {
    let mut lexer = RawToken::lexer(line);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizes_field_line() {
        let tokens = tokenize_line("Domain Name: EXAMPLE.ORG");
        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[0].0, RawToken::Text("Domain".to_string()));
        assert_eq!(tokens[1].0, RawToken::Whitespace);
        assert_eq!(tokens[2].0, RawToken::Text("Name".to_string()));
        assert_eq!(tokens[3].0, RawToken::Colon);
        assert_eq!(tokens[4].0, RawToken::Whitespace);
        assert_eq!(tokens[5].0, RawToken::Text("EXAMPLE.ORG".to_string()));
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(tokenize_line(""), vec![]);
    }

    #[test]
    fn test_brackets_are_their_own_tokens() {
        let tokens = tokenize_line("Domain Name [JP]:");
        let kinds: Vec<_> = tokens.iter().map(|(t, _)| t.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                RawToken::Text("Domain".to_string()),
                RawToken::Whitespace,
                RawToken::Text("Name".to_string()),
                RawToken::Whitespace,
                RawToken::OpenBracket,
                RawToken::Text("JP".to_string()),
                RawToken::CloseBracket,
                RawToken::Colon,
            ]
        );
    }

    #[test]
    fn test_spans_slice_back_into_the_line() {
        let line = "Registrar: Example Registrar, Inc.";
        for (token, span) in tokenize_line(line) {
            if let RawToken::Text(text) = token {
                assert_eq!(&line[span], text);
            }
        }
    }
}

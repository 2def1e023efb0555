//! Line Classification
//!
//! Core classification logic for determining line kinds based on raw token
//! patterns. The order of checks is crucial: a lone repository identifier
//! would also pass the generic non-empty check, and a field line must only
//! be recognized when its colon really separates a label from a value.

use once_cell::sync::Lazy;
use regex::Regex;

use super::tokenizer::{tokenize_line, RawToken};
use crate::rdds::token::{FieldData, LineKind, Token};

/// Shape of a lone repository object identifier, e.g. `D1234567-LROR`.
static ROID_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{1,80}-[A-Za-z0-9]+$").unwrap());

/// Determine the token for a reply line.
///
/// Classification order, first match wins:
/// 1. blank line (empty or whitespace only)
/// 2. lone repository object identifier
/// 3. field line (`Name: value`, `Name:`, `Name [translation]: value`)
/// 4. anything else is a non-empty line
pub fn classify_line(raw: &str, line: u32) -> Token {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Token::empty(line);
    }
    if ROID_LINE_REGEX.is_match(trimmed) {
        return Token::text(line, LineKind::RoidLine, trimmed);
    }
    if let Some(field) = parse_field(raw) {
        return Token::field(line, field);
    }
    Token::text(line, LineKind::NonEmptyLine, trimmed)
}

/// Try to read a field shape out of a line.
///
/// A field line is `name-words bracket-groups? ':' value?` where the colon is
/// followed by whitespace or ends the line. The colon-followed-by-whitespace
/// requirement keeps URLs (`http://...`) and timestamps out of the field
/// category.
fn parse_field(raw: &str) -> Option<FieldData> {
    let tokens = tokenize_line(raw);

    let mut name_parts: Vec<&str> = Vec::new();
    let mut translations: Vec<String> = Vec::new();
    let mut colon_end: Option<usize> = None;

    let mut idx = 0;
    while idx < tokens.len() {
        match &tokens[idx].0 {
            RawToken::Whitespace => idx += 1,
            RawToken::Text(text) => {
                // Name words must all come before the first bracket group.
                if !translations.is_empty() {
                    return None;
                }
                name_parts.push(text);
                idx += 1;
            }
            RawToken::OpenBracket => {
                let (translation, next) = read_bracket_group(&tokens, idx + 1)?;
                translations.push(translation);
                idx = next;
            }
            RawToken::Colon => {
                colon_end = Some(tokens[idx].1.end);
                break;
            }
            RawToken::CloseBracket => return None,
        }
    }

    let colon_end = colon_end?;
    if name_parts.is_empty() {
        return None;
    }

    let rest = &raw[colon_end..];
    if !(rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t')) {
        return None;
    }

    let value = rest.trim();
    let mut field = FieldData::new(name_parts.join(" "));
    field.translations = translations;
    if !value.is_empty() {
        field.value = Some(value.to_string());
    }
    Some(field)
}

/// Read the contents of one bracket group starting just past `[`.
/// Returns the joined text and the index just past the closing bracket.
fn read_bracket_group(
    tokens: &[(RawToken, std::ops::Range<usize>)],
    mut idx: usize,
) -> Option<(String, usize)> {
    let mut parts: Vec<&str> = Vec::new();
    while idx < tokens.len() {
        match &tokens[idx].0 {
            RawToken::CloseBracket => return Some((parts.join(" "), idx + 1)),
            RawToken::Text(text) => {
                parts.push(text);
                idx += 1;
            }
            RawToken::Whitespace => idx += 1,
            // A colon or nested bracket inside a group is not a field label.
            _ => return None,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_blank_line() {
        assert_eq!(classify_line("", 1).kind, LineKind::EmptyLine);
        assert_eq!(classify_line("   \t ", 1).kind, LineKind::EmptyLine);
    }

    #[test]
    fn test_classify_field_with_value() {
        let token = classify_line("Domain Name: EXAMPLE.ORG", 1);
        assert_eq!(token.kind, LineKind::Field);
        let field = token.field_data().unwrap();
        assert_eq!(field.name, "Domain Name");
        assert_eq!(field.value.as_deref(), Some("EXAMPLE.ORG"));
    }

    #[test]
    fn test_classify_field_without_value() {
        let token = classify_line("Referral URL:", 1);
        let field = token.field_data().unwrap();
        assert_eq!(field.name, "Referral URL");
        assert_eq!(field.value, None);
    }

    #[test]
    fn test_classify_field_with_translations() {
        let token = classify_line("Domain Name [JP] [Nihongo]: EXAMPLE.JP", 1);
        let field = token.field_data().unwrap();
        assert_eq!(field.name, "Domain Name");
        assert_eq!(field.translations, vec!["JP", "Nihongo"]);
        assert_eq!(field.value.as_deref(), Some("EXAMPLE.JP"));
    }

    #[test]
    fn test_url_is_not_a_field() {
        // The colon in a URL is not followed by whitespace.
        let token = classify_line("http://www.example.org/", 1);
        assert_eq!(token.kind, LineKind::NonEmptyLine);
    }

    #[test]
    fn test_roid_line() {
        let token = classify_line("D1234567-LROR", 1);
        assert_eq!(token.kind, LineKind::RoidLine);
        let token = classify_line("  EXAMPLE-REP  ", 1);
        assert_eq!(token.kind, LineKind::RoidLine);
    }

    #[test]
    fn test_free_text_is_non_empty_line() {
        let token = classify_line("TERMS OF USE", 1);
        assert_eq!(token.kind, LineKind::NonEmptyLine);
    }

    #[test]
    fn test_text_after_translation_group_is_not_a_field() {
        let token = classify_line("Domain [JP] Name: x", 1);
        assert_eq!(token.kind, LineKind::NonEmptyLine);
    }

    #[test]
    fn test_leading_indentation_is_tolerated() {
        let token = classify_line("   Name Server: NS1.EXAMPLE.ORG", 1);
        let field = token.field_data().unwrap();
        assert_eq!(field.name, "Name Server");
        assert_eq!(field.value.as_deref(), Some("NS1.EXAMPLE.ORG"));
    }
}

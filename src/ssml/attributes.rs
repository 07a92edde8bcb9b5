//! Attribute sub-tokenizer and extractor
//!
//!     Attributes are read from the literal text of a single opening or self-closing
//!     tag. The tag is first split into parts by a logos lexer; every part is a maximal
//!     run of one character class, so the lexer never has to backtrack. Attribute tokens
//!     are then the windows of that part stream shaped like
//!
//!         Name Space? Equals Space? Quote <value parts> Quote
//!
//!     where a name is a run of `[:A-Za-z0-9]` and the value parts only contain
//!     `[A-Za-z0-9 .-]`. A window that does not fit is skipped and matching resumes at
//!     the next part, so malformed attributes are dropped silently while well-formed
//!     neighbours are still found.

use crate::ssml::ast::Attribute;
use crate::ssml::lexing::strip_control_characters;
use crate::ssml::token::Token;
use logos::Logos;
use std::ops::Range;

/// Character-class runs inside a tag.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum TagPart {
    #[regex("[:a-zA-Z0-9]+")]
    Name,

    #[regex(" +")]
    Space,

    #[token("=")]
    Equals,

    #[token("\"")]
    Quote,

    #[regex(r#"[^:a-zA-Z0-9 ="]"#)]
    Other,
}

type Part = (TagPart, Range<usize>);

fn lex_parts(source: &str) -> Vec<Part> {
    TagPart::lexer(source)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|part| (part, span)))
        .collect()
}

fn is_value_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '-')
}

fn skip_space(parts: &[Part], index: usize) -> usize {
    match parts.get(index) {
        Some((TagPart::Space, _)) => index + 1,
        _ => index,
    }
}

fn expect(parts: &[Part], index: usize, kind: TagPart) -> Option<&Range<usize>> {
    parts
        .get(index)
        .filter(|(part, _)| *part == kind)
        .map(|(_, span)| span)
}

/// Try to match one attribute starting at `start`.
///
/// Returns the byte range of the whole `name="value"` text and the index of the
/// first part after it.
fn match_attribute(parts: &[Part], source: &str, start: usize) -> Option<(Range<usize>, usize)> {
    let name = expect(parts, start, TagPart::Name)?;
    let mut index = skip_space(parts, start + 1);
    expect(parts, index, TagPart::Equals)?;
    index = skip_space(parts, index + 1);
    expect(parts, index, TagPart::Quote)?;
    index += 1;

    loop {
        let (part, span) = parts.get(index)?;
        match part {
            TagPart::Quote => return Some((name.start..span.end, index + 1)),
            TagPart::Equals => return None,
            _ if source[span.clone()].chars().all(is_value_char) => index += 1,
            _ => return None,
        }
    }
}

/// Extract the `name="value"` tokens from the literal text of a tag.
///
/// Each token keeps the exact source text, including any spaces around `=`.
pub fn tokenize_attributes(input: &str) -> Vec<Token> {
    let cleaned = strip_control_characters(input);
    let source = cleaned.trim();
    let parts = lex_parts(source);

    let mut tokens = Vec::new();
    let mut index = 0;
    while index < parts.len() {
        match match_attribute(&parts, source, index) {
            Some((span, next)) => {
                tokens.push(Token::new(&source[span]));
                index = next;
            }
            None => index += 1,
        }
    }
    tokens
}

/// The Attribute Extractor: attributes of a tag in declaration order.
///
/// Tags without attributes, closing tags and text all yield an empty list.
pub fn parse_attributes(input: &str) -> Vec<Attribute> {
    attributes_from_tokens(&tokenize_attributes(input))
}

pub(crate) fn attributes_from_tokens(tokens: &[Token]) -> Vec<Attribute> {
    tokens.iter().map(Attribute::from_token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        tokenize_attributes(input)
            .into_iter()
            .map(|token| token.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_no_attributes() {
        assert!(tokenize_attributes("<speak>").is_empty());
        assert!(tokenize_attributes("<speak      >").is_empty());
        assert!(tokenize_attributes("</speak>").is_empty());
        assert!(parse_attributes("plain text").is_empty());
    }

    #[test]
    fn test_single_attribute() {
        assert_eq!(texts(r#"<speak attr="test">"#), vec![r#"attr="test""#]);
    }

    #[test]
    fn test_attributes_keep_declaration_order() {
        let attributes = parse_attributes(r#"<speak version="1.0" xml:lang="en-US">"#);
        assert_eq!(
            attributes,
            vec![
                Attribute::new("version", "1.0"),
                Attribute::new("xml:lang", "en-US"),
            ]
        );
    }

    #[test]
    fn test_spaces_around_equals() {
        assert_eq!(texts(r#"<break time  =  "3s"/>"#), vec![r#"time  =  "3s""#]);
        assert_eq!(
            parse_attributes(r#"<break time  =  "3s"/>"#),
            vec![Attribute::new("time", "  3s")]
        );
    }

    #[test]
    fn test_value_with_spaces_and_punctuation() {
        assert_eq!(
            parse_attributes(r#"<voice name="en-US Jenny 2.0">"#),
            vec![Attribute::new("name", "en-US Jenny 2.0")]
        );
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(
            parse_attributes(r#"<mark name="">"#),
            vec![Attribute::new("name", "")]
        );
    }

    #[test]
    fn test_invalid_value_is_dropped() {
        assert_eq!(
            parse_attributes(r#"<audio src="a_b.wav" level="strong">"#),
            vec![Attribute::new("level", "strong")]
        );
    }

    #[test]
    fn test_unterminated_value_recovers_next_attribute() {
        assert_eq!(texts(r#"<x a="p q="r">"#), vec![r#"q="r""#]);
    }

    #[test]
    fn test_name_after_underscore() {
        assert_eq!(texts(r#"<x foo_bar="1">"#), vec![r#"bar="1""#]);
    }

    #[test]
    fn test_adjacent_attributes() {
        assert_eq!(texts(r#"<x a="1"b="2">"#), vec![r#"a="1""#, r#"b="2""#]);
    }

    #[test]
    fn test_single_quotes_are_not_recognized() {
        assert!(parse_attributes("<x a='1'>").is_empty());
    }

    #[test]
    fn test_control_characters_are_ignored() {
        assert_eq!(
            parse_attributes("<x\n\t a=\"1\"\r>"),
            vec![Attribute::new("a", "1")]
        );
    }
}

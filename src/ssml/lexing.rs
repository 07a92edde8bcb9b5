//! Lexer
//!
//!     This module turns raw markup into a flat sequence of tag and text tokens. Lexing
//!     runs in two steps: the source is normalized, then a character-class scanner
//!     segments the normalized string left to right.
//!
//! Normalization
//!
//!     Applied in this order:
//!         1. Tab, newline and carriage-return characters are removed (they collapse to
//!            nothing, not to a space).
//!         2. The escapes `&lt;`, `&gt;` and `&amp;` are replaced by `<`, `>` and `&`.
//!            This is a single pass: replacement output is never re-scanned, and any
//!            other `&` sequence is copied through unchanged.
//!         3. Leading and trailing whitespace is trimmed.
//!
//!     Note that escapes are resolved before segmentation, so `&lt;b&gt;` lexes as the
//!     tag `<b>`.
//!
//! Segmentation
//!
//!     At each position the scanner tries, in order:
//!         - a tag: `<`, then any run of tag characters (ASCII letters, digits, space and
//!           `_ / = - " . :`), then `>`. If the run stops on anything but `>`, the `<`
//!           is dropped and scanning resumes after it.
//!         - a text run: zero or more spaces followed by a character that is not `<`,
//!           `>` or whitespace. The run extends to the next `<`, `>` or the end of input
//!           and is emitted with its trailing whitespace trimmed.
//!     Characters that can start neither are dropped one at a time. Nesting is not
//!     checked here; that is the tree builder's job.
//!
//!     Whitespace here means ASCII whitespace; U+00A0 and other Unicode spaces are
//!     ordinary text characters. Normalization's trim is the one exception and strips
//!     Unicode whitespace at both ends of the document.
//!
//!     Every character is examined a bounded number of times: a run of spaces that
//!     does not lead into text is skipped in one step, and a tag candidate that fails
//!     only drops its `<`.

use crate::ssml::attributes;
use crate::ssml::token::{Token, GREATER_THAN, LESS_THAN};
use std::ops::Range;

const ESCAPES: [(&str, char); 3] = [("&lt;", '<'), ("&gt;", '>'), ("&amp;", '&')];

/// Produces tokens from markup.
///
/// The parser is generic over this seam so alternative segmentations can be plugged
/// in without touching tree building.
pub trait Tokenizer {
    /// Split a whole markup document into tag and text tokens.
    fn tokenize(&self, input: &str) -> Vec<Token>;

    /// Extract the `name="value"` tokens from the literal text of one tag.
    fn tokenize_attributes(&self, input: &str) -> Vec<Token>;
}

/// The default tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, input: &str) -> Vec<Token> {
        tokenize(input)
    }

    fn tokenize_attributes(&self, input: &str) -> Vec<Token> {
        attributes::tokenize_attributes(input)
    }
}

/// Tokenize markup, discarding positions.
pub fn tokenize(input: &str) -> Vec<Token> {
    let normalized = normalize(input);
    scan(&normalized)
        .into_iter()
        .map(|range| Token::new(&normalized[range]))
        .collect()
}

/// Tokenize markup, keeping the byte range of every token.
///
/// Ranges index into the normalized source (see [`normalize`]), not the raw input.
pub fn tokenize_with_spans(input: &str) -> Vec<(Token, Range<usize>)> {
    let normalized = normalize(input);
    scan(&normalized)
        .into_iter()
        .map(|range| (Token::new(&normalized[range.clone()]), range))
        .collect()
}

/// Apply the normalization steps described in the module docs.
pub fn normalize(input: &str) -> String {
    let stripped = strip_control_characters(input);
    replace_escapes(&stripped).trim().to_string()
}

/// Remove tab, newline and carriage-return characters.
pub(crate) fn strip_control_characters(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

fn replace_escapes(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(at) = rest.find('&') {
        output.push_str(&rest[..at]);
        rest = &rest[at..];
        match ESCAPES.iter().find(|(escape, _)| rest.starts_with(escape)) {
            Some((escape, literal)) => {
                output.push(*literal);
                rest = &rest[escape.len()..];
            }
            None => {
                output.push('&');
                rest = &rest[1..];
            }
        }
    }
    output.push_str(rest);
    output
}

/// Characters allowed between the angle brackets of a tag.
pub(crate) fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '/' | '=' | '-' | '"' | '.' | ':' | ' ')
}

/// Whitespace in the sense of the segmentation rules: ASCII only, so U+00A0 and
/// other Unicode spaces count as text.
fn is_space(c: char) -> bool {
    c.is_ascii_whitespace()
}

fn is_text_start(c: char) -> bool {
    c != LESS_THAN && c != GREATER_THAN && !is_space(c)
}

/// Segment a normalized string into token ranges.
fn scan(source: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut pos = 0;

    while let Some(c) = source[pos..].chars().next() {
        let next = match c {
            LESS_THAN => match scan_tag(source, pos) {
                Some(end) => {
                    ranges.push(pos..end);
                    end
                }
                None => pos + c.len_utf8(),
            },
            GREATER_THAN => pos + c.len_utf8(),
            _ => {
                let (content_end, end) = scan_text(source, pos);
                if let Some(content_end) = content_end {
                    ranges.push(pos..content_end);
                }
                end
            }
        };
        pos = next;
    }

    ranges
}

/// Scan a tag starting at the `<` at `start`; returns the end offset past `>`.
fn scan_tag(source: &str, start: usize) -> Option<usize> {
    let body = start + LESS_THAN.len_utf8();
    let len = source[body..]
        .find(|c: char| !is_tag_char(c))
        .unwrap_or(source.len() - body);
    let close = body + len;
    source[close..]
        .starts_with(GREATER_THAN)
        .then_some(close + GREATER_THAN.len_utf8())
}

/// Scan a text run starting at `start`.
///
/// Returns the end of the trimmed content, if a run starts here, and the offset to
/// resume scanning from. Spaces that lead nowhere are skipped as one block.
fn scan_text(source: &str, start: usize) -> (Option<usize>, usize) {
    let rest = &source[start..];
    let leading = rest.len() - rest.trim_start_matches(' ').len();
    match rest[leading..].chars().next() {
        Some(first) if is_text_start(first) => {
            let len = rest.find([LESS_THAN, GREATER_THAN]).unwrap_or(rest.len());
            let content = rest[..len].trim_end_matches(is_space);
            (Some(start + content.len()), start + len)
        }
        Some(first) if leading == 0 => (None, start + first.len_utf8()),
        _ => (None, start + leading),
    }
}

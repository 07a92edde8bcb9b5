//! Token types and tag classification
//!
//!     A token is one lexical unit of the markup: either a whole tag (`<name ...>`,
//!     `</name>`, `<name .../>`) or a contiguous run of text. Tokens carry only their
//!     literal text; the kind is derived from the shape of that text, so a token built
//!     by hand classifies exactly like one produced by the scanner.
//!
//! Classification
//!
//!     The three tag shapes are mutually exclusive. A string such as `</x/>` matches
//!     both the closing and the self-closing shapes, so the checks are ordered:
//!
//!         closing       starts with `</` and ends with `>`
//!         self-closing  starts with `<` and ends with `/>` (and is not closing)
//!         opening       starts with `<` and ends with `>` (and is neither)
//!
//!     Anything else is text.

use serde::Serialize;
use std::fmt;

pub(crate) const LESS_THAN: char = '<';
pub(crate) const GREATER_THAN: char = '>';
pub(crate) const CLOSING_TAG_START: &str = "</";
pub(crate) const SELF_CLOSING_TAG_END: &str = "/>";

/// Shape of a token, derived from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    OpeningTag,
    ClosingTag,
    SelfClosingTag,
    Text,
}

impl TokenKind {
    /// Classify a raw token string.
    pub fn of(value: &str) -> Self {
        if is_closing_tag(value) {
            TokenKind::ClosingTag
        } else if is_self_closing_tag(value) {
            TokenKind::SelfClosingTag
        } else if is_opening_tag(value) {
            TokenKind::OpeningTag
        } else {
            TokenKind::Text
        }
    }

    pub fn is_tag(self) -> bool {
        !matches!(self, TokenKind::Text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::OpeningTag => "opening-tag",
            TokenKind::ClosingTag => "closing-tag",
            TokenKind::SelfClosingTag => "self-closing-tag",
            TokenKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// A single tag or text run, immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    value: String,
}

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The literal text of the token.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> TokenKind {
        TokenKind::of(&self.value)
    }

    pub fn is_tag(&self) -> bool {
        self.kind().is_tag()
    }

    pub fn is_opening_tag(&self) -> bool {
        self.kind() == TokenKind::OpeningTag
    }

    pub fn is_closing_tag(&self) -> bool {
        self.kind() == TokenKind::ClosingTag
    }

    pub fn is_self_closing_tag(&self) -> bool {
        self.kind() == TokenKind::SelfClosingTag
    }

    pub fn is_text(&self) -> bool {
        self.kind() == TokenKind::Text
    }

    /// The bare tag name for tags, or the literal text for text runs.
    ///
    /// Tag delimiters are removed, the remainder is trimmed and only the first
    /// whitespace-delimited word is kept, which drops inline attribute text.
    pub fn extract_value(&self) -> String {
        if !self.is_tag() {
            return self.value.clone();
        }
        let stripped = self
            .value
            .replace(CLOSING_TAG_START, "")
            .replace(SELF_CLOSING_TAG_END, "")
            .replace(LESS_THAN, "")
            .replace(GREATER_THAN, "");
        stripped
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::new(value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

fn is_closing_tag(value: &str) -> bool {
    value.starts_with(CLOSING_TAG_START) && value.ends_with(GREATER_THAN)
}

fn is_self_closing_tag(value: &str) -> bool {
    !is_closing_tag(value)
        && value.starts_with(LESS_THAN)
        && value.ends_with(SELF_CLOSING_TAG_END)
}

fn is_opening_tag(value: &str) -> bool {
    !is_closing_tag(value)
        && !is_self_closing_tag(value)
        && value.starts_with(LESS_THAN)
        && value.ends_with(GREATER_THAN)
}

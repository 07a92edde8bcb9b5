//! Tree building
//!
//!     Turns the flat token stream into a single root node. Two designs live side by
//!     side and must agree on every input, trees and warnings alike:
//!
//!         stack      Keeps the currently open elements on an explicit stack. Opening
//!                    tags push, closing tags pop and attach to the new top, text runs
//!                    and self-closing tags attach directly to the top. See [stack].
//!
//!         recursive  One call per open element, walking the token indices with a
//!                    shared high-water mark so that tokens already folded into a deeper
//!                    subtree are never appended to an ancestor. See [recursive].
//!
//!     The stack design is the default. The recursive one uses one stack frame per
//!     nesting level and is kept as the reference form of the algorithm.
//!
//! Shared Rules
//!
//!     - Closing tags before the first other token are skipped.
//!     - The first remaining token is the root. A text run or self-closing tag as the
//!       first token makes the root a leaf.
//!     - A closing tag always closes the innermost open element, whatever its name.
//!     - Tokens after the root has closed are ignored.
//!     - Elements still open at the end of input keep the children built so far.
//!     - At most [MAX_DEPTH] elements are open at once, the root included. An opening
//!       tag beyond that adds no element and its matching closing tag is absorbed, so
//!       the content in between lands in the deepest element that was kept.
//!
//!     None of these situations is an error: each one leaves a [Warning] next to the
//!     best-effort tree, and well-formed input produces no warnings at all.

pub mod recursive;
pub mod stack;

use crate::ssml::ast::Node;
use crate::ssml::attributes::attributes_from_tokens;
use crate::ssml::lexing::Tokenizer;
use crate::ssml::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Most elements open at once, the root included.
pub const MAX_DEPTH: usize = 256;

/// Tree building design.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Builder {
    #[default]
    Stack,
    Recursive,
}

impl Builder {
    pub const ALL: [Builder; 2] = [Builder::Stack, Builder::Recursive];

    pub fn name(self) -> &'static str {
        match self {
            Builder::Stack => "stack",
            Builder::Recursive => "recursive",
        }
    }
}

impl fmt::Display for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Builder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stack" => Ok(Builder::Stack),
            "recursive" => Ok(Builder::Recursive),
            other => Err(format!("Unknown builder: {}", other)),
        }
    }
}

/// Something unexpected that the builder worked around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Warning {
    /// A closing tag appeared before any root element.
    UnmatchedClosingTag { name: String },
    /// A closing tag closed an element with a different name.
    MismatchedClosingTag { expected: String, found: String },
    /// An element was still open at the end of input.
    UnclosedTag { name: String },
    /// Tokens followed the root element and were ignored.
    TrailingContent { tokens: usize },
    /// Elements nested past the limit were folded into their deepest kept ancestor.
    NestingTooDeep { limit: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnmatchedClosingTag { name } => {
                write!(f, "closing tag </{}> has no matching opening tag", name)
            }
            Warning::MismatchedClosingTag { expected, found } => {
                write!(f, "closing tag </{}> closes <{}>", found, expected)
            }
            Warning::UnclosedTag { name } => write!(f, "tag <{}> is never closed", name),
            Warning::TrailingContent { tokens } => {
                write!(f, "{} token(s) after the root element were ignored", tokens)
            }
            Warning::NestingTooDeep { limit } => {
                write!(f, "elements nested deeper than {} levels were flattened", limit)
            }
        }
    }
}

/// Result of a build: the tree, if there was anything to build, and its warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildOutput {
    pub root: Option<Node>,
    pub warnings: Vec<Warning>,
}

impl BuildOutput {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Build the tree for `tokens` with the chosen design.
pub fn build<T>(tokens: &[Token], builder: Builder, tokenizer: &T) -> BuildOutput
where
    T: Tokenizer + ?Sized,
{
    let mut warnings = Vec::new();
    let start = tokens
        .iter()
        .position(|token| !token.is_closing_tag())
        .unwrap_or(tokens.len());

    for token in &tokens[..start] {
        warnings.push(Warning::UnmatchedClosingTag {
            name: token.extract_value(),
        });
    }

    if start == tokens.len() {
        return BuildOutput {
            root: None,
            warnings,
        };
    }

    let (root, end) = match builder {
        Builder::Stack => stack::build_root(tokens, start, tokenizer, &mut warnings),
        Builder::Recursive => recursive::build_root(tokens, start, tokenizer, &mut warnings),
    };

    if end < tokens.len() {
        warnings.push(Warning::TrailingContent {
            tokens: tokens.len() - end,
        });
    }

    BuildOutput {
        root: Some(root),
        warnings,
    }
}

/// Create the node for a single opening, self-closing or text token.
pub(crate) fn node_from_token<T>(token: &Token, tokenizer: &T) -> Node
where
    T: Tokenizer + ?Sized,
{
    if token.is_tag() {
        let attributes = attributes_from_tokens(&tokenizer.tokenize_attributes(token.as_str()));
        Node::element(token.extract_value(), attributes)
    } else {
        Node::text(token.as_str())
    }
}

/// Record a mismatch between a closing tag and the element it closes.
pub(crate) fn check_closing(closed: &Node, closing: &Token, warnings: &mut Vec<Warning>) {
    let found = closing.extract_value();
    if found != closed.value {
        warnings.push(Warning::MismatchedClosingTag {
            expected: closed.value.clone(),
            found,
        });
    }
}

/// Opening tags that were not turned into elements because of [MAX_DEPTH].
#[derive(Debug, Default)]
pub(crate) struct Overflow {
    folded: usize,
    reported: bool,
}

impl Overflow {
    /// Fold an opening tag met at the depth limit. Warns on the first one only.
    pub(crate) fn fold(&mut self, warnings: &mut Vec<Warning>) {
        if !self.reported {
            warnings.push(Warning::NestingTooDeep { limit: MAX_DEPTH });
            self.reported = true;
        }
        self.folded += 1;
    }

    /// Absorb a closing tag if it belongs to a folded opening tag.
    pub(crate) fn absorb(&mut self) -> bool {
        if self.folded == 0 {
            return false;
        }
        self.folded -= 1;
        true
    }
}

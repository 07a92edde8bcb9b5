//! Recursive tree builder with a high-water mark
//!
//!     Every open element gets its own call that walks token indices and appends
//!     children. A nested call consumes tokens up to and including its closing tag, so
//!     when control comes back the caller's index is behind tokens that already belong
//!     to a deeper subtree. The [Cursor] records the furthest index consumed by any
//!     call; an index below that mark is skipped by jumping straight past it.
//!
//!     The cursor is created per build and passed by reference, so concurrent builds
//!     share nothing. Recursion stops at [MAX_DEPTH]; deeper opening tags are folded
//!     into the current element instead of getting a call of their own.

use super::{check_closing, node_from_token, Overflow, Warning, MAX_DEPTH};
use crate::ssml::ast::Node;
use crate::ssml::lexing::Tokenizer;
use crate::ssml::token::{Token, TokenKind};

/// High-water mark over the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    mark: usize,
}

impl Cursor {
    pub fn new(start: usize) -> Self {
        Self { mark: start }
    }

    /// Index of the first token no call has consumed yet.
    pub fn mark(&self) -> usize {
        self.mark
    }

    fn consume(&mut self, index: usize) {
        self.mark = self.mark.max(index + 1);
    }

    fn is_consumed(&self, index: usize) -> bool {
        index < self.mark
    }
}

struct Context<'a, T: ?Sized> {
    tokens: &'a [Token],
    tokenizer: &'a T,
    warnings: &'a mut Vec<Warning>,
    overflow: Overflow,
}

/// Build the root starting at `start`; returns it and the index after its last token.
pub(crate) fn build_root<T>(
    tokens: &[Token],
    start: usize,
    tokenizer: &T,
    warnings: &mut Vec<Warning>,
) -> (Node, usize)
where
    T: Tokenizer + ?Sized,
{
    let first = &tokens[start];
    let mut root = node_from_token(first, tokenizer);
    let mut cursor = Cursor::new(start + 1);

    if first.is_opening_tag() {
        let mut context = Context {
            tokens,
            tokenizer,
            warnings,
            overflow: Overflow::default(),
        };
        add_children(&mut root, 1, &mut cursor, &mut context);
    }

    (root, cursor.mark())
}

fn add_children<T>(
    parent: &mut Node,
    depth: usize,
    cursor: &mut Cursor,
    context: &mut Context<'_, T>,
) where
    T: Tokenizer + ?Sized,
{
    let tokens = context.tokens;
    let mut index = cursor.mark();

    while index < tokens.len() {
        if cursor.is_consumed(index) {
            index = cursor.mark();
            continue;
        }

        let token = &tokens[index];
        cursor.consume(index);

        match token.kind() {
            TokenKind::ClosingTag if context.overflow.absorb() => {}
            TokenKind::ClosingTag => {
                check_closing(parent, token, context.warnings);
                return;
            }
            TokenKind::OpeningTag if depth >= MAX_DEPTH => {
                context.overflow.fold(context.warnings);
            }
            TokenKind::OpeningTag => {
                let mut child = node_from_token(token, context.tokenizer);
                add_children(&mut child, depth + 1, cursor, context);
                parent.children.push(child);
            }
            TokenKind::SelfClosingTag | TokenKind::Text => {
                parent
                    .children
                    .push(node_from_token(token, context.tokenizer));
            }
        }

        index += 1;
    }

    context.warnings.push(Warning::UnclosedTag {
        name: parent.value.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssml::lexing::{tokenize, WordTokenizer};

    #[test]
    fn test_cursor_only_moves_forward() {
        let mut cursor = Cursor::new(3);
        cursor.consume(1);
        assert_eq!(cursor.mark(), 3);
        cursor.consume(5);
        assert_eq!(cursor.mark(), 6);
        assert!(cursor.is_consumed(5));
        assert!(!cursor.is_consumed(6));
    }

    #[test]
    fn test_subtree_tokens_are_not_reappended() {
        let tokens = tokenize("<speak>text<emphasis>emp</emphasis>after</speak>");
        let mut warnings = Vec::new();
        let (root, end) = build_root(&tokens, 0, &WordTokenizer, &mut warnings);

        assert_eq!(end, tokens.len());
        assert!(warnings.is_empty());
        assert_eq!(
            root,
            Node::element("speak", vec![]).with_children(vec![
                Node::text("text"),
                Node::element("emphasis", vec![]).with_children(vec![Node::text("emp")]),
                Node::text("after"),
            ])
        );
    }
}

//! Explicit-stack tree builder
//!
//!     The root is held apart from the stack of open descendants, so the element a
//!     token attaches to is always the top of the stack or, when the stack is empty,
//!     the root itself.

use super::{check_closing, node_from_token, Overflow, Warning, MAX_DEPTH};
use crate::ssml::ast::Node;
use crate::ssml::lexing::Tokenizer;
use crate::ssml::token::{Token, TokenKind};

fn innermost<'a>(root: &'a mut Node, open: &'a mut [Node]) -> &'a mut Node {
    open.last_mut().unwrap_or(root)
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
    if !first.is_opening_tag() {
        return (root, start + 1);
    }

    let mut open: Vec<Node> = Vec::new();
    let mut overflow = Overflow::default();
    for (index, token) in tokens.iter().enumerate().skip(start + 1) {
        match token.kind() {
            TokenKind::ClosingTag if overflow.absorb() => {}
            TokenKind::ClosingTag => match open.pop() {
                Some(closed) => {
                    check_closing(&closed, token, warnings);
                    innermost(&mut root, &mut open).children.push(closed);
                }
                None => {
                    check_closing(&root, token, warnings);
                    return (root, index + 1);
                }
            },
            TokenKind::OpeningTag if open.len() + 1 >= MAX_DEPTH => overflow.fold(warnings),
            TokenKind::OpeningTag => open.push(node_from_token(token, tokenizer)),
            TokenKind::SelfClosingTag | TokenKind::Text => {
                let leaf = node_from_token(token, tokenizer);
                innermost(&mut root, &mut open).children.push(leaf);
            }
        }
    }

    while let Some(unclosed) = open.pop() {
        warnings.push(Warning::UnclosedTag {
            name: unclosed.value.clone(),
        });
        innermost(&mut root, &mut open).children.push(unclosed);
    }
    warnings.push(Warning::UnclosedTag {
        name: root.value.clone(),
    });

    (root, tokens.len())
}

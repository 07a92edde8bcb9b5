//! Tree types produced by the parser
//!
//!     A parsed document is a single root [`Node`]. Element nodes carry a tag name, their
//!     attributes in declaration order and their children in document order. Text nodes
//!     carry a literal text run and are always leaves without attributes.
//!
//!     Nodes own their children exclusively; there are no parent links. Once returned
//!     the tree belongs to the caller and is meant to be walked read-only.
//!
//!     Dropping, [`Node::depth`] and [`Node::descendants`] work without recursion, so
//!     they are safe on trees of any depth. Trees built by the parser are also bounded
//!     by [`MAX_DEPTH`](crate::ssml::building::MAX_DEPTH) open levels.

use crate::ssml::token::Token;
use serde::Serialize;

/// A `name="value"` pair declared inside an opening or self-closing tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Split an attribute token on its first `=`.
    ///
    /// The name is trimmed. The value is everything after the `=` with the double
    /// quotes removed, so spaces between `=` and the opening quote are kept.
    pub fn from_token(token: &Token) -> Self {
        match token.as_str().split_once('=') {
            Some((name, value)) => Attribute::new(name.trim(), value.replace('"', "")),
            None => Attribute::new(token.as_str().trim(), ""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Element,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    /// Tag name for elements, literal text for text runs.
    pub value: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn element(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            kind: NodeKind::Element,
            value: name.into(),
            attributes,
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            value: text.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style helper, mostly for constructing expected trees.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Tag name of an element node.
    pub fn name(&self) -> Option<&str> {
        self.is_element().then_some(self.value.as_str())
    }

    /// Value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// Concatenation of every text run below (and including) this node.
    pub fn text_content(&self) -> String {
        self.descendants()
            .filter(|node| node.is_text())
            .map(|node| node.value.as_str())
            .collect()
    }

    /// Pre-order walk starting with this node.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// First element named `name` in pre-order, this node included.
    pub fn find(&self, name: &str) -> Option<&Node> {
        self.descendants().find(|node| node.name() == Some(name))
    }

    /// Number of levels in the subtree, a leaf counting as one.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            pending.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }
}

impl Drop for Node {
    // Children are detached onto a worklist so that dropping a deep tree does not
    // recurse once per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Iterator returned by [`Node::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::element("speak", vec![Attribute::new("version", "1.0")]).with_children(vec![
            Node::text("Hello "),
            Node::element("emphasis", vec![Attribute::new("level", "strong")])
                .with_children(vec![Node::text("world")]),
            Node::element("break", vec![]),
        ])
    }

    #[test]
    fn test_attribute_from_token() {
        assert_eq!(
            Attribute::from_token(&Token::from(r#"xml:lang="en-US""#)),
            Attribute::new("xml:lang", "en-US")
        );
        assert_eq!(
            Attribute::from_token(&Token::from(r#"time = "3s""#)),
            Attribute::new("time", " 3s")
        );
        assert_eq!(
            Attribute::from_token(&Token::from("dangling")),
            Attribute::new("dangling", "")
        );
    }

    #[test]
    fn test_attribute_lookup() {
        let root = sample();
        assert_eq!(root.attribute("version"), Some("1.0"));
        assert_eq!(root.attribute("missing"), None);
    }

    #[test]
    fn test_descendants_are_pre_order() {
        let values: Vec<_> = sample()
            .descendants()
            .map(|node| node.value.clone())
            .collect();
        assert_eq!(values, vec!["speak", "Hello ", "emphasis", "world", "break"]);
    }

    #[test]
    fn test_text_content() {
        assert_eq!(sample().text_content(), "Hello world");
    }

    #[test]
    fn test_find() {
        let root = sample();
        let emphasis = root.find("emphasis").unwrap();
        assert_eq!(emphasis.attribute("level"), Some("strong"));
        assert!(root.find("world").is_none());
    }

    #[test]
    fn test_text_and_element_are_distinct() {
        let text = Node::text("br");
        let element = Node::element("br", vec![]);
        assert_ne!(text, element);
        assert_eq!(text.name(), None);
        assert_eq!(element.name(), Some("br"));
    }

    #[test]
    fn test_depth() {
        assert_eq!(sample().depth(), 3);
        assert_eq!(Node::text("x").depth(), 1);
    }

    #[test]
    fn test_deep_chain_measures_and_drops() {
        let mut chain = Node::text("x");
        for _ in 0..200_000 {
            chain = Node::element("a", vec![]).with_children(vec![chain]);
        }
        assert_eq!(chain.depth(), 200_001);
        assert_eq!(chain.descendants().count(), 200_001);
        drop(chain);
    }
}

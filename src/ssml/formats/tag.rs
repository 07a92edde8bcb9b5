//! Markup serialization
//!
//! Writes a tree back as compact markup. Trees whose text contains no angle brackets
//! parse back to the same tree:
//!
//! - Elements with children → `<name attr="value">children</name>`
//! - Elements without children → `<name attr="value"/>`
//! - Text → its value with `&`, `<` and `>` escaped
//!
//! No whitespace is added between nodes, since the tokenizer keeps leading spaces of
//! text runs. Escaped brackets are resolved before segmentation, so a `<` in text
//! comes back as markup rather than text.

use super::registry::{FormatError, Formatter};
use crate::ssml::ast::Node;

pub fn serialize_tag(root: &Node) -> String {
    let mut output = String::new();
    serialize_node(root, &mut output);
    output
}

fn serialize_node(node: &Node, output: &mut String) {
    if node.is_text() {
        output.push_str(&escape_text(&node.value));
        return;
    }

    output.push('<');
    output.push_str(&node.value);
    for attribute in &node.attributes {
        output.push_str(&format!(" {}=\"{}\"", attribute.name, attribute.value));
    }

    if node.children.is_empty() {
        output.push_str("/>");
        return;
    }

    output.push('>');
    for child in &node.children {
        serialize_node(child, output);
    }
    output.push_str(&format!("</{}>", node.value));
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Formatter implementation for markup output
pub struct TagFormatter;

impl Formatter for TagFormatter {
    fn name(&self) -> &str {
        "tag"
    }

    fn serialize(&self, root: &Node) -> Result<String, FormatError> {
        Ok(serialize_tag(root))
    }

    fn description(&self) -> &str {
        "Compact markup that parses back to the same tree"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssml::ast::Attribute;
    use crate::ssml::parser::parse_tree;

    #[test]
    fn test_serialize_nested() {
        let root = Node::element("speak", vec![Attribute::new("version", "1.0")]).with_children(
            vec![
                Node::text(" Hi"),
                Node::element("break", vec![Attribute::new("time", "1s")]),
                Node::element("s", vec![]).with_children(vec![Node::text("a & b")]),
            ],
        );
        assert_eq!(
            serialize_tag(&root),
            r#"<speak version="1.0"> Hi<break time="1s"/><s>a &amp; b</s></speak>"#
        );
    }

    #[test]
    fn test_serialized_markup_parses_back() {
        let input = r#"<speak version="1.0"><p><s>One &amp; two</s><break/></p> tail</speak>"#;
        let root = parse_tree(input).unwrap();
        assert_eq!(parse_tree(&serialize_tag(&root)), Some(root));
    }
}

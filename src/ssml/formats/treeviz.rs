//! Treeviz formatter for parsed trees
//!
//! One line per node, nesting drawn with box connectors. The root line carries no
//! connector:
//!
//! ```text
//! ⧉ speak [version=1.0]
//! ├─ ◦ Hello
//! ├─ ◇ emphasis [level=strong]
//! │ └─ ◦ world
//! └─ ◇ break
//! ```
//!
//! Icons
//!     Root: ⧉
//!     Element: ◇
//!     Text: ◦

use super::registry::{FormatError, Formatter};
use crate::ssml::ast::Node;

const ROOT_ICON: &str = "⧉";
const ELEMENT_ICON: &str = "◇";
const TEXT_ICON: &str = "◦";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreevizOptions {
    /// Labels longer than this many characters are cut and suffixed with `...`.
    pub truncate: usize,
    pub show_attributes: bool,
}

impl Default for TreevizOptions {
    fn default() -> Self {
        Self {
            truncate: 30,
            show_attributes: true,
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn label(node: &Node, options: &TreevizOptions) -> String {
    let mut label = truncate(&node.value, options.truncate);
    if options.show_attributes && !node.attributes.is_empty() {
        let attributes = node
            .attributes
            .iter()
            .map(|attribute| format!("{}={}", attribute.name, attribute.value))
            .collect::<Vec<_>>()
            .join(", ");
        label.push_str(&format!(" [{}]", attributes));
    }
    label
}

fn icon(node: &Node) -> &'static str {
    if node.is_text() {
        TEXT_ICON
    } else {
        ELEMENT_ICON
    }
}

fn format_node(
    node: &Node,
    prefix: &str,
    is_last: bool,
    options: &TreevizOptions,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        icon(node),
        label(node, options)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(node, &child_prefix, options, output);
}

fn format_children(node: &Node, prefix: &str, options: &TreevizOptions, output: &mut String) {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        format_node(child, prefix, i + 1 == count, options, output);
    }
}

pub fn to_treeviz_str(root: &Node) -> String {
    to_treeviz_str_with_options(root, &TreevizOptions::default())
}

pub fn to_treeviz_str_with_options(root: &Node, options: &TreevizOptions) -> String {
    let icon = if root.is_text() { TEXT_ICON } else { ROOT_ICON };
    let mut output = format!("{} {}\n", icon, label(root, options));
    format_children(root, "", options, &mut output);
    output
}

/// Formatter implementation for treeviz format
#[derive(Debug, Clone, Default)]
pub struct TreevizFormatter {
    options: TreevizOptions,
}

impl TreevizFormatter {
    pub fn new(options: TreevizOptions) -> Self {
        Self { options }
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, root: &Node) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_options(root, &self.options))
    }

    fn description(&self) -> &str {
        "Visual tree representation with one line per node"
    }
}

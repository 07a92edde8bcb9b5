//! Format registry for tree serialization
//!
//! Each output format implements [`Formatter`]. The registry keeps formatters in
//! registration order and looks them up by name.

use crate::ssml::ast::Node;
use crate::ssml::formats::{
    JsonFormatter, TagFormatter, TreevizFormatter, TreevizOptions, YamlFormatter,
};
use std::fmt;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No formatter registered under this name
    FormatNotFound(String),
    /// The formatter failed to render the tree
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Renders a parsed tree as text.
pub trait Formatter: Send + Sync {
    /// Name used in `ast-<name>` format strings
    fn name(&self) -> &str;

    fn serialize(&self, root: &Node) -> Result<String, FormatError>;

    /// One-line summary shown by `--list-formats`.
    fn description(&self) -> &str;
}

#[derive(Default)]
pub struct FormatRegistry {
    formatters: Vec<Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in formatters, treeviz configured by `options`.
    pub fn with_options(options: TreevizOptions) -> Self {
        let mut registry = Self::new();
        registry.register(TreevizFormatter::new(options));
        registry.register(TagFormatter);
        registry.register(JsonFormatter);
        registry.register(YamlFormatter);
        registry
    }

    pub fn with_defaults() -> Self {
        Self::with_options(TreevizOptions::default())
    }

    /// Add a formatter. A formatter with the same name is replaced in place.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        let position = self
            .formatters
            .iter()
            .position(|existing| existing.name() == formatter.name());
        match position {
            Some(index) => self.formatters[index] = Box::new(formatter),
            None => self.formatters.push(Box::new(formatter)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters
            .iter()
            .find(|formatter| formatter.name() == name)
            .map(|formatter| formatter.as_ref())
    }

    pub fn serialize(&self, root: &Node, format: &str) -> Result<String, FormatError> {
        self.get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?
            .serialize(root)
    }
}

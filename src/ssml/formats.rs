//! Output formats for parsed trees
//!
//!     treeviz  one line per node, see [treeviz]
//!     tag      markup re-serialization, see [tag]
//!     json     serde_json rendering of the node structure
//!     yaml     serde_yaml rendering of the node structure

pub mod registry;
pub mod tag;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use tag::{serialize_tag, TagFormatter};
pub use treeviz::{
    to_treeviz_str, to_treeviz_str_with_options, TreevizFormatter, TreevizOptions,
};

use crate::ssml::ast::Node;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, root: &Node) -> Result<String, FormatError> {
        serde_json::to_string_pretty(root)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, root: &Node) -> Result<String, FormatError> {
        serde_yaml::to_string(root)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML"
    }
}

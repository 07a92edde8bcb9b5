//! # ssml
//!
//! A tokenizer and tree builder for a small speech-synthesis markup dialect.
//!
//! ```text
//! <speak version="1.0"><p><s>Hello <emphasis level="strong">world</emphasis></s></p></speak>
//! ```
//!
//! parses into a single root [`Node`](ssml::ast::Node) with nested element and text
//! children. Parsing never fails: malformed markup yields a best-effort tree together
//! with [`Warning`](ssml::building::Warning)s.
//!
//! The crate deliberately covers a subset of XML: three character escapes, double-quoted
//! attribute values, no comments, CDATA, processing instructions or namespaces.

pub mod ssml;

pub use ssml::ast::{Attribute, Node, NodeKind};
pub use ssml::attributes::{parse_attributes, tokenize_attributes};
pub use ssml::building::{BuildOutput, Builder, Warning, MAX_DEPTH};
pub use ssml::lexing::{tokenize, tokenize_with_spans, Tokenizer, WordTokenizer};
pub use ssml::parser::{parse, parse_tree, ParserConfig, SsmlParser};
pub use ssml::token::{Token, TokenKind};

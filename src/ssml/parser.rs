//! Parser entry points
//!
//!     Parsing is tokenizing followed by tree building. Every call is independent: no
//!     state survives between calls, so a parser can be shared freely across threads.

use crate::ssml::ast::{Attribute, Node};
use crate::ssml::attributes::attributes_from_tokens;
use crate::ssml::building::{build, BuildOutput, Builder};
use crate::ssml::lexing::{Tokenizer, WordTokenizer};
use crate::ssml::token::Token;
use serde::Deserialize;

/// Parser knobs, usually loaded through [`crate::ssml::config`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub builder: Builder,
}

impl ParserConfig {
    pub fn with_builder(builder: Builder) -> Self {
        Self { builder }
    }
}

/// A parser over a pluggable [`Tokenizer`].
#[derive(Debug, Clone, Default)]
pub struct SsmlParser<T: Tokenizer = WordTokenizer> {
    tokenizer: T,
    config: ParserConfig,
}

impl SsmlParser<WordTokenizer> {
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            tokenizer: WordTokenizer,
            config,
        }
    }
}

impl<T: Tokenizer> SsmlParser<T> {
    pub fn new(tokenizer: T) -> Self {
        Self {
            tokenizer,
            config: ParserConfig::default(),
        }
    }

    pub fn builder(mut self, builder: Builder) -> Self {
        self.config.builder = builder;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        self.tokenizer.tokenize(input)
    }

    /// Attributes of one tag, extracted with this parser's tokenizer.
    pub fn parse_attributes(&self, tag: &str) -> Vec<Attribute> {
        attributes_from_tokens(&self.tokenizer.tokenize_attributes(tag))
    }

    /// Parse a document, keeping the warnings.
    pub fn parse(&self, input: &str) -> BuildOutput {
        let tokens = self.tokenizer.tokenize(input);
        build(&tokens, self.config.builder, &self.tokenizer)
    }

    /// Parse a document into its root node; `None` when the input holds no tokens.
    pub fn parse_tree(&self, input: &str) -> Option<Node> {
        self.parse(input).root
    }
}

/// Parse with the default tokenizer and the stack builder.
pub fn parse_tree(input: &str) -> Option<Node> {
    SsmlParser::with_config(ParserConfig::default()).parse_tree(input)
}

/// Parse with the default tokenizer and the given configuration.
pub fn parse(input: &str, config: &ParserConfig) -> BuildOutput {
    SsmlParser::with_config(*config).parse(input)
}

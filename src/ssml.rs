//! Speech-synthesis markup parsing
//!
//!     Raw markup flows one way through the crate:
//!
//!         markup string → tokens (lexing) → node tree (building)
//!
//!     [lexing] normalizes the source and segments it into tag and text tokens,
//!     classified by [token]. [building] reconstructs the nesting from the flat token
//!     stream, reading attributes through [attributes]. [parser] ties both together
//!     behind a pluggable [lexing::Tokenizer]. The outer layers ([formats],
//!     [processor], [config]) serve the command-line tool.

pub mod ast;
pub mod attributes;
pub mod building;
pub mod config;
pub mod formats;
pub mod lexing;
pub mod parser;
pub mod processor;
pub mod token;

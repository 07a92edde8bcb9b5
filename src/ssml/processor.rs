//! Processing API
//!
//! Runs a markup source through a processing stage and renders the result in an
//! output format. Format strings are `<stage>-<format>`:
//!
//! - `token-simple`, `token-json`: the token stream
//! - `ast-treeviz`, `ast-tag`, `ast-json`, `ast-yaml`: the parsed tree
//!
//! ## Example Usage
//!
//! ```rust
//! use ssml::ssml::config::load_defaults;
//! use ssml::ssml::processor::{process_source, ProcessingSpec};
//!
//! let config = load_defaults().unwrap();
//! let spec = ProcessingSpec::from_string("ast-tag").unwrap();
//! let processed = process_source("<speak>hi</speak>", &spec, &config).unwrap();
//! assert_eq!(processed.output, "<speak>hi</speak>");
//! ```

use crate::ssml::building::Warning;
use crate::ssml::config::SsmlConfig;
use crate::ssml::formats::{FormatError, FormatRegistry};
use crate::ssml::lexing::tokenize_with_spans;
use crate::ssml::parser::parse;
use crate::ssml::token::TokenKind;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
    Tag,
    Treeviz,
}

impl OutputFormat {
    fn name(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Tag => "tag",
            OutputFormat::Treeviz => "treeviz",
        }
    }
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-treeviz"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            "tag" => OutputFormat::Tag,
            "treeviz" => OutputFormat::Treeviz,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        // Validate stage/format compatibility
        match (stage, format) {
            (ProcessingStage::Token, OutputFormat::Simple | OutputFormat::Json) => {}
            (ProcessingStage::Token, _) => {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "Format '{}' only works with the ast stage",
                    format.name()
                )))
            }
            (ProcessingStage::Ast, OutputFormat::Simple) => {
                return Err(ProcessingError::InvalidFormatType(
                    "Format 'simple' only works with the token stage".to_string(),
                ))
            }
            (ProcessingStage::Ast, _) => {}
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        let token = [OutputFormat::Simple, OutputFormat::Json]
            .into_iter()
            .map(|format| ProcessingSpec {
                stage: ProcessingStage::Token,
                format,
            });
        let ast = [
            OutputFormat::Treeviz,
            OutputFormat::Tag,
            OutputFormat::Json,
            OutputFormat::Yaml,
        ]
        .into_iter()
        .map(|format| ProcessingSpec {
            stage: ProcessingStage::Ast,
            format,
        });
        token.chain(ast).collect()
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        };
        write!(f, "{}-{}", stage, self.format.name())
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    InvalidFormat(String),
    InvalidStage(String),
    InvalidFormatType(String),
    IoError(String),
    Serialization(String),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::InvalidFormat(format) => write!(f, "Invalid format: {}", format),
            ProcessingError::InvalidStage(stage) => write!(f, "Invalid stage: {}", stage),
            ProcessingError::InvalidFormatType(format_type) => {
                write!(f, "Invalid format type: {}", format_type)
            }
            ProcessingError::IoError(msg) => write!(f, "IO error: {}", msg),
            ProcessingError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl From<FormatError> for ProcessingError {
    fn from(err: FormatError) -> Self {
        ProcessingError::Serialization(err.to_string())
    }
}

/// Rendered output plus the warnings raised while building the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    pub output: String,
    pub warnings: Vec<Warning>,
}

#[derive(Serialize)]
struct TokenEntry<'a> {
    kind: TokenKind,
    value: &'a str,
    start: usize,
    end: usize,
}

/// Process markup held in memory.
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    config: &SsmlConfig,
) -> Result<Processed, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => {
            let output = format_tokens(source, spec.format)?;
            Ok(Processed {
                output,
                warnings: Vec::new(),
            })
        }
        ProcessingStage::Ast => {
            let built = parse(source, &config.parser);
            let output = match &built.root {
                Some(root) => {
                    let registry = FormatRegistry::with_options(config.output.treeviz_options());
                    registry.serialize(root, spec.format.name())?
                }
                None => String::new(),
            };
            Ok(Processed {
                output,
                warnings: built.warnings,
            })
        }
    }
}

/// Process a markup file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    config: &SsmlConfig,
) -> Result<Processed, ProcessingError> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path).map_err(|e| {
        ProcessingError::IoError(format!("Failed to read {}: {}", file_path.display(), e))
    })?;
    process_source(&content, spec, config)
}

/// Format tokens according to the specified format
fn format_tokens(source: &str, format: OutputFormat) -> Result<String, ProcessingError> {
    let tokens = tokenize_with_spans(source);
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for (token, _) in &tokens {
                result.push_str(&format!("{} {:?}\n", token.kind(), token.as_str()));
            }
            Ok(result)
        }
        OutputFormat::Json => {
            let entries: Vec<_> = tokens
                .iter()
                .map(|(token, span)| TokenEntry {
                    kind: token.kind(),
                    value: token.as_str(),
                    start: span.start,
                    end: span.end,
                })
                .collect();
            serde_json::to_string_pretty(&entries)
                .map_err(|e| ProcessingError::Serialization(e.to_string()))
        }
        other => Err(ProcessingError::InvalidFormatType(format!(
            "Format '{}' only works with the ast stage",
            other.name()
        ))),
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .into_iter()
        .map(|spec| spec.to_string())
        .collect()
}

/// Every format string with a one-line description.
///
/// Tree formats are described by their registered formatter.
pub fn format_descriptions() -> Vec<(String, String)> {
    let registry = FormatRegistry::with_defaults();
    ProcessingSpec::available_specs()
        .into_iter()
        .map(|spec| {
            let description = match (spec.stage, spec.format) {
                (ProcessingStage::Token, OutputFormat::Simple) => "One token per line".to_string(),
                (ProcessingStage::Token, _) => "Tokens with byte spans as JSON".to_string(),
                (ProcessingStage::Ast, format) => registry
                    .get(format.name())
                    .map(|formatter| formatter.description().to_string())
                    .unwrap_or_default(),
            };
            (spec.to_string(), description)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssml::config::load_defaults;

    fn run(source: &str, format: &str) -> Processed {
        let config = load_defaults().expect("defaults");
        let spec = ProcessingSpec::from_string(format).expect("valid format");
        process_source(source, &spec, &config).expect("processing to succeed")
    }

    #[test]
    fn test_spec_parsing() {
        assert_eq!(
            ProcessingSpec::from_string("ast-treeviz"),
            Ok(ProcessingSpec {
                stage: ProcessingStage::Ast,
                format: OutputFormat::Treeviz
            })
        );
        assert_eq!(
            ProcessingSpec::from_string("token"),
            Err(ProcessingError::InvalidFormat("token".to_string()))
        );
        assert_eq!(
            ProcessingSpec::from_string("dom-json"),
            Err(ProcessingError::InvalidStage("dom".to_string()))
        );
        assert!(matches!(
            ProcessingSpec::from_string("ast-xml"),
            Err(ProcessingError::InvalidFormatType(_))
        ));
        assert!(ProcessingSpec::from_string("token-tag").is_err());
        assert!(ProcessingSpec::from_string("ast-simple").is_err());
    }

    #[test]
    fn test_available_formats_round_trip() {
        let formats = available_formats();
        assert_eq!(
            formats,
            vec![
                "token-simple",
                "token-json",
                "ast-treeviz",
                "ast-tag",
                "ast-json",
                "ast-yaml"
            ]
        );
        for format in formats {
            assert!(ProcessingSpec::from_string(&format).is_ok(), "{}", format);
        }
    }

    #[test]
    fn test_every_format_is_described() {
        let descriptions = format_descriptions();
        assert_eq!(descriptions.len(), available_formats().len());
        for (format, description) in descriptions {
            assert!(!description.is_empty(), "{}", format);
        }
    }

    #[test]
    fn test_token_simple() {
        let processed = run("<speak>hi</speak>", "token-simple");
        assert_eq!(
            processed.output,
            "opening-tag \"<speak>\"\ntext \"hi\"\nclosing-tag \"</speak>\"\n"
        );
    }

    #[test]
    fn test_token_json_has_spans() {
        let processed = run("<speak>hi</speak>", "token-json");
        let value: serde_json::Value = serde_json::from_str(&processed.output).unwrap();
        assert_eq!(value[1]["kind"], "text");
        assert_eq!(value[1]["value"], "hi");
        assert_eq!(value[1]["start"], 7);
        assert_eq!(value[1]["end"], 9);
    }

    #[test]
    fn test_ast_tag() {
        let processed = run("<speak>\n  <p>hi</p>\n</speak>", "ast-tag");
        assert_eq!(processed.output, "<speak><p>hi</p></speak>");
        assert!(processed.warnings.is_empty());
    }

    #[test]
    fn test_ast_reports_warnings() {
        let processed = run("<speak>hi", "ast-tag");
        assert_eq!(processed.output, "<speak>hi</speak>");
        assert_eq!(
            processed.warnings,
            vec![Warning::UnclosedTag {
                name: "speak".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_document() {
        let processed = run("", "ast-treeviz");
        assert_eq!(processed.output, "");
    }

    #[test]
    fn test_missing_file() {
        let config = load_defaults().expect("defaults");
        let spec = ProcessingSpec::from_string("ast-tag").unwrap();
        let result = process_file("/no/such/file.ssml", &spec, &config);
        assert!(matches!(result, Err(ProcessingError::IoError(_))));
    }
}

//! Configuration loading
//!
//! The defaults live in `defaults/ssml.default.toml` and are compiled in. A user
//! file and command-line settings are layered on top through [`Loader`], and the
//! merged result is deserialized into [`SsmlConfig`]:
//!
//! ```toml
//! [parser]
//! builder = "stack"        # or "recursive"
//!
//! [output]
//! format = "ast-treeviz"   # any format listed by `ssml --list-formats`
//! truncate = 30            # treeviz label width
//! show_attributes = true   # treeviz attribute lists
//! warnings = false         # print build warnings to stderr
//! ```

use crate::ssml::building::Builder;
use crate::ssml::formats::TreevizOptions;
use crate::ssml::parser::ParserConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/ssml.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SsmlConfig {
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub truncate: usize,
    pub show_attributes: bool,
    pub warnings: bool,
}

impl OutputConfig {
    pub fn treeviz_options(&self) -> TreevizOptions {
        TreevizOptions {
            truncate: self.truncate,
            show_attributes: self.show_attributes,
        }
    }
}

/// Layers a user file and command-line settings over the built-in defaults.
///
/// Later layers win: defaults, then the file, then the individual settings.
#[derive(Debug, Clone)]
pub struct Loader {
    layers: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            layers: Config::builder().add_source(defaults),
        }
    }

    /// Layer a TOML file. The file must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let file = File::from(path.as_ref()).format(FileFormat::Toml);
        self.layers = self.layers.add_source(file);
        self
    }

    /// Output format string, e.g. `ast-json`.
    pub fn format(self, format: &str) -> Result<Self, ConfigError> {
        self.set("output.format", format)
    }

    pub fn builder(self, builder: Builder) -> Result<Self, ConfigError> {
        self.set("parser.builder", builder.name())
    }

    /// Whether the CLI prints build warnings.
    pub fn warnings(self, enabled: bool) -> Result<Self, ConfigError> {
        self.set("output.warnings", enabled)
    }

    fn set(mut self, key: &str, value: impl Into<ValueKind>) -> Result<Self, ConfigError> {
        self.layers = self.layers.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<SsmlConfig, ConfigError> {
        self.layers.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SsmlConfig, ConfigError> {
    Loader::new().build()
}

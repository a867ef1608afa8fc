//! Shared configuration loader for the spangraph toolchain.
//!
//! `defaults/spangraph.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`SpangraphConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use spangraph_babel::formats::ptb::PtbOptions;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/spangraph.default.toml");

/// Top-level configuration consumed by spangraph applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SpangraphConfig {
    pub convert: ConvertConfig,
    pub inspect: InspectConfig,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub ptb: PtbConfig,
    #[serde(default)]
    pub brackets: BracketsConfig,
}

/// Mirrors the options of the treebank importer.
#[derive(Debug, Clone, Deserialize)]
pub struct PtbConfig {
    pub namespace: String,
    pub precedence: bool,
    /// 0 or absent reads every sentence
    #[serde(default)]
    pub limit: Option<usize>,
}

impl From<&PtbConfig> for PtbOptions {
    fn from(config: &PtbConfig) -> Self {
        PtbOptions {
            namespace: config.namespace.clone(),
            precedence: config.precedence,
            limit: config.limit.filter(|&limit| limit > 0),
            ..PtbOptions::default()
        }
    }
}

impl From<PtbConfig> for PtbOptions {
    fn from(config: PtbConfig) -> Self {
        PtbOptions::from(&config)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BracketsConfig {
    #[serde(default)]
    pub layer: Option<String>,
}

/// Controls inspect output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub treeviz: TreevizConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreevizConfig {
    pub show_node_ids: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SpangraphConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SpangraphConfig, ConfigError> {
    Loader::new().build()
}

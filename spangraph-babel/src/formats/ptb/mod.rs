//! Penn Treebank format implementation
//!
//! Reads bracketed constituency trees (`.mrg`) into a document graph. The
//! format is import-only.
//!
//! Extra parameters:
//! - `name`: document name (default "document")
//! - `namespace`: namespace for the root label and token attributes (default "ptb")
//! - `precedence`: "true" to chain root and tokens with precedence edges
//! - `limit`: only read the first n sentences ("0" reads all)

use crate::error::FormatError;
use crate::format::Format;
use crate::graph::DocumentGraph;
use std::collections::HashMap;

pub mod builder;
pub mod parser;

pub use builder::TreeGraphBuilder;
pub use parser::{parse_trees, ParseTree, TreeReader};

/// Construction options for treebank import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtbOptions {
    pub name: String,
    pub namespace: String,
    pub precedence: bool,
    /// Maximum number of sentences to read; `None` reads all
    pub limit: Option<usize>,
}

impl Default for PtbOptions {
    fn default() -> Self {
        PtbOptions {
            name: "document".to_string(),
            namespace: "ptb".to_string(),
            precedence: false,
            limit: None,
        }
    }
}

impl PtbOptions {
    /// Applies string parameters on top of these options.
    pub fn apply(&mut self, options: &HashMap<String, String>) -> Result<(), FormatError> {
        for (key, value) in options {
            match key.as_str() {
                "name" => self.name = value.clone(),
                "namespace" => self.namespace = value.clone(),
                "precedence" => self.precedence = parse_flag(key, value)?,
                "limit" => {
                    let limit: usize = value.parse().map_err(|_| {
                        FormatError::ParseError(format!(
                            "invalid value '{value}' for limit, expected a number"
                        ))
                    })?;
                    self.limit = (limit > 0).then_some(limit);
                }
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'ptb' does not support parameter '{other}'"
                    )))
                }
            }
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, FormatError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(FormatError::ParseError(format!(
            "invalid boolean '{other}' for {key}"
        ))),
    }
}

/// Format implementation for Penn Treebank files
#[derive(Debug, Clone, Default)]
pub struct PtbFormat {
    options: PtbOptions,
}

impl PtbFormat {
    pub fn new(options: PtbOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PtbOptions {
        &self.options
    }

    fn read(&self, source: &str, options: &PtbOptions) -> Result<DocumentGraph, FormatError> {
        let limit = options.limit.unwrap_or(usize::MAX);
        // a syntax error past the limit must not fail the import
        let sentences = TreeReader::new(source)
            .take(limit)
            .collect::<Result<Vec<_>, _>>()?;
        if sentences.is_empty() {
            log::warn!("no trees found in input for '{}'", options.name);
        }
        let doc = TreeGraphBuilder::build(options, sentences)?;
        log::debug!(
            "read {} sentence(s), {} token(s) into '{}'",
            doc.sentences().len(),
            doc.tokens().len(),
            doc.name
        );
        Ok(doc)
    }
}

impl Format for PtbFormat {
    fn name(&self) -> &str {
        "ptb"
    }

    fn description(&self) -> &str {
        "Penn Treebank bracketed constituency trees"
    }

    fn file_extensions(&self) -> &[&str] {
        &["mrg", "ptb"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<DocumentGraph, FormatError> {
        self.read(source, &self.options)
    }

    fn parse_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<DocumentGraph, FormatError> {
        let mut merged = self.options.clone();
        merged.apply(options)?;
        self.read(source, &merged)
    }
}

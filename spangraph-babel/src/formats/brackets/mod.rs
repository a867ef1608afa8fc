//! Bracketed chain format implementation
//!
//! Writes markables as inline brackets annotated with their chain, and reads
//! such text back into a graph.
//!
//! Extra parameters:
//! - `layer`: when serializing, only render markables and pointing edges of
//!   this layer; when parsing, the layer given to created markables
//!   (default "brackets")
//! - `name`: document name when parsing

use crate::error::FormatError;
use crate::format::Format;
use crate::graph::DocumentGraph;
use std::collections::HashMap;

pub mod parser;
pub mod serializer;

pub use parser::{parse_brackets, ReadOptions};
pub use serializer::{render, serialize_brackets, write_brackets, write_brackets_to};

/// Format implementation for bracketed chain text
#[derive(Debug, Clone, Default)]
pub struct BracketsFormat {
    layer: Option<String>,
}

impl BracketsFormat {
    pub fn new(layer: Option<String>) -> Self {
        Self { layer }
    }

    fn read_options(&self) -> ReadOptions {
        let mut options = ReadOptions::default();
        if let Some(layer) = &self.layer {
            options.layer = layer.clone();
        }
        options
    }
}

fn unsupported(key: &str) -> FormatError {
    FormatError::NotSupported(format!(
        "Format 'brackets' does not support parameter '{key}'"
    ))
}

impl Format for BracketsFormat {
    fn name(&self) -> &str {
        "brackets"
    }

    fn description(&self) -> &str {
        "Tokens with markables as inline brackets labelled by chain"
    }

    fn file_extensions(&self) -> &[&str] {
        &["brackets"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<DocumentGraph, FormatError> {
        parse_brackets(source, &self.read_options())
    }

    fn parse_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<DocumentGraph, FormatError> {
        let mut read_options = self.read_options();
        for (key, value) in options {
            match key.as_str() {
                "layer" => read_options.layer = value.clone(),
                "name" => read_options.name = value.clone(),
                other => return Err(unsupported(other)),
            }
        }
        parse_brackets(source, &read_options)
    }

    fn serialize(&self, doc: &DocumentGraph) -> Result<String, FormatError> {
        Ok(serialize_brackets(doc, self.layer.as_deref())?)
    }

    fn serialize_with_options(
        &self,
        doc: &DocumentGraph,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut layer = self.layer.as_deref();
        for (key, value) in options {
            match key.as_str() {
                "layer" => layer = Some(value.as_str()),
                other => return Err(unsupported(other)),
            }
        }
        Ok(serialize_brackets(doc, layer)?)
    }
}

//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! Importers build a [`DocumentGraph`], exporters read one.

use crate::error::FormatError;
use crate::graph::DocumentGraph;
use std::collections::HashMap;

/// Trait for document formats
///
/// Implementors provide conversion between a textual representation and the document graph.
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str) -> Result<DocumentGraph, FormatError> {
///         // Build the graph from source
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "ptb", "brackets")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["mrg", "ptb"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → graph)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (graph → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a document graph
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<DocumentGraph, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Parse source text, optionally using extra parameters.
    ///
    /// Mirrors [`Format::serialize_with_options`] on the import side.
    fn parse_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<DocumentGraph, FormatError> {
        if options.is_empty() {
            self.parse(source)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }

    /// Serialize a document graph into text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &DocumentGraph) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize a document graph, optionally using extra parameters.
    ///
    /// Formats without parameters can rely on the default implementation,
    /// which delegates to [`Format::serialize`] and rejects any option.
    fn serialize_with_options(
        &self,
        doc: &DocumentGraph,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(doc)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

//! Error types for graph construction, rendering and format operations

use crate::graph::NodeId;
use thiserror::Error;

/// Errors raised by the document graph and the algorithms built on it.
///
/// None of these are recoverable for the operation in progress: a builder
/// that fails returns no graph, a renderer that fails returns no text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A span or lookup references a token that is not in the token sequence
    #[error("unknown token '{0}'")]
    UnknownToken(NodeId),
    /// A span covers zero tokens
    #[error("{}", empty_span_message(.markable))]
    EmptySpan { markable: Option<NodeId> },
    /// Bracket stack is inconsistent with the closing markables of a token
    #[error("unbalanced spans at token position {position}, open markables: {}", join_ids(.open))]
    UnbalancedSpans { position: usize, open: Vec<NodeId> },
    /// A tree node has a shape the builder cannot represent
    #[error("malformed tree: {0}")]
    MalformedTree(String),
    /// An edge endpoint or lookup references a node that does not exist
    #[error("unknown node '{0}'")]
    UnknownNode(NodeId),
    /// The same token identity occurs twice in a token sequence
    #[error("token '{0}' occurs more than once in the token sequence")]
    DuplicateToken(NodeId),
    /// A node used as a markable carries no span
    #[error("node '{0}' is not a markable")]
    NotAMarkable(NodeId),
    /// A node pushed into the token sequence is not a token
    #[error("node '{0}' is not a token")]
    NotAToken(NodeId),
}

fn empty_span_message(markable: &Option<NodeId>) -> String {
    match markable {
        Some(id) => format!("markable '{id}' covers no tokens"),
        None => "span covers no tokens".to_string(),
    }
}

fn join_ids(ids: &[NodeId]) -> String {
    if ids.is_empty() {
        return "none".to_string();
    }
    ids.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// The graph was inconsistent with the requested operation
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Writing the output failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        FormatError::Io(err.to_string())
    }
}

//! Common graph model shared by all formats.
//!
//! Importers populate a [`DocumentGraph`]; exporters and the span algorithms
//! in [`crate::common`] only read it.

pub mod document;
pub mod nodes;

pub use document::{DocumentGraph, EdgeView, GraphView};
pub use nodes::{Edge, EdgeType, Node, NodeId, NodeKind};

//! Node and edge records of the document graph.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Opaque node identity, unique within one graph.
///
/// Tree importers use decimal counters ("0", "1", ...), span importers use
/// names such as "markable_12". Nothing about the ordering of identities is
/// assumed; document order lives in [`crate::graph::DocumentGraph::tokens`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId(id.to_string())
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId(id)
    }
}

/// What a node stands for. Fixed when the node is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// A terminal with its surface string
    Token { surface: String },
    /// A span over tokens, listed in whatever order the source had them
    Markable { span: Vec<NodeId> },
    /// Roots, constituents and anything else without text of its own
    Structural,
}

/// A node of the document graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub layers: BTreeSet<String>,
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Node {
    pub fn structural(id: impl Into<NodeId>) -> Self {
        Self::with_kind(id, NodeKind::Structural)
    }

    pub fn token(id: impl Into<NodeId>, surface: impl Into<String>) -> Self {
        Self::with_kind(
            id,
            NodeKind::Token {
                surface: surface.into(),
            },
        )
    }

    pub fn markable(id: impl Into<NodeId>, span: Vec<NodeId>) -> Self {
        Self::with_kind(id, NodeKind::Markable { span })
    }

    fn with_kind(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Node {
            id: id.into(),
            label: None,
            layers: BTreeSet::new(),
            kind,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layers.insert(layer.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn is_token(&self) -> bool {
        matches!(self.kind, NodeKind::Token { .. })
    }

    pub fn is_markable(&self) -> bool {
        matches!(self.kind, NodeKind::Markable { .. })
    }

    /// Surface string, for tokens.
    pub fn surface(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Token { surface } => Some(surface),
            _ => None,
        }
    }

    /// Covered tokens, for markables.
    pub fn span(&self) -> Option<&[NodeId]> {
        match &self.kind {
            NodeKind::Markable { span } => Some(span),
            _ => None,
        }
    }

    pub fn in_layer(&self, layer: &str) -> bool {
        self.layers.contains(layer)
    }
}

/// Edge semantics. A closed set: every edge carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EdgeType {
    /// Structural containment between non-terminals
    #[serde(rename = "dominance_relation")]
    Dominance,
    /// A structural node directly covering a terminal
    #[serde(rename = "spanning_relation")]
    Spanning,
    /// A reference relation from one markable to another
    #[serde(rename = "pointing_relation")]
    Pointing,
    /// Linear order between consecutive nodes
    #[serde(rename = "precedence_relation")]
    Precedence,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Dominance => "dominance_relation",
            EdgeType::Spanning => "spanning_relation",
            EdgeType::Pointing => "pointing_relation",
            EdgeType::Precedence => "precedence_relation",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed edge. Several edges may join the same pair of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub edge_type: EdgeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub layers: BTreeSet<String>,
}

impl Edge {
    pub fn new(edge_type: EdgeType) -> Self {
        Edge {
            edge_type,
            label: None,
            layers: BTreeSet::new(),
        }
    }

    pub fn dominance() -> Self {
        Self::new(EdgeType::Dominance)
    }

    pub fn spanning() -> Self {
        Self::new(EdgeType::Spanning)
    }

    pub fn pointing() -> Self {
        Self::new(EdgeType::Pointing)
    }

    pub fn precedence() -> Self {
        Self::new(EdgeType::Precedence)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layers.insert(layer.into());
        self
    }

    pub fn in_layer(&self, layer: &str) -> bool {
        self.layers.contains(layer)
    }
}

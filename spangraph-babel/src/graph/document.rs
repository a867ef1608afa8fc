//! The document graph: a directed multigraph over typed nodes plus the
//! declared token order of the document.

use super::nodes::{Edge, EdgeType, Node, NodeId};
use crate::error::GraphError;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::HashMap;

/// A document as a graph of tokens, structure and markables.
///
/// Nodes are addressed by [`NodeId`]; the petgraph indices stay internal.
/// Edges are kept in insertion order, which the tree importers rely on to
/// preserve child order.
#[derive(Debug, Clone)]
pub struct DocumentGraph {
    /// Name of the document (usually the input file name)
    pub name: String,
    /// Namespace used for layers and namespaced attribute keys
    pub namespace: String,
    root: NodeId,
    graph: DiGraph<Node, Edge>,
    index: HashMap<NodeId, NodeIndex>,
    tokens: Vec<NodeId>,
    sentences: Vec<NodeId>,
}

impl DocumentGraph {
    /// Creates a graph holding only the document root.
    ///
    /// The root is node "0", labelled `<namespace>:root_node` and placed in
    /// the namespace layer.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self::with_root(name, namespace, NodeId::from(0usize))
    }

    /// Creates a graph whose root node has the given identity.
    pub fn with_root(
        name: impl Into<String>,
        namespace: impl Into<String>,
        root: impl Into<NodeId>,
    ) -> Self {
        let namespace = namespace.into();
        let root = root.into();
        let mut doc = DocumentGraph {
            name: name.into(),
            namespace: namespace.clone(),
            root: root.clone(),
            graph: DiGraph::new(),
            index: HashMap::new(),
            tokens: Vec::new(),
            sentences: Vec::new(),
        };
        doc.add_node(
            Node::structural(root)
                .with_label(format!("{namespace}:root_node"))
                .with_layer(namespace),
        );
        doc
    }

    pub fn root(&self) -> &NodeId {
        &self.root
    }

    /// Namespaced attribute key, e.g. `ptb:token`.
    pub fn ns_key(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    /// Adds a node. An existing node with the same id is replaced in place,
    /// keeping its edges.
    pub fn add_node(&mut self, node: Node) {
        match self.index.get(&node.id) {
            Some(&idx) => self.graph[idx] = node,
            None => {
                let id = node.id.clone();
                let idx = self.graph.add_node(node);
                self.index.insert(id, idx);
            }
        }
    }

    /// Adds a directed edge. Parallel edges between the same pair are kept.
    pub fn add_edge(
        &mut self,
        source: &NodeId,
        target: &NodeId,
        edge: Edge,
    ) -> Result<(), GraphError> {
        let from = self.index_of(source)?;
        let to = self.index_of(target)?;
        self.graph.add_edge(from, to, edge);
        Ok(())
    }

    fn index_of(&self, id: &NodeId) -> Result<NodeIndex, GraphError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(id.clone()))
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// All edges in creation order as `(source, target, edge)`.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId, &Edge)> {
        self.graph.edge_references().map(move |e| {
            (
                &self.graph[e.source()].id,
                &self.graph[e.target()].id,
                e.weight(),
            )
        })
    }

    /// Outgoing edges of a node in creation order.
    pub fn out_edges(&self, id: &NodeId) -> Vec<(&NodeId, &Edge)> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self.graph.edges(idx).collect();
        edges.sort_by_key(|e| e.id().index());
        edges
            .into_iter()
            .map(|e| (&self.graph[e.target()].id, e.weight()))
            .collect()
    }

    /// Every edge from `source` to `target`.
    pub fn edges_between(&self, source: &NodeId, target: &NodeId) -> Vec<&Edge> {
        match (self.index.get(source), self.index.get(target)) {
            (Some(&from), Some(&to)) => {
                let mut edges: Vec<_> = self.graph.edges_connecting(from, to).collect();
                edges.sort_by_key(|e| e.id().index());
                edges.into_iter().map(|e| e.weight()).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Appends a token node to the declared token order.
    pub fn push_token(&mut self, id: NodeId) -> Result<(), GraphError> {
        match self.node(&id) {
            Some(node) if node.is_token() => {
                self.tokens.push(id);
                Ok(())
            }
            Some(_) => Err(GraphError::NotAToken(id)),
            None => Err(GraphError::UnknownNode(id)),
        }
    }

    /// Token identities in document order.
    pub fn tokens(&self) -> &[NodeId] {
        &self.tokens
    }

    /// Surface string of a token.
    pub fn get_token(&self, id: &NodeId) -> Result<&str, GraphError> {
        self.node(id)
            .and_then(Node::surface)
            .ok_or_else(|| GraphError::UnknownToken(id.clone()))
    }

    pub fn push_sentence(&mut self, id: NodeId) {
        self.sentences.push(id);
    }

    /// Sentence root identities in input order.
    pub fn sentences(&self) -> &[NodeId] {
        &self.sentences
    }

    /// All markable nodes in creation order.
    pub fn markables(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|node| node.is_markable())
    }

    /// Pointing edges as `(source, target)`, optionally only those of a layer.
    pub fn pointing_relations<'a>(
        &'a self,
        layer: Option<&'a str>,
    ) -> impl Iterator<Item = (&'a NodeId, &'a NodeId)> + 'a {
        self.edges().filter_map(move |(source, target, edge)| {
            let in_scope = layer.map_or(true, |layer| edge.in_layer(layer));
            (edge.edge_type == EdgeType::Pointing && in_scope).then_some((source, target))
        })
    }

    /// A serializable snapshot of the whole graph.
    pub fn view(&self) -> GraphView<'_> {
        GraphView {
            name: &self.name,
            namespace: &self.namespace,
            root: &self.root,
            tokens: &self.tokens,
            sentences: &self.sentences,
            nodes: self.nodes().collect(),
            edges: self
                .edges()
                .map(|(source, target, edge)| EdgeView {
                    source,
                    target,
                    edge,
                })
                .collect(),
        }
    }
}

/// Borrowed, serializable form of a [`DocumentGraph`].
#[derive(Debug, Serialize)]
pub struct GraphView<'a> {
    pub name: &'a str,
    pub namespace: &'a str,
    pub root: &'a NodeId,
    pub tokens: &'a [NodeId],
    pub sentences: &'a [NodeId],
    pub nodes: Vec<&'a Node>,
    pub edges: Vec<EdgeView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct EdgeView<'a> {
    pub source: &'a NodeId,
    pub target: &'a NodeId,
    #[serde(flatten)]
    pub edge: &'a Edge,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_doc() -> DocumentGraph {
        let mut doc = DocumentGraph::new("doc", "test");
        doc.add_node(Node::token("t1", "Die"));
        doc.add_node(Node::token("t2", "Stadt"));
        doc.push_token(NodeId::from("t1")).unwrap();
        doc.push_token(NodeId::from("t2")).unwrap();
        doc
    }

    #[test]
    fn new_graph_has_namespaced_root() {
        let doc = DocumentGraph::new("doc", "ptb");
        let root = doc.node(doc.root()).unwrap();
        assert_eq!(root.id.as_str(), "0");
        assert_eq!(root.label.as_deref(), Some("ptb:root_node"));
        assert!(root.in_layer("ptb"));
        assert_eq!(doc.node_count(), 1);
        assert!(doc.tokens().is_empty());
    }

    #[test]
    fn parallel_edges_are_kept() {
        let mut doc = small_doc();
        let (a, b) = (NodeId::from("t1"), NodeId::from("t2"));
        doc.add_edge(&a, &b, Edge::precedence()).unwrap();
        doc.add_edge(&a, &b, Edge::pointing()).unwrap();
        let between = doc.edges_between(&a, &b);
        assert_eq!(between.len(), 2);
        assert_eq!(between[0].edge_type, EdgeType::Precedence);
        assert_eq!(between[1].edge_type, EdgeType::Pointing);
    }

    #[test]
    fn edge_to_missing_node_fails() {
        let mut doc = small_doc();
        let err = doc
            .add_edge(&NodeId::from("t1"), &NodeId::from("nope"), Edge::spanning())
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownNode(NodeId::from("nope")));
    }

    #[test]
    fn re_adding_a_node_replaces_it_and_keeps_edges() {
        let mut doc = small_doc();
        let root = doc.root().clone();
        doc.add_edge(&root, &NodeId::from("t1"), Edge::spanning())
            .unwrap();
        doc.add_node(Node::token("t1", "Der"));
        assert_eq!(doc.get_token(&NodeId::from("t1")).unwrap(), "Der");
        assert_eq!(doc.out_edges(&root).len(), 1);
        assert_eq!(doc.node_count(), 3);
    }

    #[test]
    fn only_tokens_enter_the_token_order() {
        let mut doc = small_doc();
        doc.add_node(Node::markable("m1", vec![NodeId::from("t1")]));
        assert_eq!(
            doc.push_token(NodeId::from("m1")),
            Err(GraphError::NotAToken(NodeId::from("m1")))
        );
        assert_eq!(
            doc.push_token(NodeId::from("t9")),
            Err(GraphError::UnknownNode(NodeId::from("t9")))
        );
        assert_eq!(doc.tokens().len(), 2);
    }

    #[test]
    fn get_token_rejects_non_tokens() {
        let doc = small_doc();
        assert_eq!(
            doc.get_token(doc.root()),
            Err(GraphError::UnknownToken(NodeId::from("0")))
        );
    }

    #[test]
    fn pointing_relations_respect_layer_filter() {
        let mut doc = small_doc();
        doc.add_node(Node::markable("m1", vec![NodeId::from("t1")]));
        doc.add_node(Node::markable("m2", vec![NodeId::from("t2")]));
        let (m1, m2) = (NodeId::from("m1"), NodeId::from("m2"));
        doc.add_edge(&m2, &m1, Edge::pointing().with_layer("coref"))
            .unwrap();
        doc.add_edge(&m1, &m2, Edge::pointing().with_layer("bridging"))
            .unwrap();
        doc.add_edge(&m1, &m2, Edge::precedence()).unwrap();

        assert_eq!(doc.pointing_relations(None).count(), 2);
        let coref: Vec<_> = doc.pointing_relations(Some("coref")).collect();
        assert_eq!(coref, vec![(&m2, &m1)]);
    }

    #[test]
    fn view_serializes_nodes_and_edges() {
        let mut doc = small_doc();
        let root = doc.root().clone();
        doc.add_edge(&root, &NodeId::from("t1"), Edge::spanning())
            .unwrap();
        let json = serde_json::to_value(doc.view()).unwrap();
        assert_eq!(json["tokens"][1], "t2");
        assert_eq!(json["nodes"][1]["kind"], "token");
        assert_eq!(json["nodes"][1]["surface"], "Die");
        assert_eq!(json["edges"][0]["edge_type"], "spanning_relation");
        assert_eq!(json["edges"][0]["target"], "t1");
    }
}

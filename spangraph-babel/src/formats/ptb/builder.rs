//! Builds a document graph from constituency trees.
//!
//! Node identities come from one counter owned by the builder: the document
//! root is `0`, the first sentence root `1`, and every tree node takes the next
//! number in depth-first, left-to-right order. The counter is advanced once
//! after each sentence, so the next sentence root takes the next free number.
//!
//! Edges:
//! - document root → sentence root: spanning
//! - non-terminal → non-terminal: dominance
//! - non-terminal → token: spanning

use super::parser::ParseTree;
use super::PtbOptions;
use crate::error::GraphError;
use crate::graph::{DocumentGraph, Edge, Node, NodeId};

/// Incremental tree-to-graph builder.
pub struct TreeGraphBuilder {
    doc: DocumentGraph,
    node_id: usize,
    precedence: bool,
}

impl TreeGraphBuilder {
    /// Starts a graph holding only the document root.
    pub fn new(options: &PtbOptions) -> Self {
        TreeGraphBuilder {
            doc: DocumentGraph::new(options.name.clone(), options.namespace.clone()),
            node_id: 1,
            precedence: options.precedence,
        }
    }

    /// Builds a graph from a sequence of sentences, honouring `limit`.
    ///
    /// Sentences after the limit are never pulled from the iterator.
    pub fn build<I>(options: &PtbOptions, sentences: I) -> Result<DocumentGraph, GraphError>
    where
        I: IntoIterator<Item = ParseTree>,
    {
        let mut builder = TreeGraphBuilder::new(options);
        let limit = options.limit.unwrap_or(usize::MAX);
        for sentence in sentences.into_iter().take(limit) {
            builder.add_sentence(&sentence)?;
        }
        builder.finish()
    }

    /// Adds one sentence below the document root.
    ///
    /// The tree is checked before anything is written, so a malformed
    /// sentence leaves the graph untouched.
    pub fn add_sentence(&mut self, sentence: &ParseTree) -> Result<(), GraphError> {
        let ParseTree::Internal { label, children } = sentence else {
            return Err(GraphError::MalformedTree(format!(
                "sentence '{}' is a bare token, expected a tree",
                sentence.label()
            )));
        };
        validate(sentence)?;

        let sentence_id = NodeId::from(self.node_id);
        self.doc
            .add_node(Node::structural(sentence_id.clone()).with_label(label.clone()));
        let root = self.doc.root().clone();
        self.doc.add_edge(&root, &sentence_id, Edge::spanning())?;
        self.doc.push_sentence(sentence_id.clone());

        self.parse_subtree(&sentence_id, children)?;
        self.node_id += 1;

        log::debug!(
            "added sentence {} ({} tokens so far)",
            sentence_id,
            self.doc.tokens().len()
        );
        Ok(())
    }

    fn parse_subtree(&mut self, parent: &NodeId, children: &[ParseTree]) -> Result<(), GraphError> {
        for child in children {
            self.node_id += 1;
            let child_id = NodeId::from(self.node_id);
            match child {
                ParseTree::Internal { label, children } => {
                    self.doc
                        .add_node(Node::structural(child_id.clone()).with_label(label.clone()));
                    self.doc.add_edge(parent, &child_id, Edge::dominance())?;
                    self.parse_subtree(&child_id, children)?;
                }
                ParseTree::Leaf { surface } => {
                    let token_key = self.doc.ns_key("token");
                    self.doc.add_node(
                        Node::token(child_id.clone(), surface.clone())
                            .with_label(surface.clone())
                            .with_attribute(token_key, surface.clone()),
                    );
                    self.doc.add_edge(parent, &child_id, Edge::spanning())?;
                    self.doc.push_token(child_id)?;
                }
            }
        }
        Ok(())
    }

    /// Finishes construction and hands out the graph.
    ///
    /// With precedence enabled, chains the root and all tokens in document
    /// order with precedence edges.
    pub fn finish(mut self) -> Result<DocumentGraph, GraphError> {
        if self.precedence {
            let mut previous = self.doc.root().clone();
            for token in self.doc.tokens().to_vec() {
                self.doc.add_edge(&previous, &token, Edge::precedence())?;
                previous = token;
            }
        }
        if self.doc.tokens().is_empty() {
            log::warn!("document '{}' contains no tokens", self.doc.name);
        }
        Ok(self.doc)
    }
}

/// Every internal node must have children; a sentence may not be a leaf.
fn validate(tree: &ParseTree) -> Result<(), GraphError> {
    match tree {
        ParseTree::Internal { label, children } if children.is_empty() => {
            Err(GraphError::MalformedTree(format!(
                "node '{label}' has neither children nor a token"
            )))
        }
        ParseTree::Internal { children, .. } => children.iter().try_for_each(validate),
        ParseTree::Leaf { .. } => Ok(()),
    }
}

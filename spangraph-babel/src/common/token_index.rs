//! Bidirectional mapping between token identities and document positions.
//!
//! Token identities carry no usable order: some formats (RS3 in particular)
//! number tokens out of sequence, and spans list their tokens in whatever order
//! the annotator produced. Every span offset is therefore computed from
//! positions, never from the order of the input list.

use crate::error::GraphError;
use crate::graph::{DocumentGraph, NodeId};
use std::collections::HashMap;

/// Read-only token position lookup, built once per rendering request.
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    id2index: HashMap<NodeId, usize>,
    index2id: Vec<NodeId>,
}

impl TokenIndex {
    /// Builds the index from a token sequence in document order.
    pub fn build<I>(tokens: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut index = TokenIndex::default();
        for (position, id) in tokens.into_iter().enumerate() {
            if index.id2index.insert(id.clone(), position).is_some() {
                return Err(GraphError::DuplicateToken(id));
            }
            index.index2id.push(id);
        }
        Ok(index)
    }

    /// Builds the index from the declared token order of a graph.
    pub fn from_graph(doc: &DocumentGraph) -> Result<Self, GraphError> {
        Self::build(doc.tokens().iter().cloned())
    }

    pub fn position_of(&self, id: &NodeId) -> Result<usize, GraphError> {
        self.id2index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownToken(id.clone()))
    }

    pub fn token_at(&self, position: usize) -> Option<&NodeId> {
        self.index2id.get(position)
    }

    pub fn len(&self) -> usize {
        self.index2id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index2id.is_empty()
    }

    /// First and last position covered by a set of tokens.
    ///
    /// The result is the min and max position over the input, so any
    /// permutation of the same tokens gives the same pair.
    pub fn span_offsets<'a, I>(&self, tokens: I) -> Result<(usize, usize), GraphError>
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let mut bounds: Option<(usize, usize)> = None;
        for id in tokens {
            let position = self.position_of(id)?;
            bounds = Some(match bounds {
                Some((first, last)) => (first.min(position), last.max(position)),
                None => (position, position),
            });
        }
        bounds.ok_or(GraphError::EmptySpan { markable: None })
    }
}

/// Offsets of a segment given as token identities.
///
/// Same contract as [`TokenIndex::span_offsets`]; kept as a free function for
/// segment-based exporters that hold the index separately.
pub fn segment_token_offsets(
    segment_tokens: &[NodeId],
    token_index: &TokenIndex,
) -> Result<(usize, usize), GraphError> {
    token_index.span_offsets(segment_tokens)
}

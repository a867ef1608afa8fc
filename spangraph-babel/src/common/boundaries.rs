//! Per-token opening and closing markables.

use super::token_index::TokenIndex;
use crate::error::GraphError;
use crate::graph::{DocumentGraph, NodeId};
use std::collections::{BTreeMap, HashMap};

/// Which markables open and close at each token position.
///
/// Lists keep the order in which markables were indexed; when several spans
/// start or end on the same token, that order is the tie-break.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanBoundaries {
    pub opening: BTreeMap<usize, Vec<NodeId>>,
    pub closing: BTreeMap<usize, Vec<NodeId>>,
    extents: HashMap<NodeId, (usize, usize)>,
}

impl SpanBoundaries {
    /// Indexes the given markables, in the given order.
    ///
    /// Anchors are the first and last document position of each span, as
    /// resolved by the token index, not the first and last stored token.
    pub fn index(
        doc: &DocumentGraph,
        markables: &[NodeId],
        token_index: &TokenIndex,
    ) -> Result<Self, GraphError> {
        let mut boundaries = SpanBoundaries::default();
        for markable in markables {
            let span = doc
                .node(markable)
                .and_then(|node| node.span())
                .ok_or_else(|| GraphError::NotAMarkable(markable.clone()))?;
            if span.is_empty() {
                return Err(GraphError::EmptySpan {
                    markable: Some(markable.clone()),
                });
            }
            let (first, last) = token_index.span_offsets(span)?;
            boundaries
                .opening
                .entry(first)
                .or_default()
                .push(markable.clone());
            boundaries
                .closing
                .entry(last)
                .or_default()
                .push(markable.clone());
            boundaries.extents.insert(markable.clone(), (first, last));
        }
        Ok(boundaries)
    }

    pub fn opening_at(&self, position: usize) -> &[NodeId] {
        self.opening
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn closing_at(&self, position: usize) -> &[NodeId] {
        self.closing
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First and last position of an indexed markable.
    pub fn extent(&self, markable: &NodeId) -> Option<(usize, usize)> {
        self.extents.get(markable).copied()
    }
}

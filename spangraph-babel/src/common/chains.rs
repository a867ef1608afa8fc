//! Grouping of markables into pointing chains.
//!
//! A chain is a connected component of markables under pointing edges, with
//! edge direction ignored. Its identifier is the naturally smallest member.

use super::natural_sort::{natural_cmp, natural_sort};
use crate::graph::{DocumentGraph, NodeId};
use petgraph::unionfind::UnionFind;
use std::collections::{BTreeMap, HashMap};

/// A maximal set of markables linked by pointing relations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    /// Canonical identifier: the first member in natural order
    pub id: NodeId,
    /// Members in natural order
    pub markables: Vec<NodeId>,
}

/// Extracts all chains of a graph, or of one layer.
///
/// Candidates are the markables of the graph (those in `layer`, when given)
/// plus the endpoints of every pointing edge in scope. A candidate without
/// pointing edges becomes a singleton chain. Chains are returned in natural
/// order of their identifiers, so repeated calls give identical results.
pub fn extract_chains(doc: &DocumentGraph, layer: Option<&str>) -> Vec<Chain> {
    let mut candidates: Vec<NodeId> = doc
        .markables()
        .filter(|node| layer.map_or(true, |layer| node.in_layer(layer)))
        .map(|node| node.id.clone())
        .collect();
    let relations: Vec<(&NodeId, &NodeId)> = doc.pointing_relations(layer).collect();
    for (source, target) in &relations {
        candidates.push((*source).clone());
        candidates.push((*target).clone());
    }
    natural_sort(&mut candidates);
    candidates.dedup();

    let position: HashMap<&NodeId, usize> = candidates
        .iter()
        .enumerate()
        .map(|(i, id)| (id, i))
        .collect();
    let mut components = UnionFind::<usize>::new(candidates.len());
    for (source, target) in &relations {
        components.union(position[source], position[target]);
    }

    // candidates are naturally sorted, so members come out sorted too
    let mut grouped: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
    for (i, id) in candidates.iter().enumerate() {
        grouped
            .entry(components.find(i))
            .or_default()
            .push(id.clone());
    }

    let mut chains: Vec<Chain> = grouped
        .into_values()
        .map(|markables| Chain {
            id: markables[0].clone(),
            markables,
        })
        .collect();
    chains.sort_by(|a, b| natural_cmp(a.id.as_str(), b.id.as_str()));

    log::debug!(
        "extracted {} chain(s) over {} markable(s) in '{}'",
        chains.len(),
        candidates.len(),
        doc.name
    );
    chains
}

/// Maps every markable to the identifier of its chain.
pub fn chain_assignment(chains: &[Chain]) -> HashMap<NodeId, NodeId> {
    chains
        .iter()
        .flat_map(|chain| {
            chain
                .markables
                .iter()
                .map(move |markable| (markable.clone(), chain.id.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn doc_with_markables(names: &[&str]) -> DocumentGraph {
        let mut doc = DocumentGraph::new("chains", "test");
        doc.add_node(Node::token("t1", "x"));
        doc.push_token(NodeId::from("t1")).unwrap();
        for name in names {
            doc.add_node(Node::markable(*name, vec![NodeId::from("t1")]).with_layer("coref"));
        }
        doc
    }

    fn point(doc: &mut DocumentGraph, from: &str, to: &str) {
        doc.add_edge(
            &NodeId::from(from),
            &NodeId::from(to),
            Edge::pointing().with_layer("coref"),
        )
        .unwrap();
    }

    fn ids(names: &[&str]) -> Vec<NodeId> {
        names.iter().map(|name| NodeId::from(*name)).collect()
    }

    #[test]
    fn transitive_pointing_forms_one_chain() {
        let mut doc = doc_with_markables(&["markable_10", "markable_2", "markable_7"]);
        point(&mut doc, "markable_10", "markable_7");
        point(&mut doc, "markable_7", "markable_2");

        let chains = extract_chains(&doc, None);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].id, NodeId::from("markable_2"));
        assert_eq!(
            chains[0].markables,
            ids(&["markable_2", "markable_7", "markable_10"])
        );
    }

    #[test]
    fn direction_of_pointing_edges_is_ignored() {
        let mut doc = doc_with_markables(&["a1", "a2", "a3"]);
        point(&mut doc, "a1", "a3");
        point(&mut doc, "a2", "a3");

        let chains = extract_chains(&doc, None);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].markables, ids(&["a1", "a2", "a3"]));
    }

    #[test]
    fn unlinked_markables_are_singletons() {
        let mut doc = doc_with_markables(&["m1", "m2", "m3"]);
        point(&mut doc, "m3", "m1");

        let chains = extract_chains(&doc, None);
        let summary: Vec<_> = chains
            .iter()
            .map(|c| (c.id.as_str(), c.markables.len()))
            .collect();
        assert_eq!(summary, vec![("m1", 2), ("m2", 1)]);
    }

    #[test]
    fn layer_filter_limits_markables_and_edges() {
        let mut doc = doc_with_markables(&["m1", "m2"]);
        doc.add_node(Node::markable("b1", vec![NodeId::from("t1")]).with_layer("bridging"));
        doc.add_edge(
            &NodeId::from("b1"),
            &NodeId::from("m1"),
            Edge::pointing().with_layer("bridging"),
        )
        .unwrap();

        let coref = extract_chains(&doc, Some("coref"));
        assert_eq!(coref.len(), 2);
        assert!(coref.iter().all(|c| c.markables.len() == 1));

        let bridging = extract_chains(&doc, Some("bridging"));
        assert_eq!(bridging.len(), 1);
        assert_eq!(bridging[0].markables, ids(&["b1", "m1"]));
    }

    #[test]
    fn extraction_is_idempotent() {
        let mut doc = doc_with_markables(&["m3", "m12", "m1", "m2"]);
        point(&mut doc, "m12", "m3");
        point(&mut doc, "m2", "m1");
        assert_eq!(extract_chains(&doc, None), extract_chains(&doc, None));
    }

    #[test]
    fn assignment_maps_members_to_chain_id() {
        let mut doc = doc_with_markables(&["m1", "m2", "m5"]);
        point(&mut doc, "m2", "m1");
        let assignment = chain_assignment(&extract_chains(&doc, None));
        assert_eq!(assignment[&NodeId::from("m2")], NodeId::from("m1"));
        assert_eq!(assignment[&NodeId::from("m1")], NodeId::from("m1"));
        assert_eq!(assignment[&NodeId::from("m5")], NodeId::from("m5"));
    }
}

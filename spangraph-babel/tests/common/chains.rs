use proptest::prelude::*;
use spangraph_babel::common::{chain_assignment, extract_chains, natural_cmp};
use spangraph_babel::graph::{DocumentGraph, Edge, Node, NodeId};
use std::cmp::Ordering;

fn graph(markables: usize, pointing: &[(usize, usize)]) -> DocumentGraph {
    let mut doc = DocumentGraph::new("chains", "test");
    doc.add_node(Node::token("t1", "x"));
    doc.push_token(NodeId::from("t1")).unwrap();
    for i in 1..=markables {
        doc.add_node(Node::markable(format!("m{i}"), vec![NodeId::from("t1")]));
    }
    for (from, to) in pointing {
        doc.add_edge(
            &NodeId::from(format!("m{from}")),
            &NodeId::from(format!("m{to}")),
            Edge::pointing(),
        )
        .unwrap();
    }
    doc
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..15).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((1..=n, 1..=n), 0..n * 2),
        )
    })
}

proptest! {
    #[test]
    fn chains_are_idempotent((n, pointing) in graph_strategy()) {
        let doc = graph(n, &pointing);
        prop_assert_eq!(extract_chains(&doc, None), extract_chains(&doc, None));
    }

    #[test]
    fn chains_partition_the_markables((n, pointing) in graph_strategy()) {
        let doc = graph(n, &pointing);
        let chains = extract_chains(&doc, None);

        let assignment = chain_assignment(&chains);
        prop_assert_eq!(assignment.len(), n);
        let members: usize = chains.iter().map(|chain| chain.markables.len()).sum();
        prop_assert_eq!(members, n);

        for chain in &chains {
            prop_assert_eq!(&chain.id, &chain.markables[0]);
            for pair in chain.markables.windows(2) {
                prop_assert_eq!(natural_cmp(pair[0].as_str(), pair[1].as_str()), Ordering::Less);
            }
        }
        for (from, to) in &pointing {
            let from = NodeId::from(format!("m{from}"));
            let to = NodeId::from(format!("m{to}"));
            prop_assert_eq!(&assignment[&from], &assignment[&to]);
        }
    }
}

//! Export tests for the bracketed chain format (graph → text)

use spangraph_babel::formats::brackets::{serialize_brackets, write_brackets, write_brackets_to};
use spangraph_babel::graph::{DocumentGraph, Edge, Node, NodeId};
use spangraph_babel::{FormatError, FormatRegistry, GraphError};

fn tokens(surfaces: &[&str]) -> DocumentGraph {
    let mut doc = DocumentGraph::new("maz-1423", "mmax");
    for (i, surface) in surfaces.iter().enumerate() {
        let id = format!("word_{}", i + 1);
        doc.add_node(Node::token(id.as_str(), *surface).with_layer("mmax"));
        doc.push_token(NodeId::from(id)).unwrap();
    }
    doc
}

fn markable(doc: &mut DocumentGraph, id: &str, span: &[&str]) {
    let span = span.iter().map(|t| NodeId::from(*t)).collect();
    doc.add_node(Node::markable(id, span).with_layer("mmax"));
}

#[test]
fn test_two_mentions_of_one_chain() {
    let mut doc = tokens(&["Die", "Stadt"]);
    markable(&mut doc, "markable_1", &["word_1"]);
    markable(&mut doc, "markable_2", &["word_2"]);
    doc.add_edge(
        &NodeId::from("markable_2"),
        &NodeId::from("markable_1"),
        Edge::pointing().with_layer("mmax"),
    )
    .unwrap();

    assert_eq!(
        serialize_brackets(&doc, None).unwrap(),
        "[Die]_{markable_1} [Stadt]_{markable_1} "
    );
}

#[test]
fn test_chain_id_is_the_naturally_smallest_member() {
    let mut doc = tokens(&["er", "sagte", ",", "der", "Mann", "komme"]);
    markable(&mut doc, "markable_10", &["word_1"]);
    markable(&mut doc, "markable_9", &["word_4", "word_5"]);
    doc.add_edge(
        &NodeId::from("markable_10"),
        &NodeId::from("markable_9"),
        Edge::pointing(),
    )
    .unwrap();

    assert_eq!(
        serialize_brackets(&doc, None).unwrap(),
        "[er]_{markable_9} sagte , [der Mann]_{markable_9} komme "
    );
}

#[test]
fn test_markables_out_of_token_order() {
    // token ids say nothing about position
    let mut doc = DocumentGraph::new("rs3", "rst");
    for (id, surface) in [("12", "Sie"), ("3", "kam"), ("7", "spät")] {
        doc.add_node(Node::token(id, surface));
        doc.push_token(NodeId::from(id)).unwrap();
    }
    markable(&mut doc, "seg2", &["7", "3"]);
    markable(&mut doc, "seg1", &["12"]);

    assert_eq!(
        serialize_brackets(&doc, None).unwrap(),
        "[Sie]_{seg1} [kam spät]_{seg2} "
    );
}

#[test]
fn test_crossing_markables_report_position_and_open_spans() {
    let mut doc = tokens(&["a", "b", "c", "d"]);
    markable(&mut doc, "m1", &["word_1", "word_3"]);
    markable(&mut doc, "m2", &["word_2", "word_4"]);

    let err = serialize_brackets(&doc, None).unwrap_err();
    assert_eq!(
        err,
        GraphError::UnbalancedSpans {
            position: 2,
            open: vec![NodeId::from("m1"), NodeId::from("m2")],
        }
    );
    assert_eq!(
        err.to_string(),
        "unbalanced spans at token position 2, open markables: m1, m2"
    );
}

#[test]
fn test_empty_markable_is_rejected() {
    let mut doc = tokens(&["a"]);
    markable(&mut doc, "m1", &[]);
    assert_eq!(
        serialize_brackets(&doc, None),
        Err(GraphError::EmptySpan {
            markable: Some(NodeId::from("m1"))
        })
    );
}

#[test]
fn test_registry_serializes_by_name() {
    let mut doc = tokens(&["Die", "Stadt"]);
    markable(&mut doc, "m1", &["word_1", "word_2"]);

    let registry = FormatRegistry::default();
    assert_eq!(
        registry.serialize(&doc, "brackets").unwrap(),
        "[Die Stadt]_{m1} "
    );
    assert!(matches!(
        registry.parse("(S (NN a))", "treeviz"),
        Err(FormatError::NotSupported(_))
    ));
}

#[test]
fn test_write_targets() {
    let mut doc = tokens(&["Die", "Stadt"]);
    markable(&mut doc, "m1", &["word_2"]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("brackets").join("maz-1423.brackets");
    write_brackets(&doc, &path, Some("mmax")).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "Die [Stadt]_{m1} ");
    assert!(!written.ends_with('\n'));

    let mut buffer = std::io::Cursor::new(Vec::new());
    write_brackets_to(&doc, &mut buffer, None).unwrap();
    assert_eq!(buffer.into_inner(), written.into_bytes());
}

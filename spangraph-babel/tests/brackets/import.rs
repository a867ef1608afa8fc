//! Import tests for the bracketed chain format (text → graph)

use spangraph_babel::common::extract_chains;
use spangraph_babel::format::Format;
use spangraph_babel::formats::brackets::BracketsFormat;
use spangraph_babel::graph::NodeId;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

#[test]
fn test_fixture_chains() {
    let doc = BracketsFormat::default()
        .parse(&fixture("maz_sample.brackets"))
        .unwrap();

    assert_eq!(doc.tokens().len(), 14);
    let chains: Vec<(String, Vec<String>)> = extract_chains(&doc, Some("brackets"))
        .into_iter()
        .map(|chain| {
            (
                chain.id.to_string(),
                chain.markables.iter().map(NodeId::to_string).collect(),
            )
        })
        .collect();
    assert_eq!(
        chains,
        vec![
            ("m1".to_string(), vec!["m1".to_string(), "m1_2".to_string()]),
            ("m5".to_string(), vec!["m5".to_string(), "m5_2".to_string()]),
            ("m9".to_string(), vec!["m9".to_string()]),
            ("m12".to_string(), vec!["m12".to_string()]),
        ]
    );
}

#[test]
fn test_fixture_survives_a_round_trip() {
    let format = BracketsFormat::default();
    let source = fixture("maz_sample.brackets");
    let doc = format.parse(&source).unwrap();
    assert_eq!(format.serialize(&doc).unwrap(), source);
}

#[test]
fn test_inner_span_sharing_a_first_token() {
    let format = BracketsFormat::default();
    let doc = format.parse("[[ihren]_{m1} Haushalt]_{m5}").unwrap();

    let inner = doc.node(&NodeId::from("m1")).unwrap();
    assert_eq!(inner.span().map(<[NodeId]>::len), Some(1));
    let outer = doc.node(&NodeId::from("m5")).unwrap();
    assert_eq!(outer.span().map(<[NodeId]>::len), Some(2));
}

//! Import tests for Penn Treebank files (.mrg → graph)

use spangraph_babel::format::Format;
use spangraph_babel::formats::ptb::{PtbFormat, PtbOptions};
use spangraph_babel::graph::{DocumentGraph, EdgeType, NodeId};
use spangraph_babel::FormatRegistry;
use std::collections::HashMap;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

fn surfaces(doc: &DocumentGraph) -> Vec<&str> {
    doc.tokens()
        .iter()
        .map(|id| doc.get_token(id).unwrap())
        .collect()
}

#[test]
fn test_wsj_fixture() {
    let doc = PtbFormat::default().parse(&fixture("wsj_0001.mrg")).unwrap();

    assert_eq!(doc.sentences().len(), 2);
    assert_eq!(doc.tokens().len(), 31);
    let words = surfaces(&doc);
    assert_eq!(&words[..4], &["Pierre", "Vinken", ",", "61"]);
    assert_eq!(&words[18..21], &["Mr.", "Vinken", "is"]);
    assert_eq!(words.last(), Some(&"."));

    let first = doc.node(&doc.sentences()[0]).unwrap();
    assert_eq!(first.label.as_deref(), Some("S"));
}

#[test]
fn test_every_token_hangs_below_a_spanning_edge() {
    let doc = PtbFormat::default().parse(&fixture("wsj_0001.mrg")).unwrap();

    let spanned: Vec<&NodeId> = doc
        .edges()
        .filter(|(_, target, e)| e.edge_type == EdgeType::Spanning && doc.node(target).unwrap().is_token())
        .map(|(_, target, _)| target)
        .collect();
    let tokens: Vec<&NodeId> = doc.tokens().iter().collect();
    assert_eq!(spanned, tokens);
}

#[test]
fn test_registry_detects_and_parses_mrg() {
    let registry = FormatRegistry::default();
    let format = registry.detect_format_from_filename("wsj_0001.mrg").unwrap();

    let mut options = HashMap::new();
    options.insert("limit".to_string(), "1".to_string());
    options.insert("name".to_string(), "wsj_0001".to_string());
    let doc = registry
        .parse_with_options(&fixture("wsj_0001.mrg"), &format, &options)
        .unwrap();

    assert_eq!(doc.name, "wsj_0001");
    assert_eq!(doc.sentences().len(), 1);
    assert_eq!(doc.tokens().len(), 18);
}

#[test]
fn test_precedence_option_links_every_token_once() {
    let format = PtbFormat::new(PtbOptions {
        precedence: true,
        ..PtbOptions::default()
    });
    let doc = format.parse(&fixture("wsj_0001.mrg")).unwrap();

    let precedence = doc
        .edges()
        .filter(|(_, _, e)| e.edge_type == EdgeType::Precedence)
        .count();
    assert_eq!(precedence, doc.tokens().len());
}

#[test]
fn test_graph_view_serializes_to_json() {
    let doc = PtbFormat::default()
        .parse("(S (NP (NNP John)) (VP (VBZ runs)))")
        .unwrap();
    let json = serde_json::to_value(doc.view()).unwrap();

    assert_eq!(json["root"], "0");
    assert_eq!(json["tokens"], serde_json::json!(["4", "7"]));
    assert_eq!(json["nodes"].as_array().unwrap().len(), 8);
    assert_eq!(json["edges"][0]["edge_type"], "spanning_relation");
    assert_eq!(json["edges"][1]["edge_type"], "dominance_relation");
}

//! CLI-specific transforms
//!
//! This module defines the inspection views available in the CLI. Each
//! transform is a subject + format combination (e.g., "graph-treeviz",
//! "chains-simple") applied to a graph that was read by one of the importers.
//!
//! ## Transforms
//!
//! - `graph-treeviz`: Tree drawing of the dominance/spanning structure plus markables
//! - `graph-json`: Full node and edge listing as JSON
//! - `tokens-simple`: One token per line: position, identity, surface
//! - `chains-simple`: One chain per line: chain id, then its markables
//!
//! ## Extra Parameters
//!
//! - `node-ids`: "true" prefixes treeviz labels with node identities
//! - `layer`: restricts `chains-simple` to markables and pointing edges of a layer
//!
//! Example: `spangraph inspect doc.brackets chains-simple --extra-layer coref`

use spangraph_babel::common::extract_chains;
use spangraph_babel::formats::treeviz::to_treeviz_str_with_params;
use spangraph_babel::DocumentGraph;
use std::collections::HashMap;

/// All available CLI transforms (subject + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] = &[
    "graph-treeviz",
    "graph-json",
    "tokens-simple",
    "chains-simple",
];

/// Execute a named transform on a graph with optional extra parameters
///
/// Parameters a transform does not understand are rejected, so that a
/// misspelled `--extra-*` flag does not go unnoticed.
///
/// # Examples
///
/// ```ignore
/// let doc = FormatRegistry::default().parse(source, "ptb")?;
/// let output = execute_transform(&doc, "graph-treeviz", &HashMap::new())?;
/// ```
pub fn execute_transform(
    doc: &DocumentGraph,
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    match transform_name {
        "graph-treeviz" => {
            let params = accept_params(transform_name, extra_params, &["node-ids"])?;
            to_treeviz_str_with_params(doc, &params).map_err(|e| format!("Transform failed: {e}"))
        }
        "graph-json" => {
            accept_params(transform_name, extra_params, &[])?;
            serde_json::to_string_pretty(&doc.view())
                .map(|json| json + "\n")
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "tokens-simple" => {
            accept_params(transform_name, extra_params, &[])?;
            tokens_to_simple(doc)
        }
        "chains-simple" => {
            let params = accept_params(transform_name, extra_params, &["layer"])?;
            Ok(chains_to_simple(doc, params.get("layer").map(String::as_str)))
        }
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

fn accept_params(
    transform_name: &str,
    params: &HashMap<String, String>,
    known: &[&str],
) -> Result<HashMap<String, String>, String> {
    match params.keys().find(|key| !known.contains(&key.as_str())) {
        Some(key) => Err(format!(
            "Transform '{transform_name}' does not support parameter '{key}'"
        )),
        None => Ok(params.clone()),
    }
}

fn tokens_to_simple(doc: &DocumentGraph) -> Result<String, String> {
    let mut output = String::new();
    for (position, id) in doc.tokens().iter().enumerate() {
        let surface = doc.get_token(id).map_err(|e| e.to_string())?;
        output.push_str(&format!("{position}\t{id}\t{surface}\n"));
    }
    Ok(output)
}

fn chains_to_simple(doc: &DocumentGraph, layer: Option<&str>) -> String {
    extract_chains(doc, layer)
        .iter()
        .map(|chain| {
            let members: Vec<&str> = chain.markables.iter().map(|m| m.as_str()).collect();
            format!("{}: {}\n", chain.id, members.join(" "))
        })
        .collect()
}

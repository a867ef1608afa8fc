//! Inline bracket rendering of markable chains.
//!
//! Every token is written followed by a single space. A markable opens with
//! `[` before its first token and closes with `]_{chain}` after its last one,
//! where `chain` is the identifier of the chain the markable belongs to:
//!
//! ```text
//! [Die]_{m1} [Stadt]_{m1}
//! ```
//!
//! Rendering keeps an explicit stack of open markables. A close always pops
//! the innermost open markable, so spans must nest; crossing spans are
//! reported instead of being attributed to the wrong chain.

use crate::common::{
    chain_assignment, extract_chains, natural_sort, SpanBoundaries, TokenIndex,
};
use crate::error::{FormatError, GraphError};
use crate::graph::{DocumentGraph, NodeId};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Renders the markables of a graph (or of one layer) as bracketed text.
///
/// With a layer, every member of the layer's chains is rendered: markables
/// of the layer plus the endpoints of its pointing edges.
pub fn serialize_brackets(doc: &DocumentGraph, layer: Option<&str>) -> Result<String, GraphError> {
    let chains = extract_chains(doc, layer);
    let chain_of = chain_assignment(&chains);

    let mut markables: Vec<NodeId> = chains
        .iter()
        .flat_map(|chain| chain.markables.iter().cloned())
        .collect();
    natural_sort(&mut markables);
    if let Some(layer) = layer {
        if markables.is_empty() && doc.markables().next().is_some() {
            log::warn!(
                "no markables of layer '{layer}' in '{}', writing plain tokens",
                doc.name
            );
        }
    }

    let token_index = TokenIndex::from_graph(doc)?;
    let boundaries = SpanBoundaries::index(doc, &markables, &token_index)?;
    render(doc, &token_index, &boundaries, &chain_of)
}

/// Writes the bracketed rendering to a file, creating parent directories.
pub fn write_brackets(
    doc: &DocumentGraph,
    path: impl AsRef<Path>,
    layer: Option<&str>,
) -> Result<(), FormatError> {
    let path = path.as_ref();
    let text = serialize_brackets(doc, layer)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    log::info!("wrote brackets for '{}' to {}", doc.name, path.display());
    Ok(())
}

/// Writes the bracketed rendering to an open sink.
pub fn write_brackets_to<W: Write>(
    doc: &DocumentGraph,
    writer: &mut W,
    layer: Option<&str>,
) -> Result<(), FormatError> {
    let text = serialize_brackets(doc, layer)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Renders tokens and span boundaries into bracketed text.
///
/// Markables opening on the same token are pushed outermost first: the one
/// closing later goes first, ties keep the order of `opening`. A markable
/// missing from `chain_of` is written with its own identifier.
pub fn render(
    doc: &DocumentGraph,
    token_index: &TokenIndex,
    boundaries: &SpanBoundaries,
    chain_of: &HashMap<NodeId, NodeId>,
) -> Result<String, GraphError> {
    let mut output = String::new();
    let mut stack: Vec<&NodeId> = Vec::new();

    for position in 0..token_index.len() {
        let Some(token) = token_index.token_at(position) else {
            break;
        };

        let mut opening: Vec<&NodeId> = boundaries.opening_at(position).iter().collect();
        opening.sort_by_key(|markable| {
            Reverse(boundaries.extent(markable).map_or(position, |(_, last)| last))
        });
        for markable in opening {
            stack.push(markable);
            output.push('[');
        }

        output.push_str(doc.get_token(token)?);

        let closing = boundaries.closing_at(position);
        for _ in closing {
            let innermost = match stack.last() {
                Some(markable) if closing.contains(markable) => *markable,
                _ => return Err(unbalanced(position, &stack)),
            };
            stack.pop();
            let chain = chain_of.get(innermost).unwrap_or(innermost);
            output.push_str("]_{");
            output.push_str(chain.as_str());
            output.push('}');
        }

        output.push(' ');
    }

    if !stack.is_empty() {
        return Err(unbalanced(token_index.len(), &stack));
    }
    Ok(output)
}

fn unbalanced(position: usize, stack: &[&NodeId]) -> GraphError {
    GraphError::UnbalancedSpans {
        position,
        open: stack.iter().map(|id| (*id).clone()).collect(),
    }
}

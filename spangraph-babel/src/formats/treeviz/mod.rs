//! Treeviz formatter for document graphs
//!
//! Treeviz draws the structure below the document root as a tree, following
//! dominance and spanning edges, then lists the markables with their tokens
//! and outgoing pointing edges.
//!
//! Each line is:
//! <prefix><connector> <icon> <label>
//!
//! Example:
//!
//! ```text
//! ⧉ document (1 sentences, 2 tokens, 0 markables)
//! └─ § S
//!   ├─ § NP
//!   │ └─ § NNP
//!   │   └─ ◦ John
//!   └─ § VP
//!     └─ § VBZ
//!       └─ ◦ runs
//! ```
//!
//! Icons
//!     Document: ⧉
//!     Structural node: §
//!     Token: ◦
//!     Markable: ◇
//!     Pointing edge: →
//!     Already shown: ↺

use crate::error::FormatError;
use crate::format::Format;
use crate::graph::{DocumentGraph, EdgeType, Node, NodeId, NodeKind};
use std::collections::{HashMap, HashSet};

struct TreeWriter<'a> {
    doc: &'a DocumentGraph,
    show_node_ids: bool,
    visited: HashSet<&'a NodeId>,
    output: String,
}

impl<'a> TreeWriter<'a> {
    fn node_text(&self, node: &Node) -> String {
        let (icon, label) = match &node.kind {
            NodeKind::Token { surface } => ("◦", surface.clone()),
            NodeKind::Markable { span } => {
                let words: Vec<&str> = span
                    .iter()
                    .filter_map(|id| self.doc.get_token(id).ok())
                    .collect();
                ("◇", format!("[{}]", words.join(" ")))
            }
            NodeKind::Structural => ("§", node.label.clone().unwrap_or_default()),
        };
        if self.show_node_ids {
            format!("{icon} {}: {label}", node.id)
        } else {
            format!("{icon} {label}")
        }
    }

    fn line(&mut self, prefix: &str, is_last: bool, text: &str) {
        let connector = if is_last { "└─" } else { "├─" };
        self.output
            .push_str(&format!("{prefix}{connector} {text}\n"));
    }

    /// Draws `children` and everything below them, depth first.
    ///
    /// Pending nodes live on an explicit stack, so deep trees do not grow
    /// the call stack. The last child closes its branch only when
    /// `last_closes` is set.
    fn write_subtrees(&mut self, children: &[&'a NodeId], prefix: &str, last_closes: bool) {
        let mut pending = Vec::new();
        push_children(&mut pending, children, prefix, last_closes);

        while let Some((id, prefix, is_last)) = pending.pop() {
            let Some(node) = self.doc.node(id) else {
                continue;
            };
            if !self.visited.insert(id) {
                self.line(&prefix, is_last, &format!("↺ {id}"));
                continue;
            }
            let text = self.node_text(node);
            self.line(&prefix, is_last, &text);

            let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
            let children = tree_children(self.doc, id);
            push_children(&mut pending, &children, &child_prefix, true);
        }
    }

    fn write_markable(&mut self, node: &'a Node, prefix: &str, is_last: bool) {
        let text = self.node_text(node);
        self.line(prefix, is_last, &text);

        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        let targets: Vec<&NodeId> = self
            .doc
            .out_edges(&node.id)
            .into_iter()
            .filter(|(_, edge)| edge.edge_type == EdgeType::Pointing)
            .map(|(target, _)| target)
            .collect();
        for (i, target) in targets.iter().enumerate() {
            self.line(&child_prefix, i == targets.len() - 1, &format!("→ {target}"));
        }
    }
}

/// Pushes in reverse so the first child is drawn first.
fn push_children<'a>(
    pending: &mut Vec<(&'a NodeId, String, bool)>,
    children: &[&'a NodeId],
    prefix: &str,
    last_closes: bool,
) {
    for (i, &child) in children.iter().enumerate().rev() {
        let is_last = last_closes && i + 1 == children.len();
        pending.push((child, prefix.to_string(), is_last));
    }
}

fn tree_children<'a>(doc: &'a DocumentGraph, id: &NodeId) -> Vec<&'a NodeId> {
    doc.out_edges(id)
        .into_iter()
        .filter(|(_, edge)| matches!(edge.edge_type, EdgeType::Dominance | EdgeType::Spanning))
        .map(|(target, _)| target)
        .collect()
}

pub fn to_treeviz_str(doc: &DocumentGraph) -> String {
    render_treeviz(doc, false)
}

/// Convert a document graph to a treeviz string with optional parameters
///
/// # Parameters
///
/// - `"node-ids"`: When set to `"true"`, prefixes every label with its node id
pub fn to_treeviz_str_with_params(
    doc: &DocumentGraph,
    params: &HashMap<String, String>,
) -> Result<String, FormatError> {
    let mut show_node_ids = false;
    for (key, value) in params {
        match key.as_str() {
            "node-ids" => show_node_ids = value.to_lowercase() == "true",
            other => {
                return Err(FormatError::NotSupported(format!(
                    "Format 'treeviz' does not support parameter '{other}'"
                )))
            }
        }
    }
    Ok(render_treeviz(doc, show_node_ids))
}

fn render_treeviz(doc: &DocumentGraph, show_node_ids: bool) -> String {
    let markables: Vec<&Node> = doc.markables().collect();
    let mut writer = TreeWriter {
        doc,
        show_node_ids,
        visited: HashSet::from([doc.root()]),
        output: format!(
            "⧉ {} ({} sentences, {} tokens, {} markables)\n",
            doc.name,
            doc.sentences().len(),
            doc.tokens().len(),
            markables.len()
        ),
    };

    let children = tree_children(doc, doc.root());
    writer.write_subtrees(&children, "", markables.is_empty());
    for (i, &markable) in markables.iter().enumerate() {
        writer.write_markable(markable, "", i + 1 == markables.len());
    }
    writer.output
}

/// Format implementation for treeviz format
#[derive(Debug, Clone, Default)]
pub struct TreevizFormat {
    show_node_ids: bool,
}

impl TreevizFormat {
    pub fn new(show_node_ids: bool) -> Self {
        Self { show_node_ids }
    }
}

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation of the document graph"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &DocumentGraph) -> Result<String, FormatError> {
        Ok(render_treeviz(doc, self.show_node_ids))
    }

    fn serialize_with_options(
        &self,
        doc: &DocumentGraph,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            return self.serialize(doc);
        }
        to_treeviz_str_with_params(doc, options)
    }
}

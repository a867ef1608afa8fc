//! Reads bracketed chain text back into a document graph.
//!
//! Whitespace separates tokens. Leading `[` characters open markables and
//! trailing `]_{label}` groups close them, innermost first. Each closed
//! markable becomes a markable node; all markables closed with the same label
//! form one chain.
//!
//! Markable identities are derived from the label: the first markable closed
//! with `L` is `L`, later ones `L_2`, `L_3`, and so on. Every later member
//! points to the member before it. The naturally smallest member is then `L`
//! itself, so rendering the graph again writes the same chain labels.
//!
//! All labels are collected before any node is created. Token ids (`tok1`,
//! `tok2`, ...), the document root (`0`) and later chain members then skip
//! every id a label claims, taking the next free `_N` suffix instead.

use crate::error::FormatError;
use crate::graph::{DocumentGraph, Edge, Node, NodeId};
use std::collections::{HashMap, HashSet};

/// Options for reading bracketed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    pub name: String,
    /// Layer for markables and pointing edges
    pub layer: String,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            name: "document".to_string(),
            layer: "brackets".to_string(),
        }
    }
}

/// One whitespace-separated word split into brackets and surface.
#[derive(Debug, PartialEq, Eq)]
struct Word<'a> {
    opens: usize,
    surface: &'a str,
    /// Chain labels in closing order, innermost first
    closes: Vec<&'a str>,
}

fn split_word(word: &str) -> Word<'_> {
    let mut rest = word;
    let mut opens = 0;
    // a lone "[" is a token, not a bracket
    while rest.len() > 1 && rest.starts_with('[') {
        rest = &rest[1..];
        opens += 1;
    }

    let mut closes = Vec::new();
    while rest.ends_with('}') {
        match rest.rfind("]_{") {
            Some(at) if at > 0 && !rest[at + 3..rest.len() - 1].contains('}') => {
                closes.push(&rest[at + 3..rest.len() - 1]);
                rest = &rest[..at];
            }
            _ => break,
        }
    }
    closes.reverse();

    Word {
        opens,
        surface: rest,
        closes,
    }
}

struct ChainReader<'a> {
    doc: DocumentGraph,
    layer: String,
    /// Every chain label of the input; generated ids never take one
    labels: HashSet<&'a str>,
    open: Vec<usize>,
    members: HashMap<String, (usize, NodeId)>,
}

impl<'a> ChainReader<'a> {
    fn new(options: &ReadOptions, labels: HashSet<&'a str>) -> Self {
        let (_, root) = free_id("0", 1, |id| labels.contains(id.as_str()));
        ChainReader {
            doc: DocumentGraph::with_root(options.name.clone(), options.layer.clone(), root),
            layer: options.layer.clone(),
            labels,
            open: Vec::new(),
            members: HashMap::new(),
        }
    }

    /// First of `base`, `base_2`, `base_3`, ... (from suffix `first`) that is
    /// neither a chain label nor a node of the graph.
    fn fresh_id(&self, base: &str, first: usize) -> (usize, NodeId) {
        free_id(base, first, |id| {
            self.labels.contains(id.as_str()) || self.doc.contains(id)
        })
    }

    fn read_word(&mut self, word: Word<'_>) -> Result<(), FormatError> {
        let Word {
            opens,
            surface,
            closes,
        } = word;

        let position = self.doc.tokens().len();
        self.open.extend(std::iter::repeat(position).take(opens));

        let (_, token) = self.fresh_id(&format!("tok{}", position + 1), 1);
        let token_key = self.doc.ns_key("token");
        self.doc.add_node(
            Node::token(token.clone(), surface)
                .with_label(surface)
                .with_attribute(token_key, surface),
        );
        self.doc.push_token(token)?;

        for label in closes {
            let start = self.open.pop().ok_or_else(|| {
                FormatError::ParseError(format!(
                    "']_{{{label}}}' after token {} closes nothing",
                    position + 1
                ))
            })?;
            self.add_markable(label, start, position)?;
        }
        Ok(())
    }

    fn add_markable(&mut self, label: &str, start: usize, end: usize) -> Result<(), FormatError> {
        let span = self.doc.tokens()[start..=end].to_vec();
        let (suffix, id, previous) = match self.members.get(label) {
            Some((count, previous)) => {
                let (suffix, id) = self.fresh_id(label, count + 1);
                (suffix, id, Some(previous.clone()))
            }
            None => (1, NodeId::from(label), None),
        };
        if self.doc.contains(&id) {
            return Err(FormatError::ParseError(format!(
                "markable id '{id}' for chain '{label}' is already taken"
            )));
        }

        self.doc
            .add_node(Node::markable(id.clone(), span).with_layer(self.layer.clone()));
        if let Some(previous) = previous {
            self.doc.add_edge(
                &id,
                &previous,
                Edge::pointing().with_layer(self.layer.clone()),
            )?;
        }
        self.members.insert(label.to_string(), (suffix, id));
        Ok(())
    }

    fn finish(self) -> Result<DocumentGraph, FormatError> {
        if let Some(start) = self.open.last() {
            return Err(FormatError::ParseError(format!(
                "{} bracket(s) still open at end of input, innermost opened at token {}",
                self.open.len(),
                start + 1
            )));
        }
        Ok(self.doc)
    }
}

fn member_id(label: &str, n: usize) -> NodeId {
    if n == 1 {
        NodeId::from(label)
    } else {
        NodeId::from(format!("{label}_{n}"))
    }
}

fn free_id(base: &str, first: usize, taken: impl Fn(&NodeId) -> bool) -> (usize, NodeId) {
    let mut n = first;
    let mut id = member_id(base, n);
    while taken(&id) {
        n += 1;
        id = member_id(base, n);
    }
    (n, id)
}

/// Parses bracketed chain text into a graph.
pub fn parse_brackets(source: &str, options: &ReadOptions) -> Result<DocumentGraph, FormatError> {
    let words: Vec<Word<'_>> = source.split_whitespace().map(split_word).collect();
    let labels = words
        .iter()
        .flat_map(|word| word.closes.iter().copied())
        .collect();

    let mut reader = ChainReader::new(options, labels);
    for word in words {
        reader.read_word(word)?;
    }
    reader.finish()
}

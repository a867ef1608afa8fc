//! Reader for Penn Treebank style bracketed trees (`.mrg` files).
//!
//! Each top-level bracket group is one sentence. Treebank files wrap every
//! sentence in an extra label-less bracket, `( (S ...) )`; that wrapper is
//! stripped when it holds a single tree.
//!
//! The reader is lazy: sentences are parsed one at a time, so a caller that
//! stops after `n` sentences never looks at the rest of the input.

use crate::error::FormatError;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// A constituency tree as handed to the graph builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTree {
    /// A labelled node with ordered children
    Internal {
        label: String,
        children: Vec<ParseTree>,
    },
    /// A terminal token
    Leaf { surface: String },
}

impl ParseTree {
    pub fn internal(label: impl Into<String>, children: Vec<ParseTree>) -> Self {
        ParseTree::Internal {
            label: label.into(),
            children,
        }
    }

    pub fn leaf(surface: impl Into<String>) -> Self {
        ParseTree::Leaf {
            surface: surface.into(),
        }
    }

    /// The node label, or the surface string of a leaf.
    pub fn label(&self) -> &str {
        match self {
            ParseTree::Internal { label, .. } => label,
            ParseTree::Leaf { surface } => surface,
        }
    }

    /// Surface strings of all leaves, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a str>) {
        match self {
            ParseTree::Internal { children, .. } => {
                for child in children {
                    child.collect_leaves(leaves);
                }
            }
            ParseTree::Leaf { surface } => leaves.push(surface),
        }
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTree::Leaf { surface } => f.write_str(surface),
            ParseTree::Internal { label, children } => {
                write!(f, "({label}")?;
                for child in children {
                    write!(f, " {child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Bracket nesting beyond this is rejected; treebank trees stay far below it.
pub const MAX_TREE_DEPTH: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Lexeme<'a> {
    Open,
    Close,
    Atom(&'a str),
}

/// Iterator over the sentences of a bracketed tree file.
pub struct TreeReader<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    failed: bool,
}

impl<'a> TreeReader<'a> {
    pub fn new(source: &'a str) -> Self {
        TreeReader {
            source,
            chars: source.char_indices().peekable(),
            failed: false,
        }
    }

    fn next_lexeme(&mut self) -> Option<(usize, Lexeme<'a>)> {
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.chars.next();
        }
        let (start, c) = self.chars.next()?;
        match c {
            '(' => Some((start, Lexeme::Open)),
            ')' => Some((start, Lexeme::Close)),
            _ => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, c)) = self.chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' {
                        break;
                    }
                    end = i + c.len_utf8();
                    self.chars.next();
                }
                Some((start, Lexeme::Atom(&self.source[start..end])))
            }
        }
    }

    /// Parses the rest of a tree whose opening bracket was at `open_at`.
    ///
    /// An atom directly after the bracket is the label; `( (S ...) )` has none.
    fn parse_tree(&mut self, open_at: usize, depth: usize) -> Result<ParseTree, FormatError> {
        if depth > MAX_TREE_DEPTH {
            return Err(FormatError::ParseError(format!(
                "tree nested deeper than {MAX_TREE_DEPTH} levels at byte {open_at}"
            )));
        }
        let mut label = String::new();
        let mut children = Vec::new();
        let mut at_label = true;
        loop {
            match self.next_lexeme() {
                Some((at, Lexeme::Open)) => children.push(self.parse_tree(at, depth + 1)?),
                Some((_, Lexeme::Close)) => return Ok(ParseTree::internal(label, children)),
                Some((_, Lexeme::Atom(atom))) if at_label => label = atom.to_string(),
                Some((_, Lexeme::Atom(atom))) => children.push(ParseTree::leaf(atom)),
                None => return Err(unclosed(open_at)),
            }
            at_label = false;
        }
    }
}

fn unclosed(open_at: usize) -> FormatError {
    FormatError::ParseError(format!(
        "bracket opened at byte {open_at} is never closed"
    ))
}

impl Iterator for TreeReader<'_> {
    type Item = Result<ParseTree, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = match self.next_lexeme()? {
            (at, Lexeme::Open) => self.parse_tree(at, 1).map(strip_wrapper),
            (at, Lexeme::Close) => Err(FormatError::ParseError(format!(
                "unexpected ')' at byte {at}"
            ))),
            (at, Lexeme::Atom(atom)) => Err(FormatError::ParseError(format!(
                "unexpected '{atom}' outside of a tree at byte {at}"
            ))),
        };
        self.failed = result.is_err();
        Some(result)
    }
}

/// Removes the label-less bracket treebank files put around each sentence.
fn strip_wrapper(tree: ParseTree) -> ParseTree {
    match tree {
        ParseTree::Internal {
            label,
            mut children,
        } if label.is_empty()
            && children.len() == 1
            && matches!(children[0], ParseTree::Internal { .. }) =>
        {
            children.remove(0)
        }
        other => other,
    }
}

/// Parses all sentences of a bracketed tree file.
pub fn parse_trees(source: &str) -> Result<Vec<ParseTree>, FormatError> {
    TreeReader::new(source).collect()
}

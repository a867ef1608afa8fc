//! Span graphs for annotated corpora
//!
//! ```text
//!     This crate holds the document graph shared by all formats, and the format adapters that
//!     fill it or read from it: constituency trees come in through the Penn Treebank reader,
//!     markable chains go out (and come back) as inline bracketed text.
//!
//!     This is a pure lib, that is, it powers the spangraph cli but is shell agnostic: no code
//!     should be written that supposes a shell environment, be it to std print, env vars etc.
//!     Diagnostics go through the `log` facade; installing a logger is the caller's business.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # GraphError and FormatError
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── graph                   # Node, Edge and DocumentGraph
//!     ├── common                  # Format agnostic span algorithms
//!     ├── formats
//!     │   ├── <format>
//!     │   │   ├── parser.rs       # Parser implementation
//!     │   │   ├── serializer.rs   # Serializer implementation
//!     │   │   └── mod.rs
//!     └── lib.rs
//! ```
//!
//! Testing
//! ```text
//!     tests
//!     ├── lib.rs
//!     ├── <area>/mod.rs
//!     └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories, so these are
//!     included as modules from tests/lib.rs.
//! ```
//!
//! Graph Model
//!
//! ```text
//!     A document is a directed multigraph. Nodes are tokens (with a surface string), markables
//!     (with a span of tokens) or structural nodes (tree nodes, the document root). Edges are
//!     typed: dominance between tree nodes, spanning from a tree node to a token, pointing
//!     between markables, precedence between consecutive tokens. The token order is explicit
//!     document metadata; node identities carry no order of their own.
//!
//!     The graph is written once, by an importer, and only read afterwards.
//! ```
//!
//! Core Algorithms
//!
//! ```text
//!     Bracket export is a pipeline of small, independently tested steps over a finished graph
//!     (see ./common):
//!     - TokenIndex: token identity ↔ document position; span offsets are min/max positions.
//!     - Chains: markables connected by pointing edges, named by their naturally smallest member.
//!     - SpanBoundaries: which markables open and close on each token, in natural order.
//!     - The renderer (./formats/brackets/serializer.rs) walks the tokens with a stack of open
//!       markables and refuses crossing or unbalanced spans.
//!
//!     All of these are derived per request and thrown away afterwards.
//! ```
//!
//! Formats
//!
//! ```text
//!     Format specific capabilities are implemented with the Format trait. Formats have a
//!     parse() and/or serialize() method, a name and file extensions. See the trait def [./format.rs]
//!     - ptb: Penn Treebank trees, import only
//!     - brackets: inline chain brackets, import and export
//!     - treeviz: a tree drawing of the graph, export only
//! ```
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod graph;
pub mod registry;

pub use error::{FormatError, GraphError};
pub use format::Format;
pub use graph::{DocumentGraph, Edge, EdgeType, Node, NodeId, NodeKind};
pub use registry::FormatRegistry;

//! Format-agnostic algorithms over the document graph.
//!
//! Everything here reads a finished graph and derives throwaway structures
//! (token positions, chains, span boundaries) for one export.

pub mod boundaries;
pub mod chains;
pub mod natural_sort;
pub mod token_index;

pub use boundaries::SpanBoundaries;
pub use chains::{chain_assignment, extract_chains, Chain};
pub use natural_sort::{natural_cmp, natural_sort, NaturalKey};
pub use token_index::{segment_token_offsets, TokenIndex};

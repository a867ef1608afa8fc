//! Bracketed chain format tests
//!
//! Export from hand-built graphs, import of fixtures, and the balance
//! properties of rendered text.

mod export;
mod import;
mod properties;

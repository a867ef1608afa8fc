//! Penn Treebank import tests

mod import;
mod properties;

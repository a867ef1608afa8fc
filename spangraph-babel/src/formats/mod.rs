//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the document graph and text representations.

pub mod brackets;
pub mod ptb;
pub mod treeviz;

pub use brackets::BracketsFormat;
pub use ptb::{PtbFormat, PtbOptions};
pub use treeviz::TreevizFormat;

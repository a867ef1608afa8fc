//! Library half of the spangraph command-line tool.
//!
//! Holds the pieces the binary shares with its tests: the inspect transforms
//! and the stderr logger.

pub mod logging;
pub mod transforms;

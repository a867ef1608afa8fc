//! Properties of the format agnostic span algorithms.

mod chains;
mod natural_sort;
mod token_index;

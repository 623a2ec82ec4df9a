//! Text input and output in the SPMF sequence format.
//!
//! A sequence is a run of positive item ids where `-1` closes an itemset and
//! `-2` closes the sequence, e.g. `1 2 -1 3 -1 -2`.

pub mod reader;
pub mod writer;

pub use writer::{write_patterns, write_patterns_to_path};

pub(crate) const ITEMSET_END: i64 = -1;
pub(crate) const SEQUENCE_END: i64 = -2;

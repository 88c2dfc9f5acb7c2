//! Generic structures, not specific to a solve.

pub mod index_heap;

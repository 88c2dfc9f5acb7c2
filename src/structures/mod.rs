//! The abstract elements of a solve.
//!
//! - [Atoms](atom) are the things which may be given a value.
//! - [Literals](literal) pair an atom with a polarity.
//! - [Clauses](clause) are disjunctions of literals, and a formula is a conjunction of clauses.

pub mod atom;
pub mod clause;
pub mod literal;

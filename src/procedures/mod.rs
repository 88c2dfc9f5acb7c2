//! Various procedures for mutating a session.
//!
//! For the most part these are methods accessed via a [session](crate::session::Session), and primarily placed here for documentation.
//!
//! - [bcp], propagation of assignments through watched clauses.
//! - [analysis], from a conflict to a learnt clause.
//! - [backjump], the only form of backtracking.
//! - [decision], choosing an atom and a value.
//! - [assumptions], deciding assumptions before any free decision.
//! - [step], the state machine which combines the above one unit of work at a time.
//! - [simplify], propagation and removal of satisfied clauses before any decision.

pub mod analysis;
pub mod assumptions;
pub mod backjump;
pub mod bcp;
pub mod decision;
pub mod simplify;
pub mod step;

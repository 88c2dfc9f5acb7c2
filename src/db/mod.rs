/*!
Databases for holding information relevant to a solve.

- [The clause database](crate::db::clause)
  + A collection of clauses, split by source: those read from the formula and those learnt during a solve.
- [The atom database](crate::db::atom)
  + The value of each atom, the level and reason for that value, the previous value of each atom, and the activity of each atom.
- [Watch lists](crate::db::watches)
  + For each literal, the clauses watching that literal.
- [The trail](crate::db::trail)
  + Each assignment in order, partitioned into decision levels, with a mark on how far propagation has reached.

Databases are kept separate so that a procedure may borrow several at once, e.g. the watch list of a literal alongside the valuation of atoms.
*/

pub mod atom;
pub mod clause;
mod keys;
pub use keys::ClauseKey;
pub mod trail;
pub mod watches;

/// The index of a decision level.
pub type LevelIndex = u32;

/// Why an atom has the value it has.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Antecedent {
    /// A free decision.
    Decision,

    /// A decision required by an assumption.
    Assumption,

    /// A unit clause, either read from the formula or learnt.
    Unit,

    /// Propagation from the clause with the given key.
    Propagation(ClauseKey),
}

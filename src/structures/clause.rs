//! Clauses, aka. disjunctions of literals.
//!
//! The canonical representation of a clause is a [CClause], a vector of [CLiteral]s.
//! The [Clause] trait covers anything which may be read as a clause, and is implemented for [CClause], slices of literals, and single literals.
//!
//! The empty clause is always false, and so never true on any valuation.
//! Though, as a formula containing the empty clause has no use in a session, the clause database refuses to store an empty clause.
//!
//! ```rust
//! # use otter_step::structures::clause::Clause;
//! # use otter_step::structures::literal::{CLiteral, Literal};
//! let p = CLiteral::new(1, true);
//! let q = CLiteral::new(2, false);
//! let clause = vec![p, q];
//!
//! assert_eq!(clause.size(), 2);
//! assert_eq!(clause.as_dimacs(true), "1 -2 0");
//! assert_eq!(p.as_dimacs(false), "1");
//! ```

use crate::structures::{
    atom::Atom,
    literal::{CLiteral, Literal},
};

/// The canonical representation of a clause.
pub type CClause = Vec<CLiteral>;

/// The source of a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseSource {
    /// A clause read from a formula.
    Original,

    /// A clause derived by resolution during conflict analysis.
    Resolution,
}

/// Something which may be read as a clause.
pub trait Clause {
    /// An iterator over the literals of the clause, in order.
    fn literals(&self) -> impl Iterator<Item = &CLiteral>;

    /// The number of literals in the clause.
    fn size(&self) -> usize;

    /// An iterator over the atoms of the clause, in order.
    fn atoms(&self) -> impl Iterator<Item = Atom> {
        self.literals().map(|literal| literal.atom())
    }

    /// The clause as a string of DIMACS literals, optionally terminated by `0`.
    fn as_dimacs(&self, zero: bool) -> String {
        let mut the_string = String::default();
        for literal in self.literals() {
            the_string.push_str(&format!("{literal} "));
        }
        match zero {
            true => the_string.push('0'),
            false => {
                the_string.pop();
            }
        }
        the_string
    }

    /// A [CClause] with the same literals, in the same order.
    fn canonical(&self) -> CClause {
        self.literals().copied().collect()
    }
}

impl Clause for CClause {
    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        self.iter()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl Clause for [CLiteral] {
    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        self.iter()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl Clause for CLiteral {
    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        std::iter::once(self)
    }

    fn size(&self) -> usize {
        1
    }
}

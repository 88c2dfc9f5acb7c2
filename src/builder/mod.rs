/*!
Tools for building a session.

# Clauses

Clauses are added to a session with [add_clause](Session::add_clause), before any decision is made.
On addition, a clause is normalised:
- Duplicate literals are removed.
- A tautology (a clause containing a literal and its negation) is skipped, as it is true on every valuation.
- A clause with some literal true at level zero is skipped, and literals false at level zero are removed.

What remains is either:
- Empty, and the formula is unsatisfiable without search.
- A unit clause, which is asserted at level zero.
- A clause with two or more literals, which is stored in the clause database.

Note, unit clauses are asserted but not propagated.
Propagation of facts at level zero happens on [simplify](Session::simplify), or on the first step.

# Formulas

A formula may be read from DIMACS, see [read_dimacs](Session::read_dimacs), and from a [FormulaSource].
[from_formula](Session::from_formula) builds a session from a source and simplifies the formula.
*/

mod dimacs;
pub use dimacs::ParserInfo;
mod source;
pub use source::FormulaSource;

use crate::{
    db::{Antecedent, ClauseKey},
    misc::log::targets::{self},
    reports::Report,
    session::{Session, StepState},
    structures::{
        atom::Atom,
        clause::{CClause, Clause, ClauseSource},
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

/// Possible 'Ok' results from adding a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseOk {
    /// The clause was stored, with the given key.
    Added(ClauseKey),

    /// The clause was a unit, and the literal was asserted at level zero.
    Unit(CLiteral),

    /// The clause was a tautology, and was skipped.
    Tautology,

    /// The clause was true at level zero, and was skipped.
    Satisfied,
}

impl Session {
    /// A fresh atom.
    pub fn fresh_atom(&mut self) -> Result<Atom, err::ErrorKind> {
        let atom = self.atom_db.fresh_atom()?;
        self.watches.ensure_capacity(self.atom_db.count());
        Ok(atom)
    }

    /// Ensures `atom` (and every lower atom) is part of the session.
    pub fn ensure_atom(&mut self, atom: Atom) -> Result<(), err::ErrorKind> {
        self.atom_db.ensure_atom(atom)?;
        self.watches.ensure_capacity(self.atom_db.count());
        Ok(())
    }

    /// Adds a clause to the session.
    ///
    /// For documentation, see [builder](crate::builder).
    pub fn add_clause(&mut self, clause: impl Clause) -> Result<ClauseOk, err::ErrorKind> {
        if self.trail.level() > 0 {
            return Err(err::BuildError::DecisionMade.into());
        }

        let mut literals: CClause = Vec::with_capacity(clause.size());
        let mut satisfied = false;

        for literal in clause.literals() {
            self.ensure_atom(literal.atom())?;

            if literals.contains(&literal.negate()) {
                log::trace!(target: targets::SESSION, "Skipped tautology {}", clause.canonical().as_dimacs(false));
                return Ok(ClauseOk::Tautology);
            }

            match self.atom_db.value_of_literal(literal) {
                Some(true) => satisfied = true,
                Some(false) => {}
                None => {
                    if !literals.contains(literal) {
                        literals.push(*literal);
                    }
                }
            }
        }

        if satisfied {
            return Ok(ClauseOk::Satisfied);
        }

        match literals.len() {
            0 => {
                log::info!(target: targets::SESSION, "Empty clause added");
                self.state = StepState::Exhausted(Report::Unsatisfiable);
                Err(err::ErrorKind::ImmediateUnsat)
            }

            1 => {
                let literal = literals[0];
                self.assign(literal, Antecedent::Unit);
                Ok(ClauseOk::Unit(literal))
            }

            _ => {
                let key = self
                    .clause_db
                    .store(literals, ClauseSource::Original, &mut self.watches)?;
                Ok(ClauseOk::Added(key))
            }
        }
    }
}

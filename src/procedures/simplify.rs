//! Simplification of a formula before any decision.
//!
//! Every fact at level zero is propagated, and any clause satisfied by the facts at level zero is removed.
//! A conflict during propagation means the formula is unsatisfiable without search, and is reported as [ImmediateUnsat](crate::types::err::ErrorKind::ImmediateUnsat).
//!
//! Removed clauses stay on watch lists until found by [BCP](crate::procedures::bcp).

use crate::{
    db::ClauseKey,
    misc::log::targets::{self},
    reports::Report,
    session::{Session, StepState},
    structures::clause::Clause,
    types::err::{self},
};

impl Session {
    /// Propagates facts at level zero and removes satisfied clauses.
    ///
    /// For documentation, see [procedures::simplify](crate::procedures::simplify).
    pub fn simplify(&mut self) -> Result<(), err::ErrorKind> {
        if self.trail.level() != 0 {
            return Err(err::ErrorKind::InvalidState);
        }

        if let Some(key) = self.propagate() {
            log::info!(target: targets::SESSION, "Conflict at {key} during simplification");
            self.state = StepState::Exhausted(Report::Unsatisfiable);
            return Err(err::ErrorKind::ImmediateUnsat);
        }

        let satisfied: Vec<ClauseKey> = self
            .clause_db
            .all_clauses()
            .filter(|clause| {
                clause
                    .literals()
                    .any(|literal| self.atom_db.value_of_literal(literal) == Some(true))
            })
            .map(|clause| clause.key())
            .collect();

        for key in &satisfied {
            self.clause_db.remove(key)?;
        }

        log::info!(target: targets::SESSION, "Simplification removed {} clauses, with {} facts", satisfied.len(), self.trail.len());
        Ok(())
    }
}

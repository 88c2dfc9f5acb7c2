/*!
Assumptions, literals decided before any free decision.

Assumptions are decided in order, one per level, and so the first *n* levels of a session with *n* assumptions are assumption levels.
An assumption which is already true on the current valuation opens an empty level, so that the *i*th assumption level always belongs to the *i*th assumption.

If an assumption is false when it is to be decided, the formula together with the assumptions is unsatisfiable.
The assumptions responsible are collected into the [final conflict](crate::session::Session::final_conflict).

Assumptions are kept across rewinds, and are decided again after each rewind.
*/

use crate::{
    db::Antecedent,
    misc::log::targets::{self},
    reports::Report,
    session::{Session, StepState},
    structures::literal::{CLiteral, Literal},
    types::err::{self},
};

/// The next step for assumptions.
pub enum AssumptionOk {
    /// Every assumption is decided.
    Exhausted,

    /// The given assumption was decided.
    Decided(CLiteral),

    /// The given assumption is false.
    Conflict(CLiteral),
}

impl Session {
    /// Registers `literals` as assumptions, in addition to any present assumptions.
    ///
    /// Assumptions may only be made before any decision.
    pub fn assume(&mut self, literals: impl IntoIterator<Item = CLiteral>) -> Result<(), err::ErrorKind> {
        if self.trail.level() > 0 {
            return Err(err::BuildError::DecisionMade.into());
        }
        for literal in literals {
            self.ensure_atom(literal.atom())?;
            self.assumptions.push(literal);
        }
        Ok(())
    }

    /// Removes every assumption, along with any decision.
    ///
    /// An unsatisfiable report due to assumptions is cleared, while an unsatisfiable report due to the formula alone is kept.
    pub fn clear_assumptions(&mut self) {
        let formula_unsat = self.report() == Report::Unsatisfiable && self.final_conflict.is_empty();
        self.cancel_until(0);
        self.assumptions.clear();
        self.final_conflict.clear();
        if !formula_unsat {
            self.state = StepState::Idle;
        }
    }

    /// The assumptions of the session.
    pub fn assumptions(&self) -> &[CLiteral] {
        &self.assumptions
    }

    /// Decides the next assumption, if any assumption is yet to be decided.
    ///
    /// Assumptions which are true are passed over, with an empty level.
    pub(crate) fn decide_assumption(&mut self) -> AssumptionOk {
        while (self.trail.level() as usize) < self.assumptions.len() {
            let assumption = self.assumptions[self.trail.level() as usize];

            match self.atom_db.value_of_literal(&assumption) {
                Some(true) => self.trail.new_level(),

                Some(false) => {
                    log::info!(target: targets::DECISION, "Assumption {assumption} is false");
                    return AssumptionOk::Conflict(assumption);
                }

                None => {
                    self.trail.new_level();
                    self.assign(assumption, Antecedent::Assumption);
                    self.counters.decisions += 1;
                    return AssumptionOk::Decided(assumption);
                }
            }
        }
        AssumptionOk::Exhausted
    }

    /// True if the current level is an assumption level.
    pub(crate) fn at_assumption_level(&self) -> bool {
        (self.trail.level() as usize) <= self.assumptions.len()
    }
}

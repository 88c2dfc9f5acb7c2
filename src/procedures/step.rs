/*!
The step state machine, which advances a solve by one unit of work at a time.

# Overview

Each call to [step](Session::step) does exactly one of:

1. Propagation, ending in a conflict.
   + If the conflict is at level zero the formula is unsatisfiable, and the session is exhausted.
   + If the conflict is at an assumption level the assumptions are inconsistent with the formula, the responsible assumptions are collected, and the session is exhausted.
   + Otherwise, the conflict is analysed, the session backjumps, and the learnt clause asserts its literal.
     A learnt unit clause is asserted at level zero, without being stored.
2. Propagation to a fixpoint, followed by a decision (or the next assumption) on a fresh level.
3. Propagation to a fixpoint where every atom has a value, and the session is exhausted with a satisfiable report.

After each step the state of the session is noted as a [StepState], and the size of the trail is reported.

Once exhausted, a step does nothing and returns the exhausted report again.

# Granularity

A single step is small, and an observer watching a solve may prefer to see steps from conflict to conflict.
For this, [step_until_conflict](Session::step_until_conflict) takes steps until some conflict is resolved, or the session is exhausted.
And, [solve](Session::solve) takes steps until the session is exhausted.

# Example

```rust
# use otter_step::config::Config;
# use otter_step::procedures::step::StepOk;
# use otter_step::reports::Report;
# use otter_step::session::Session;
let mut session = Session::from_dimacs(Config::default(), "
 1  2 0
-1  2 0
 1 -2 0
-1 -2 0
").unwrap();

let mut conflicts = 0;
loop {
    match session.step().unwrap() {
        StepOk::Decision { .. } => {}
        StepOk::ConflictResolved { .. } => conflicts += 1,
        StepOk::Exhausted(report) => {
            assert_eq!(report, Report::Unsatisfiable);
            break;
        }
    }
}
assert!(conflicts > 0);
```
*/

use crate::{
    db::{Antecedent, ClauseKey, LevelIndex},
    misc::log::targets::{self},
    procedures::assumptions::AssumptionOk,
    reports::Report,
    session::{Session, StepState},
    structures::{clause::ClauseSource, literal::CLiteral},
    types::err::{self},
};

/// The outcome of a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOk {
    /// Propagation reached a fixpoint and a decision was made.
    Decision {
        /// The decision (or assumption).
        literal: CLiteral,

        /// The size of the trail after the decision.
        trail: usize,
    },

    /// Propagation ended in a conflict, which was analysed, and the learnt clause asserted.
    ConflictResolved {
        /// The literal asserted by the learnt clause.
        asserted: CLiteral,

        /// The level the session jumped back to.
        backjump_level: LevelIndex,

        /// The size of the trail after the asserted literal.
        trail: usize,
    },

    /// The search is over.
    Exhausted(Report),
}

impl Session {
    /// Takes a single step.
    ///
    /// For documentation, see [procedures::step](crate::procedures::step).
    pub fn step(&mut self) -> Result<StepOk, err::ErrorKind> {
        if let StepState::Exhausted(report) = self.state {
            log::debug!(target: targets::STEP, "Step on an exhausted session");
            return Ok(StepOk::Exhausted(report));
        }

        self.counters.steps += 1;
        self.state = StepState::Propagating;

        if let Some(key) = self.propagate() {
            self.counters.conflicts += 1;

            if self.trail.level() == 0 {
                log::info!(target: targets::STEP, "Conflict at level zero from {key}");
                return Ok(self.exhaust(Report::Unsatisfiable));
            }

            if self.at_assumption_level() {
                log::info!(target: targets::STEP, "Conflict from assumptions at {key}");
                self.analyze_final_conflict(key)?;
                return Ok(self.exhaust(Report::Unsatisfiable));
            }

            return self.resolve_conflict(key);
        }

        match self.decide_assumption() {
            AssumptionOk::Conflict(assumption) => {
                self.analyze_final(assumption);
                return Ok(self.exhaust(Report::Unsatisfiable));
            }

            AssumptionOk::Decided(literal) => {
                self.state = StepState::Deciding;
                return Ok(StepOk::Decision {
                    literal,
                    trail: self.trail.len(),
                });
            }

            AssumptionOk::Exhausted => {}
        }

        match self.pick_branch_literal() {
            Some(literal) => {
                self.decide(literal);
                self.state = StepState::Deciding;
                Ok(StepOk::Decision {
                    literal,
                    trail: self.trail.len(),
                })
            }

            None => Ok(self.exhaust(Report::Satisfiable)),
        }
    }

    /// Takes steps until some conflict is resolved or the session is exhausted, returning the last step.
    pub fn step_until_conflict(&mut self) -> Result<StepOk, err::ErrorKind> {
        loop {
            match self.step()? {
                StepOk::Decision { .. } => continue,
                outcome => return Ok(outcome),
            }
        }
    }

    /// Takes steps until the session is exhausted, returning the report.
    pub fn solve(&mut self) -> Result<Report, err::ErrorKind> {
        loop {
            if let StepOk::Exhausted(report) = self.step()? {
                return Ok(report);
            }
        }
    }

    /// Analyses the conflict, backjumps, and asserts the learnt clause.
    fn resolve_conflict(&mut self, conflict: ClauseKey) -> Result<StepOk, err::ErrorKind> {
        let analysis = self.analyze(conflict)?;
        let asserted = analysis.learnt[0];
        let backjump_level = analysis.backjump_level;

        self.cancel_until(backjump_level);

        match analysis.learnt.len() {
            1 => self.assign(asserted, Antecedent::Unit),
            _ => {
                let key = self.clause_db.store(
                    analysis.learnt,
                    ClauseSource::Resolution,
                    &mut self.watches,
                )?;
                self.clause_db.bump_activity(&key);
                self.assign(asserted, Antecedent::Propagation(key));
            }
        }

        self.atom_db.decay_activity();
        self.clause_db.decay_activity();

        self.state = StepState::Conflicted;
        log::trace!(target: targets::STEP, "Asserted {asserted} at level {backjump_level}");

        Ok(StepOk::ConflictResolved {
            asserted,
            backjump_level,
            trail: self.trail.len(),
        })
    }

    /// Notes the search is over with `report`.
    fn exhaust(&mut self, report: Report) -> StepOk {
        log::info!(target: targets::STEP, "Exhausted: {report}");
        self.state = StepState::Exhausted(report);
        StepOk::Exhausted(report)
    }
}

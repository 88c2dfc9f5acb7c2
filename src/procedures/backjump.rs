//! Recovery from a conflict, and rewinding a session.
//!
//! # Overview
//!
//! A backjump is a 'jump' from some (higher) decision level to some previous (lower) decision level.
//!
//! Typically, a backjump is made from level *l* to level *l - i* because a conflict was found at level *l* and analysis produced a clause which asserts some literal at level *l - i*.
//! In this case, all decisions and all consequences of those decisions from level *l* down to level *l - i* are undone.
//!
//! A backjump to level zero is a rewind: every decision is undone, while facts at level zero and every learnt clause are kept.
//!
//! # Methods
//!
//! # [cancel_until](Session::cancel_until): Backjump to a target level
//!
//! For sound application the target level must be equal to or lower than the current level.
//! Still, passing a target level greater than or equal to the current level is safe, as nothing will happen.
//!
//! Each atom valued above the target level is cleared, its value is kept as the previous value of the atom (for phase saving), and the atom is returned to the activity heap.
//!
//! # [backjump_level](Session::backjump_level): The backjump level of a(n unsatisfiable) clause
//!
//! The backjump level of a clause is the second highest level from the given literals, if there are two or more literals, and 0 (zero) otherwise.
//!
//! # Example
//!
//! ```rust,ignore
//! let analysis = self.analyze(key)?;
//! self.cancel_until(analysis.backjump_level);
//! ```

use crate::{
    db::LevelIndex,
    misc::log::targets::{self},
    session::{Session, StepState},
    structures::{clause::Clause, literal::Literal},
    types::err,
};

impl Session {
    /// Backjumps to the given target level.
    ///
    /// For documentation, see [procedures::backjump](crate::procedures::backjump).
    pub fn cancel_until(&mut self, target: LevelIndex) {
        if self.trail.level() <= target {
            return;
        }

        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {target}", self.trail.level());

        for literal in self.trail.clear_assigments_above(target).into_iter().rev() {
            self.atom_db.drop_value(literal.atom());
        }
    }

    /// Undoes every decision, keeping facts at level zero and every learnt clause.
    ///
    /// The state returns to [Idle](StepState::Idle), unless the search is over.
    pub fn rewind(&mut self) {
        self.cancel_until(0);
        self.counters.rewinds += 1;
        if !self.is_exhausted() {
            self.state = StepState::Idle;
        }
    }

    /// The backjump level of a clause, given every literal of the clause has a value.
    ///
    /// For documentation, see [procedures::backjump](crate::procedures::backjump).
    pub fn backjump_level(&self, clause: &impl Clause) -> Result<LevelIndex, err::ErrorKind> {
        // (second_to_top, top)
        let mut top_two = (None, None);
        for literal in clause.literals() {
            let Some(level) = self.atom_db.level_of(literal.atom()) else {
                log::error!(target: targets::BACKJUMP, "{literal} has no value");
                return Err(err::ErrorKind::Backjump);
            };

            match top_two {
                (_, None) => top_two.1 = Some(level),
                (_, Some(the_top)) if level > the_top => {
                    top_two.0 = top_two.1;
                    top_two.1 = Some(level);
                }
                (None, _) => top_two.0 = Some(level),
                (Some(second_to_top), _) if level > second_to_top => top_two.0 = Some(level),
                _ => {}
            }
        }

        Ok(top_two.0.unwrap_or(0))
    }
}

/*!
Analysis of an unsatisfiable clause.

Takes a key to a clause which is unsatisfiable on the current valuation and returns an asserting clause, together with the level to backjump to.

# Overview

Analysis walks the trail backwards from the conflict, resolving the conflict clause with the antecedent of each literal of the current level it meets, until a single literal of the current level remains.
This is the first unique implication point (1-UIP).

The learnt clause is then:
- The negation of the remaining current level literal, at position `0`.
- Every literal from some lower (non-zero) level met during resolution.

Literals valued at level zero are dropped, as they are true in every valuation the session may find.

The learnt clause is asserting: on backjumping to the backjump level every literal other than the literal at position `0` is false, and the literal at position `0` has no value.
To keep the learnt clause ready for watching, a literal from the backjump level is placed at position `1`.

# Heuristics

Each atom met during analysis has its activity bumped, and each learnt clause used has its activity bumped.

# Minimization

If [minimization](crate::config::Config::minimization) is enabled, a literal of the learnt clause is dropped if the other literals of its antecedent are all in the learnt clause or valued at level zero.
For, in this case the literal is implied by the rest of the learnt clause.

# Final conflicts

When an assumption is found to be false, [analyze_final](Session::analyze_final) collects those assumptions which lead to it being false.
The negation of the collected assumptions is a clause implied by the formula, and so at least one of the assumptions must be dropped for a satisfiable report.

# Example

```rust,ignore
let analysis = self.analyze(key)?;
self.cancel_until(analysis.backjump_level);
match analysis.learnt.len() {
    1 => self.assign(analysis.learnt[0], Antecedent::Unit),
    _ => { ... }
}
```
*/

use crate::{
    db::{Antecedent, ClauseKey, LevelIndex},
    misc::log::targets::{self},
    session::Session,
    structures::{
        clause::{CClause, Clause},
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

/// The result of analysing a conflict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    /// The learnt clause, with the asserted literal at position `0`.
    pub learnt: CClause,

    /// The level at which the learnt clause asserts its literal.
    pub backjump_level: LevelIndex,
}

impl Session {
    /// Analyses the conflict clause with key `conflict`.
    ///
    /// For documentation, see [procedures::analysis](crate::procedures::analysis).
    pub fn analyze(&mut self, conflict: ClauseKey) -> Result<Analysis, err::ErrorKind> {
        let current_level = self.trail.level();
        if current_level == 0 {
            return Err(err::ErrorKind::InvalidState);
        }

        self.seen.clear();
        self.seen.resize(self.atom_db.count() + 1, false);

        // The asserted literal takes position 0 once found.
        let mut learnt: CClause = vec![CLiteral::new(0, false)];

        let mut unresolved = 0;
        let mut key = conflict;
        let mut resolved_literal: Option<CLiteral> = None;
        let mut trail_index = self.trail.len();

        loop {
            self.clause_db.bump_activity(&key);

            let clause = self.clause_db.get(&key)?;
            for literal in clause.literals() {
                let atom = literal.atom();
                if resolved_literal.is_some_and(|resolved| resolved.atom() == atom) {
                    continue;
                }
                if self.seen[atom as usize] {
                    continue;
                }

                match self.atom_db.level_of(atom) {
                    None => return Err(err::AnalysisError::NoAssertion.into()),
                    Some(0) => {}
                    Some(level) => {
                        self.seen[atom as usize] = true;
                        self.atom_db.bump_activity(atom);
                        if level >= current_level {
                            unresolved += 1;
                        } else {
                            learnt.push(*literal);
                        }
                    }
                }
            }

            if unresolved == 0 {
                log::error!(target: targets::ANALYSIS, "No literal of {key} from the current level");
                return Err(err::AnalysisError::NoAssertion.into());
            }

            // The next literal of the trail met during resolution.
            let next = loop {
                if trail_index == 0 {
                    return Err(err::AnalysisError::NoAssertion.into());
                }
                trail_index -= 1;
                let literal = self.trail.literals[trail_index];
                if self.seen[literal.atom() as usize] {
                    break literal;
                }
            };

            self.seen[next.atom() as usize] = false;
            unresolved -= 1;

            if unresolved == 0 {
                learnt[0] = next.negate();
                break;
            }

            match self.atom_db.antecedent_of(next.atom()) {
                Antecedent::Propagation(antecedent) => {
                    key = antecedent;
                    resolved_literal = Some(next);
                }
                _ => return Err(err::AnalysisError::MissingAntecedent.into()),
            }
        }

        // Every atom of the learnt clause other than the asserted atom is marked as seen.
        let marked: Vec<CLiteral> = learnt[1..].to_vec();

        if self.config.minimization.value {
            let mut kept = 1;
            for index in 1..learnt.len() {
                if !self.implied_by_learnt(learnt[index])? {
                    learnt[kept] = learnt[index];
                    kept += 1;
                }
            }
            learnt.truncate(kept);
        }

        for literal in marked {
            self.seen[literal.atom() as usize] = false;
        }

        let backjump_level = match learnt.len() {
            0 => return Err(err::AnalysisError::EmptyResolution.into()),
            1 => 0,
            _ => {
                let mut top_index = 1;
                let mut top_level = 0;
                for (index, literal) in learnt.iter().enumerate().skip(1) {
                    let level = self.atom_db.level_of(literal.atom()).unwrap_or(0);
                    if level > top_level {
                        top_index = index;
                        top_level = level;
                    }
                }
                learnt.swap(1, top_index);
                top_level
            }
        };

        log::trace!(target: targets::ANALYSIS, "Learnt {} with backjump to {backjump_level}", learnt.as_dimacs(false));

        Ok(Analysis {
            learnt,
            backjump_level,
        })
    }

    /// True if `literal` is implied by literals marked as seen.
    fn implied_by_learnt(&self, literal: CLiteral) -> Result<bool, err::ErrorKind> {
        let Antecedent::Propagation(key) = self.atom_db.antecedent_of(literal.atom()) else {
            return Ok(false);
        };

        let antecedent = self.clause_db.get(&key)?;
        for other in antecedent.literals() {
            let atom = other.atom();
            if atom == literal.atom() {
                continue;
            }
            if !self.seen[atom as usize] && self.atom_db.level_of(atom).unwrap_or(0) > 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Collects the assumptions responsible for `literal` being false into the final conflict.
    ///
    /// For documentation, see [procedures::analysis](crate::procedures::analysis).
    pub fn analyze_final(&mut self, literal: CLiteral) {
        self.final_conflict.clear();
        self.final_conflict.push(literal.negate());

        if self.trail.level() == 0 {
            return;
        }

        self.seen.clear();
        self.seen.resize(self.atom_db.count() + 1, false);
        self.seen[literal.atom() as usize] = true;

        self.collect_assumptions();
    }

    /// Collects the assumptions responsible for the conflict clause with key `conflict` into the final conflict.
    pub fn analyze_final_conflict(&mut self, conflict: ClauseKey) -> Result<(), err::ErrorKind> {
        self.final_conflict.clear();

        self.seen.clear();
        self.seen.resize(self.atom_db.count() + 1, false);

        let clause = self.clause_db.get(&conflict)?;
        for literal in clause.literals() {
            if self.atom_db.level_of(literal.atom()).unwrap_or(0) > 0 {
                self.seen[literal.atom() as usize] = true;
            }
        }

        self.collect_assumptions();
        Ok(())
    }

    /// Walks the trail above level zero, resolving marked atoms with their antecedents and collecting marked assumptions.
    fn collect_assumptions(&mut self) {
        let floor = self.trail.level_indicies.first().copied().unwrap_or(0);

        for index in (floor..self.trail.len()).rev() {
            let literal = self.trail.literals[index];
            let atom = literal.atom();
            if !self.seen[atom as usize] {
                continue;
            }

            match self.atom_db.antecedent_of(atom) {
                Antecedent::Propagation(key) => {
                    if let Ok(clause) = self.clause_db.get(&key) {
                        for other in clause.literals() {
                            if self.atom_db.level_of(other.atom()).unwrap_or(0) > 0 {
                                self.seen[other.atom() as usize] = true;
                            }
                        }
                    }
                }
                Antecedent::Assumption | Antecedent::Decision => {
                    self.final_conflict.push(literal.negate());
                }
                Antecedent::Unit => {}
            }

            self.seen[atom as usize] = false;
        }

        log::trace!(target: targets::ANALYSIS, "Final conflict {}", self.final_conflict.as_dimacs(false));
    }
}

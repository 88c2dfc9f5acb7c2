/*!
The session, to which a formula is added and within which a stepwise solve takes place.

A session owns every database relevant to a solve, together with:
- The state of the [step state machine](crate::procedures::step).
- Any assumptions, and the final conflict if the assumptions were found to be inconsistent with the formula.
- A (seeded) source of randomness.
- Whether the session is 'playing', i.e. whether a driver should step the session without waiting for a request.

Procedures which mutate a session are implemented on [Session] in [procedures](crate::procedures).
A session is never rebuilt in place: a restart discards the session and builds a fresh session from the formula.

# Example
```rust
# use otter_step::config::Config;
# use otter_step::reports::Report;
# use otter_step::session::Session;
# use otter_step::structures::literal::{CLiteral, Literal};
let mut session = Session::new(Config::default());

let p = CLiteral::new(1, true);
let q = CLiteral::new(2, true);

assert!(session.add_clause(vec![p, q]).is_ok());
assert!(session.add_clause(-p).is_ok());

assert_eq!(session.solve(), Ok(Report::Satisfiable));
assert_eq!(session.value_of(1), Some(false));
assert_eq!(session.value_of(2), Some(true));
```
*/

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::Config,
    db::{atom::AtomDB, clause::ClauseDB, trail::Trail, watches::Watches, Antecedent, LevelIndex},
    reports::Report,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

/// The state of the step state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepState {
    /// No step has been taken since the session was built or rewound.
    Idle,

    /// Propagation is running.
    Propagating,

    /// The most recent step made a decision.
    Deciding,

    /// The most recent step resolved a conflict.
    Conflicted,

    /// The search is over, with the given report.
    Exhausted(Report),
}

/// Counts for various things which count, roughly.
#[derive(Clone, Debug, Default)]
pub struct Counters {
    /// A count of every step taken.
    pub steps: usize,

    /// A count of every conflict seen.
    pub conflicts: usize,

    /// A count of every decision made, including assumptions.
    pub decisions: usize,

    /// A count of every assignment made by propagation.
    pub propagations: usize,

    /// A count of every rewind to level zero.
    pub rewinds: usize,
}

/// A session.
pub struct Session {
    /// The configuration of the session.
    pub config: Config,

    /// Counters related to the session.
    pub counters: Counters,

    /// The atom database.
    pub atom_db: AtomDB,

    /// The clause database.
    pub clause_db: ClauseDB,

    /// Watch lists for each literal.
    pub watches: Watches,

    /// Every assignment, in order.
    pub trail: Trail,

    /// The state of the step state machine.
    pub state: StepState,

    /// Literals to be decided, in order, before any free decision.
    pub(crate) assumptions: Vec<CLiteral>,

    /// Negated assumptions responsible for an unsatisfiable report, if any.
    pub(crate) final_conflict: Vec<CLiteral>,

    /// Scratch for analysis, indexed by atom.
    pub(crate) seen: Vec<bool>,

    /// The source of randomness for decisions.
    pub(crate) rng: StdRng,

    playing: bool,
}

impl Session {
    /// A fresh session, without a formula, configured by `config`.
    pub fn new(config: Config) -> Self {
        Session {
            atom_db: AtomDB::new(&config),
            clause_db: ClauseDB::new(&config),
            watches: Watches::default(),
            trail: Trail::default(),

            counters: Counters::default(),
            state: StepState::Idle,

            assumptions: Vec::default(),
            final_conflict: Vec::default(),
            seen: Vec::default(),
            rng: StdRng::seed_from_u64(config.seed.value),

            playing: false,

            config,
        }
    }

    /// Values the atom of `literal` to match the polarity of `literal` at the current level, and pushes `literal` to the trail.
    ///
    /// No check is made on whether the atom already has a value.
    pub fn assign(&mut self, literal: CLiteral, antecedent: Antecedent) {
        let level = self.trail.level();
        self.atom_db.set_value(literal, level, antecedent);
        self.trail.store_assignment(literal);
    }

    /// The value of `atom` on the current valuation, if any.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.atom_db.value_of(atom)
    }

    /// The current valuation, as a string of DIMACS literals.
    pub fn valuation_string(&self) -> String {
        self.atom_db
            .valuation()
            .map(|(atom, value)| CLiteral::new(atom, value).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The current decision level.
    pub fn level(&self) -> LevelIndex {
        self.trail.level()
    }

    /// The count of assignments on the trail.
    pub fn trail_size(&self) -> usize {
        self.trail.len()
    }

    /// A report on the satisfiability of the formula, so far as is known.
    pub fn report(&self) -> Report {
        Report::from(&self.state)
    }

    /// True if the search is over.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, StepState::Exhausted(_))
    }

    /// Negated assumptions responsible for an unsatisfiable report.
    ///
    /// Empty unless assumptions were made and found to be inconsistent with the formula.
    pub fn final_conflict(&self) -> &[CLiteral] {
        &self.final_conflict
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }
}

/*!
Methods for choosing the value of an atom.

# Overview

The core decision procedure is straightforward:
- Find some atom which is not assigned a value, and assign either true or false.

# Decisions as literals

Strictly a decision is to value some atom *a* with value *v*.
Still, it is convenient to represent such a decision as a literal with atom *a* and polarity *v*.
For example, a decision to value *p* with value *false* is represented with the literal *-p*.

# Activity

Atoms are selected by activity, and the [atom database](crate::db::atom) keeps every atom without a value on a max activity heap.
Atoms with a value may also be on the heap, and are skipped over.

```rust,ignore
while let Some(atom) = self.atom_db.heap_pop_most_active() {
    if self.atom_db.value_of(atom).is_none() {
        return Some(atom);
    }
}
```

Ties in activity go to the lowest atom.

# Phase saving

If phase saving is enabled and a chosen atom was previously valued *v* the atom is again valued *v*.
An atom which has never been valued has a previous value of *false*.

# Randomness

With probability [random_decision_bias](crate::config::Config::random_decision_bias) an atom without a value is chosen at random, rather than by activity.
And, if phase saving is disabled, the value is *true* with probability [polarity_lean](crate::config::Config::polarity_lean).

Both default to zero, and the source of randomness is seeded, so decisions are deterministic for a given configuration.
*/

use rand::{seq::IteratorRandom, Rng};

use crate::{
    db::Antecedent,
    misc::log::targets::{self},
    session::Session,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

/// Methods related to making decisions.
impl Session {
    /// Chooses an atom without a value, and a value for the atom, given as a literal.
    ///
    /// Returns `None` if every atom has a value.
    pub fn pick_branch_literal(&mut self) -> Option<CLiteral> {
        let atom = self.atom_without_value()?;

        let literal = match self.config.phase_saving.value {
            true => CLiteral::new(atom, self.atom_db.previous_value_of(atom)),
            false => {
                let lean = self.config.polarity_lean.value;
                CLiteral::new(atom, lean > 0.0 && self.rng.gen_bool(lean))
            }
        };

        Some(literal)
    }

    /// Returns an atom which has no value on the current valuation, either by random choice or by most activity.
    pub fn atom_without_value(&mut self) -> Option<Atom> {
        let bias = self.config.random_decision_bias.value;
        if bias > 0.0 && self.rng.gen_bool(bias) {
            let atom_db = &self.atom_db;
            if let Some(atom) = atom_db.unvalued_atoms().choose(&mut self.rng) {
                return Some(atom);
            }
        }

        while let Some(atom) = self.atom_db.heap_pop_most_active() {
            if self.atom_db.value_of(atom).is_none() {
                return Some(atom);
            }
        }
        None
    }

    /// Opens a fresh level, and assigns `literal` as a decision.
    pub fn decide(&mut self, literal: CLiteral) {
        self.trail.new_level();
        self.assign(literal, Antecedent::Decision);
        self.counters.decisions += 1;
        log::trace!(target: targets::DECISION, "Decision {literal} at level {}", self.trail.level());
    }
}

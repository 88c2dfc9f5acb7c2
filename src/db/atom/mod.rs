/*!
A database of 'atom related' things, accessed via fields on an [AtomDB] struct.

Things include:
- A current (often partial) valuation, and the previous value of each atom (for phase saving).
- A record of which level an atom was valued on, and why.
- An [IndexHeap] recording the activity of atoms, where any atom without a value is 'active' on the heap.

The heap may also hold atoms *with* a value, as atoms are only removed from the heap when popped.
So, when searching the heap for an atom without a value, valued atoms are skipped over.
*/

mod activity;
pub use activity::AtomActivity;

use crate::{
    config::{defaults, Activity, Config},
    db::{Antecedent, LevelIndex},
    generic::index_heap::IndexHeap,
    structures::{
        atom::{Atom, ATOM_MAX},
        literal::{CLiteral, Literal},
    },
    types::err::AtomDBError,
};

/// The atom database.
pub struct AtomDB {
    /// A current (often partial) valuation.
    valuation: Vec<Option<bool>>,

    /// The previous value of each atom, initially false.
    previous_valuation: Vec<bool>,

    /// The level on which each atom was valued, if valued.
    levels: Vec<Option<LevelIndex>>,

    /// Why each atom was valued, if valued.
    antecedents: Vec<Antecedent>,

    /// The activity of each atom.
    activity_heap: IndexHeap<AtomActivity>,

    /// The activity added to an atom on a bump.
    bump: Activity,

    /// The decay applied to atom activity after each conflict.
    decay: Activity,
}

impl AtomDB {
    /// A new [AtomDB] with local configuration options derived from `config`.
    pub fn new(config: &Config) -> Self {
        let mut db = AtomDB {
            valuation: Vec::default(),
            previous_valuation: Vec::default(),
            levels: Vec::default(),
            antecedents: Vec::default(),
            activity_heap: IndexHeap::default(),
            bump: defaults::ATOM_BUMP,
            decay: config.atom_decay.value,
        };

        // The placeholder for atom zero, which is never part of a formula and never placed on the heap.
        db.valuation.push(None);
        db.previous_valuation.push(false);
        db.levels.push(None);
        db.antecedents.push(Antecedent::Unit);
        db.activity_heap.add(0, AtomActivity::default());

        db
    }

    /// A count of atoms in the [AtomDB].
    pub fn count(&self) -> usize {
        self.valuation.len() - 1
    }

    /// An iterator over all atoms, in order.
    pub fn atoms(&self) -> impl Iterator<Item = Atom> {
        1..(self.valuation.len() as Atom)
    }

    /// A fresh atom, without a value and active on the heap.
    pub fn fresh_atom(&mut self) -> Result<Atom, AtomDBError> {
        let atom = match Atom::try_from(self.valuation.len()) {
            Ok(atom) if atom <= ATOM_MAX => atom,
            _ => return Err(AtomDBError::AtomsExhausted),
        };

        self.valuation.push(None);
        self.previous_valuation.push(false);
        self.levels.push(None);
        self.antecedents.push(Antecedent::Unit);

        self.activity_heap.add(
            atom as usize,
            AtomActivity {
                activity: 0.0,
                atom,
            },
        );
        self.activity_heap.activate(atom as usize);

        Ok(atom)
    }

    /// Ensures `atom` (and every lower atom) is part of the database.
    pub fn ensure_atom(&mut self, atom: Atom) -> Result<(), AtomDBError> {
        while self.count() < atom as usize {
            self.fresh_atom()?;
        }
        Ok(())
    }

    /// The value of an atom, if the atom has a value.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.valuation.get(atom as usize).copied().flatten()
    }

    /// The value of a literal on the current valuation, if the atom of the literal has a value.
    ///
    /// So, `Some(true)` if the literal is true, and `Some(false)` if the literal is false.
    pub fn value_of_literal(&self, literal: &CLiteral) -> Option<bool> {
        self.value_of(literal.atom())
            .map(|value| value == literal.polarity())
    }

    /// The previous value of an atom, or `false` if the atom has never been valued.
    pub fn previous_value_of(&self, atom: Atom) -> bool {
        self.previous_valuation
            .get(atom as usize)
            .copied()
            .unwrap_or(false)
    }

    /// The level on which an atom was valued, if valued.
    pub fn level_of(&self, atom: Atom) -> Option<LevelIndex> {
        self.levels.get(atom as usize).copied().flatten()
    }

    /// Why an atom has its value.
    ///
    /// Only meaningful if the atom has some value.
    pub fn antecedent_of(&self, atom: Atom) -> Antecedent {
        self.antecedents
            .get(atom as usize)
            .copied()
            .unwrap_or(Antecedent::Unit)
    }

    /// Values the atom of `literal` to match the polarity of `literal`, noting the level and reason.
    ///
    /// The atom is left on the activity heap.
    pub fn set_value(&mut self, literal: CLiteral, level: LevelIndex, antecedent: Antecedent) {
        let index = literal.atom() as usize;
        self.valuation[index] = Some(literal.polarity());
        self.levels[index] = Some(level);
        self.antecedents[index] = antecedent;
    }

    /// Clears the value of an atom, noting the cleared value as the previous value, and places the atom on the activity heap.
    pub fn drop_value(&mut self, atom: Atom) {
        let index = atom as usize;
        if let Some(value) = self.valuation[index].take() {
            self.previous_valuation[index] = value;
        }
        self.levels[index] = None;
        self.activity_heap.activate(index);
    }

    /// The current valuation, as (atom, value) pairs for every valued atom.
    pub fn valuation(&self) -> impl Iterator<Item = (Atom, bool)> + '_ {
        self.atoms()
            .filter_map(|atom| self.value_of(atom).map(|value| (atom, value)))
    }

    /// An iterator over every atom without a value.
    pub fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.atoms().filter(|atom| self.value_of(*atom).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_and_phases() {
        let mut atom_db = AtomDB::new(&Config::default());
        atom_db.ensure_atom(3).unwrap();
        assert_eq!(atom_db.count(), 3);

        let p = CLiteral::new(2, true);
        atom_db.set_value(p, 1, Antecedent::Decision);
        assert_eq!(atom_db.value_of_literal(&p), Some(true));
        assert_eq!(atom_db.value_of_literal(&p.negate()), Some(false));
        assert_eq!(atom_db.level_of(2), Some(1));
        assert!(!atom_db.previous_value_of(2));

        atom_db.drop_value(2);
        assert_eq!(atom_db.value_of(2), None);
        assert_eq!(atom_db.level_of(2), None);
        assert!(atom_db.previous_value_of(2));
    }

    #[test]
    fn most_active_atom() {
        let mut atom_db = AtomDB::new(&Config::default());
        atom_db.ensure_atom(4).unwrap();

        atom_db.bump_activity(3);
        atom_db.decay_activity();
        atom_db.bump_activity(4);

        assert!(atom_db.activity_of(4) > atom_db.activity_of(3));
        assert_eq!(atom_db.heap_pop_most_active(), Some(4));
        assert_eq!(atom_db.heap_pop_most_active(), Some(3));
        assert_eq!(atom_db.heap_pop_most_active(), Some(1));
        assert_eq!(atom_db.heap_pop_most_active(), Some(2));
        assert_eq!(atom_db.heap_pop_most_active(), None);
    }

    #[test]
    fn rescore_preserves_order() {
        let mut atom_db = AtomDB::new(&Config::default());
        atom_db.ensure_atom(2).unwrap();

        atom_db.bump = 6e99;
        atom_db.bump_activity(1);
        atom_db.bump_activity(1);

        assert!(atom_db.activity_of(1) <= defaults::ATOM_ACTIVITY_MAX);
        assert!(atom_db.activity_of(1) > atom_db.activity_of(2));
        assert_eq!(atom_db.heap_pop_most_active(), Some(1));
    }
}

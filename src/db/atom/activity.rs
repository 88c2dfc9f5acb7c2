use std::cmp::Ordering;

use crate::{
    config::{defaults, Activity},
    db::atom::AtomDB,
    structures::atom::Atom,
};

/// The activity of an atom, as stored on the activity heap.
///
/// Ordered by activity, with ties broken in favour of the lower atom.
/// So, with equal activity, the atom `1` is preferred to the atom `2`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AtomActivity {
    pub activity: Activity,
    pub atom: Atom,
}

impl PartialOrd for AtomActivity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.activity.partial_cmp(&other.activity)? {
            Ordering::Equal => Some(other.atom.cmp(&self.atom)),
            ordering => Some(ordering),
        }
    }
}

/// Methods for inspecting and mutating the activity of atoms.
///
/// Together, these give a variant of VSIDS where activity decays by growing the bump applied to future conflicts.
impl AtomDB {
    /// Pops the most active atom from the activity heap.
    pub fn heap_pop_most_active(&mut self) -> Option<Atom> {
        self.activity_heap.pop_max().map(|index| index as Atom)
    }

    /// The activity of an atom, regardless of whether it is on the activity heap.
    pub fn activity_of(&self, atom: Atom) -> Activity {
        self.activity_heap.value_at(atom as usize).activity
    }

    /// Bumps the activity of an atom and updates its position on the activity heap, if the atom is on the activity heap.
    ///
    /// If the bumped activity exceeds the maximum activity, the activity of every atom is rescored.
    pub fn bump_activity(&mut self, atom: Atom) {
        let bumped = AtomActivity {
            activity: self.activity_of(atom) + self.bump,
            atom,
        };
        self.activity_heap.revalue(atom as usize, bumped);

        if bumped.activity > defaults::ATOM_ACTIVITY_MAX {
            self.rescore_activity();
        }
        self.activity_heap.heapify_if_active(atom as usize);
    }

    /// Increase the activity bump applied to atoms by a factor of 1 / decay.
    pub fn decay_activity(&mut self) {
        self.bump *= 1.0 / self.decay;
    }

    /// Rescores the activity of all atoms and the activity bump, preserving order.
    pub fn rescore_activity(&mut self) {
        let factor = 1.0 / defaults::ATOM_ACTIVITY_MAX;
        self.activity_heap.apply_to_all(|value| AtomActivity {
            activity: value.activity * factor,
            atom: value.atom,
        });
        self.bump *= factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_prefer_lower_atoms() {
        let low = AtomActivity {
            activity: 1.0,
            atom: 2,
        };
        let high = AtomActivity {
            activity: 1.0,
            atom: 9,
        };
        assert!(low > high);

        let active = AtomActivity {
            activity: 1.5,
            atom: 9,
        };
        assert!(active > low);
    }
}

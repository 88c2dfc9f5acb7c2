/*!
The trail, every assignment made, in order.

The trail is partitioned into levels by `level_indicies`, where `level_indicies[i]` is the position of the first assignment of level `i + 1`.
Assignments made before any decision are at level zero, and the first assignment of every other level is the decision (or assumption) which opened the level.

`q_head` marks how far propagation has reached: every assignment before `q_head` has been propagated.
*/

use crate::{db::LevelIndex, structures::literal::CLiteral};

#[derive(Default)]
pub struct Trail {
    pub literals: Vec<CLiteral>,
    pub level_indicies: Vec<usize>,
    pub q_head: usize,
}

impl Trail {
    /// Stores an assignment at the current level.
    pub fn store_assignment(&mut self, literal: CLiteral) {
        self.literals.push(literal);
    }

    /// Opens a fresh level, with the next assignment as the first of the level.
    pub fn new_level(&mut self) {
        self.level_indicies.push(self.literals.len());
    }

    /// The current level.
    pub fn level(&self) -> LevelIndex {
        self.level_indicies.len() as LevelIndex
    }

    /// A count of all assignments.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The next assignment to propagate, if any, with the mark advanced past it.
    pub fn next_pending(&mut self) -> Option<CLiteral> {
        let literal = self.literals.get(self.q_head).copied()?;
        self.q_head += 1;
        Some(literal)
    }

    /// Marks every assignment as propagated.
    pub fn exhaust_pending(&mut self) {
        self.q_head = self.literals.len();
    }

    /// The assignments made at level zero, in order of assignment.
    pub fn level_zero_assignments(&self) -> &[CLiteral] {
        match self.level_indicies.first() {
            Some(&level_end) => &self.literals[..level_end],
            None => &self.literals,
        }
    }

    /// Removes levels above the given level, if they exist, returning the removed assignments in order of assignment.
    ///
    /// The propagation mark is moved back if it was above the given level.
    ///
    /// # Soundness
    /// Does not clear the *valuation* of any atom.
    pub fn clear_assigments_above(&mut self, level: LevelIndex) -> Vec<CLiteral> {
        // level_indicies is zero-indexed, so the first assignment above `level` is at level_indicies[level].
        match self.level_indicies.get(level as usize) {
            Some(&level_start) => {
                self.level_indicies.truncate(level as usize);
                self.q_head = std::cmp::min(self.q_head, level_start);
                self.literals.split_off(level_start)
            }
            None => Vec::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::literal::Literal;

    fn literal(int: isize) -> CLiteral {
        CLiteral::new(int.unsigned_abs() as u32, int.is_positive())
    }

    #[test]
    fn levels() {
        let mut trail = Trail::default();
        trail.store_assignment(literal(4));
        trail.new_level();
        trail.store_assignment(literal(-1));
        trail.store_assignment(literal(2));
        trail.new_level();
        trail.store_assignment(literal(3));

        assert_eq!(trail.level(), 2);
        assert_eq!(trail.level_zero_assignments(), &[literal(4)]);

        assert_eq!(trail.next_pending(), Some(literal(4)));
        trail.exhaust_pending();
        assert_eq!(trail.next_pending(), None);

        let cleared = trail.clear_assigments_above(0);
        assert_eq!(cleared, vec![literal(-1), literal(2), literal(3)]);
        assert_eq!(trail.level(), 0);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.q_head, 1);
    }

    #[test]
    fn clear_above_top_is_noop() {
        let mut trail = Trail::default();
        trail.new_level();
        trail.store_assignment(literal(1));

        assert!(trail.clear_assigments_above(1).is_empty());
        assert!(trail.clear_assigments_above(3).is_empty());
        assert_eq!(trail.len(), 1);
    }
}

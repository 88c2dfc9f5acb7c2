/*!
Watch lists, for each literal the clauses watching that literal.

Every stored clause watches its first two literals, and is on the watch list of each.
When a watched literal becomes false the clause is examined, and either a fresh literal is watched, the other watch is propagated, or the clause conflicts with the valuation.

Watch lists are indexed by [CLiteral::index], so the two literals of an atom have distinct lists.

A key on a watch list may be to a clause which has since been removed from the clause database.
Such keys are dropped from the list when next examined by [BCP](crate::procedures::bcp).
*/

use crate::{db::ClauseKey, structures::literal::CLiteral};

#[derive(Default)]
pub struct Watches {
    lists: Vec<Vec<ClauseKey>>,
}

impl Watches {
    /// Ensures a watch list exists for both literals of every atom up to `atom_count`.
    pub fn ensure_capacity(&mut self, atom_count: usize) {
        let required = 2 * (atom_count + 1);
        if self.lists.len() < required {
            self.lists.resize_with(required, Vec::default);
        }
    }

    /// Adds the clause with key `key` to the watch list of `literal`.
    pub fn watch(&mut self, literal: CLiteral, key: ClauseKey) {
        let index = literal.index();
        if self.lists.len() <= index {
            self.lists.resize_with(index + 1, Vec::default);
        }
        self.lists[index].push(key);
    }

    /// Takes the watch list of `literal`, leaving an empty list until the list is [restored](Watches::restore).
    ///
    /// For use during propagation, where clauses on the list may move their watch to some other literal.
    pub fn take(&mut self, literal: CLiteral) -> Vec<ClauseKey> {
        match self.lists.get_mut(literal.index()) {
            Some(list) => std::mem::take(list),
            None => Vec::default(),
        }
    }

    /// Sets the watch list of `literal` to `list`.
    ///
    /// The counterpart of [take](Watches::take).
    pub fn restore(&mut self, literal: CLiteral, list: Vec<ClauseKey>) {
        let index = literal.index();
        if self.lists.len() <= index {
            self.lists.resize_with(index + 1, Vec::default);
        }
        self.lists[index] = list;
    }

    /// The clauses watching `literal`.
    pub fn watchers(&self, literal: CLiteral) -> &[ClauseKey] {
        match self.lists.get(literal.index()) {
            Some(list) => list,
            None => &[],
        }
    }
}

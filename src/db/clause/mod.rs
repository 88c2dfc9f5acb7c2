/*!
A database of clauses, accessed via [ClauseKey]s.

Clauses are stored by source:
- Clauses read from the formula are `Original`.
- Clauses learnt during analysis are `Addition`s.

Only clauses of two or more literals are stored.
A unit clause is instead an assignment at level zero on the [trail](crate::db::trail), and the empty clause is reported as an error.

Each stored clause is watched by its first two literals, and [store](ClauseDB::store) adds the clause to the relevant [watch lists](crate::db::watches).
On [removal](ClauseDB::remove) watch lists are left as they are, and the stale keys are dropped during [BCP](crate::procedures::bcp).

Learnt clauses have an activity, bumped each time the clause takes part in analysis.
The activity is not used to remove clauses, as learnt clauses are kept for the life of a session.
*/

pub mod db_clause;

use db_clause::dbClause;
use slotmap::{DefaultKey, SlotMap};

use crate::{
    config::{defaults, Activity, Config},
    db::{watches::Watches, ClauseKey},
    misc::log::targets::{self},
    structures::clause::{CClause, ClauseSource},
    types::err::{self},
};

/// The clause database.
pub struct ClauseDB {
    original: SlotMap<DefaultKey, dbClause>,
    addition: SlotMap<DefaultKey, dbClause>,

    /// The activity added to a learnt clause on a bump.
    bump: Activity,

    /// The decay applied to learnt clause activity after each conflict.
    decay: Activity,
}

impl ClauseDB {
    /// A new [ClauseDB] with local configuration options derived from `config`.
    pub fn new(config: &Config) -> Self {
        ClauseDB {
            original: SlotMap::default(),
            addition: SlotMap::default(),
            bump: defaults::CLAUSE_BUMP,
            decay: config.clause_decay.value,
        }
    }

    /// Stores a clause, and watches the first two literals of the clause.
    ///
    /// The caller is responsible for the order of literals.
    /// In particular, for a learnt clause the asserted literal should be at position `0`.
    ///
    /// ```rust,ignore
    /// let key = self.clause_db.store(learnt, ClauseSource::Resolution, &mut self.watches)?;
    /// ```
    pub fn store(
        &mut self,
        clause: CClause,
        source: ClauseSource,
        watches: &mut Watches,
    ) -> Result<ClauseKey, err::ClauseDBError> {
        match clause.len() {
            0 => return Err(err::ClauseDBError::EmptyClause),
            1 => return Err(err::ClauseDBError::UnitClause),
            _ => {}
        }

        let (first, second) = (clause[0], clause[1]);

        let key = match source {
            ClauseSource::Original => ClauseKey::Original(
                self.original
                    .insert_with_key(|k| dbClause::new(ClauseKey::Original(k), clause)),
            ),
            ClauseSource::Resolution => ClauseKey::Addition(
                self.addition
                    .insert_with_key(|k| dbClause::new(ClauseKey::Addition(k), clause)),
            ),
        };

        watches.watch(first, key);
        watches.watch(second, key);

        log::trace!(target: targets::CLAUSE_DB, "Stored {key}");
        Ok(key)
    }

    /// The clause with key `key`.
    pub fn get(&self, key: &ClauseKey) -> Result<&dbClause, err::ClauseDBError> {
        let clause = match key {
            ClauseKey::Original(k) => self.original.get(*k),
            ClauseKey::Addition(k) => self.addition.get(*k),
        };
        clause.ok_or(err::ClauseDBError::Missing)
    }

    /// The clause with key `key`, mutably.
    pub fn get_mut(&mut self, key: &ClauseKey) -> Result<&mut dbClause, err::ClauseDBError> {
        let clause = match key {
            ClauseKey::Original(k) => self.original.get_mut(*k),
            ClauseKey::Addition(k) => self.addition.get_mut(*k),
        };
        clause.ok_or(err::ClauseDBError::Missing)
    }

    /// Removes the clause with key `key`, returning the clause.
    ///
    /// Watch lists are not updated.
    pub fn remove(&mut self, key: &ClauseKey) -> Result<dbClause, err::ClauseDBError> {
        let clause = match key {
            ClauseKey::Original(k) => self.original.remove(*k),
            ClauseKey::Addition(k) => self.addition.remove(*k),
        };
        log::trace!(target: targets::CLAUSE_DB, "Removed {key}");
        clause.ok_or(err::ClauseDBError::Missing)
    }

    /// Bumps the activity of a learnt clause, rescoring the activity of every learnt clause if needed.
    ///
    /// Original clauses have no activity, and are ignored.
    pub fn bump_activity(&mut self, key: &ClauseKey) {
        let ClauseKey::Addition(k) = key else {
            return;
        };

        let bumped = match self.addition.get_mut(*k) {
            Some(clause) => clause.bump_activity(self.bump),
            None => return,
        };

        if bumped > defaults::CLAUSE_ACTIVITY_MAX {
            let factor = 1.0 / defaults::CLAUSE_ACTIVITY_MAX;
            for (_, clause) in self.addition.iter_mut() {
                clause.scale_activity(factor);
            }
            self.bump *= factor;
        }
    }

    /// Increase the activity bump applied to learnt clauses by a factor of 1 / decay.
    pub fn decay_activity(&mut self) {
        self.bump *= 1.0 / self.decay;
    }

    /// An iterator over all clauses.
    pub fn all_clauses(&self) -> impl Iterator<Item = &dbClause> {
        self.original.values().chain(self.addition.values())
    }

    /// A count of stored original clauses.
    pub fn original_count(&self) -> usize {
        self.original.len()
    }

    /// A count of stored learnt clauses.
    pub fn addition_count(&self) -> usize {
        self.addition.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::literal::{CLiteral, Literal};

    #[test]
    fn store_get_remove() {
        let mut clause_db = ClauseDB::new(&Config::default());
        let mut watches = Watches::default();

        let p = CLiteral::new(1, true);
        let q = CLiteral::new(2, false);
        let r = CLiteral::new(3, true);

        let key = clause_db
            .store(vec![p, q, r], ClauseSource::Original, &mut watches)
            .unwrap();
        assert_eq!(clause_db.get(&key).unwrap().clause(), &vec![p, q, r]);
        assert_eq!(watches.watchers(p), &[key]);
        assert_eq!(watches.watchers(q), &[key]);
        assert!(watches.watchers(r).is_empty());

        assert!(clause_db.remove(&key).is_ok());
        assert_eq!(clause_db.get(&key).err(), Some(err::ClauseDBError::Missing));

        let fresh = clause_db
            .store(vec![p, r], ClauseSource::Original, &mut watches)
            .unwrap();
        assert_ne!(fresh, key);
        assert!(clause_db.get(&key).is_err());
    }

    #[test]
    fn short_clauses_are_refused() {
        let mut clause_db = ClauseDB::new(&Config::default());
        let mut watches = Watches::default();

        assert_eq!(
            clause_db.store(vec![], ClauseSource::Resolution, &mut watches),
            Err(err::ClauseDBError::EmptyClause)
        );
        assert_eq!(
            clause_db.store(
                vec![CLiteral::new(4, true)],
                ClauseSource::Resolution,
                &mut watches
            ),
            Err(err::ClauseDBError::UnitClause)
        );
        assert_eq!(clause_db.addition_count(), 0);
    }
}

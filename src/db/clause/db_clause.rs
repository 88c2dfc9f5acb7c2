//! A struct holding a [clause](Clause) and associated metadata.
//!
//! A [dbClause] contains:
//! - A [clause](Clause), represented as a [CClause].
//! - The [key](ClauseKey) used to access the [dbClause].
//! - An activity, used to note how often a learnt clause takes part in analysis.
//!
//! # Watched literals
//!
//! The watched literals of a clause are always the literals at positions `0` and `1`.
//! To preserve this the order of literals in the clause is mutated as needed by [update_watch](dbClause::update_watch).
//!
//! Further, when a clause is the reason for the value of some atom the literal of that atom is at position `0`.

use std::ops::Deref;

use crate::{
    config::Activity,
    db::{atom::AtomDB, ClauseKey},
    structures::{
        clause::{CClause, Clause},
        literal::CLiteral,
    },
};

/// The result of examining a clause when one of its watched literals has become false.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchStatus {
    /// The other watched literal is true, and the clause keeps its watches.
    Witness,

    /// The watch moved from the false literal to the given literal.
    Moved(CLiteral),

    /// Every literal other than the given literal (at position `0`) is false, and the given literal has no value.
    Unit(CLiteral),

    /// Every literal is false.
    Conflict,
}

/// A clause together with some metadata.
#[allow(non_camel_case_types)]
pub struct dbClause {
    key: ClauseKey,
    clause: CClause,
    activity: Activity,
}

impl dbClause {
    /// Bundles a [ClauseKey] and [CClause] into a [dbClause].
    ///
    /// Note: This does not store the [dbClause] in the [clause database](crate::db::clause::ClauseDB).
    pub fn new(key: ClauseKey, clause: CClause) -> Self {
        dbClause {
            key,
            clause,
            activity: 0.0,
        }
    }

    /// The key used to access the [dbClause].
    pub const fn key(&self) -> ClauseKey {
        self.key
    }

    pub fn clause(&self) -> &CClause {
        &self.clause
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub(super) fn bump_activity(&mut self, bump: Activity) -> Activity {
        self.activity += bump;
        self.activity
    }

    pub(super) fn scale_activity(&mut self, factor: Activity) {
        self.activity *= factor;
    }

    /// Updates the watches of the clause, given the watched literal `false_literal` is false on the valuation of `atom_db`.
    ///
    /// After the update, `false_literal` is at position `1` unless the watch moved.
    /// And, the literal at position `0` is the candidate for propagation.
    pub fn update_watch(&mut self, false_literal: CLiteral, atom_db: &AtomDB) -> WatchStatus {
        if self.clause[0] == false_literal {
            self.clause.swap(0, 1);
        }

        let other = self.clause[0];
        if atom_db.value_of_literal(&other) == Some(true) {
            return WatchStatus::Witness;
        }

        for index in 2..self.clause.len() {
            if atom_db.value_of_literal(&self.clause[index]) != Some(false) {
                self.clause.swap(1, index);
                return WatchStatus::Moved(self.clause[1]);
            }
        }

        match atom_db.value_of_literal(&other) {
            None => WatchStatus::Unit(other),
            Some(_) => WatchStatus::Conflict,
        }
    }
}

impl std::fmt::Display for dbClause {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.clause.as_dimacs(false))
    }
}

impl Deref for dbClause {
    type Target = [CLiteral];

    fn deref(&self) -> &Self::Target {
        &self.clause
    }
}

impl Clause for dbClause {
    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        self.clause.iter()
    }

    fn size(&self) -> usize {
        self.clause.len()
    }
}

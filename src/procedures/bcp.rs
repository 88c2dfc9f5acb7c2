/*!
A session method for boolean constraint propagation.

See [Session::propagate] for the relevant session method.

# Overview
Propagates each assignment on the trail which has not yet been propagated, in order.

When an atom is assigned some value, the literal with the opposite value is false.
So, each clause watching that (false) literal is examined, and either:
- The other watched literal is true, and nothing is done.
- Some other literal of the clause is not false, and the clause watches that literal instead.
- The other watched literal has no value, and is assigned with the clause as its antecedent.
- Every literal is false, and the clause is returned as a conflict.

Propagation stops at the first conflict, and the remaining clauses watching the false literal keep their watch.

# Complications

A watch list is taken from the watch database while examined, as a clause may move its watch to some other literal.
The list being examined is never the destination of a moved watch, as the literal of the list is false and so not a candidate for a watch.
So, the list may be restored after it has been examined without losing any watch.

Keys to clauses which have been removed from the clause database are dropped from the list when found.

# Example

```rust,ignore
match self.propagate() {
    Some(key) => {
        let analysis = self.analyze(key)?;
        ...
    }
    None => {
        match self.pick_branch_literal() {
            ...
        }
    }
}
```
*/

use crate::{
    db::{clause::db_clause::WatchStatus, Antecedent, ClauseKey},
    misc::log::targets::{self},
    session::Session,
    structures::literal::Literal,
};

impl Session {
    /// Propagates every assignment on the trail from the propagation mark, returning the key of a conflicting clause on conflict.
    ///
    /// Returns `None` only when propagation has reached a fixpoint.
    pub fn propagate(&mut self) -> Option<ClauseKey> {
        while let Some(literal) = self.trail.next_pending() {
            let false_literal = literal.negate();
            let mut list = self.watches.take(false_literal);

            let mut index = 0;
            let mut conflict = None;

            while index < list.len() {
                let key = list[index];

                let db_clause = match self.clause_db.get_mut(&key) {
                    Ok(stored) => stored,
                    Err(_) => {
                        list.swap_remove(index);
                        continue;
                    }
                };

                match db_clause.update_watch(false_literal, &self.atom_db) {
                    WatchStatus::Witness => index += 1,

                    WatchStatus::Moved(watch) => {
                        self.watches.watch(watch, key);
                        list.swap_remove(index);
                    }

                    WatchStatus::Unit(consequence) => {
                        log::trace!(target: targets::PROPAGATION, "{consequence} from {key}");
                        self.assign(consequence, Antecedent::Propagation(key));
                        self.counters.propagations += 1;
                        index += 1;
                    }

                    WatchStatus::Conflict => {
                        log::trace!(target: targets::PROPAGATION, "Consequence of {key} and {literal} is contradiction");
                        conflict = Some(key);
                        break;
                    }
                }
            }

            self.watches.restore(false_literal, list);

            if conflict.is_some() {
                self.trail.exhaust_pending();
                return conflict;
            }
        }

        None
    }
}

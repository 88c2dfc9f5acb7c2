use slotmap::DefaultKey;

/// A key to access a clause stored in the clause database.
///
/// Clauses are stored in [slotmaps](slotmap), and a key pairs the slot key with the source of the clause.
/// A slotmap key carries a version, and so the key of a removed clause is never mistaken for the key of some later clause stored in the same slot.
///
/// Unit clauses are never stored, and so have no key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClauseKey {
    /// The key to a clause read from the formula.
    Original(DefaultKey),

    /// The key to a clause learnt during analysis.
    Addition(DefaultKey),
}

impl std::fmt::Display for ClauseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Original(key) => write!(f, "Original({key:?})"),
            Self::Addition(key) => write!(f, "Addition({key:?})"),
        }
    }
}

/*!
(The internal representation of) an atom, aka. a 'variable'.

Each atom is a u32, and atoms are dense, from `1` to the count of atoms in a session.
When reading DIMACS, variables are mapped to atoms in the order they are first seen.
So, if the first clause of a formula is `7 -3 0` the DIMACS variable `7` is the atom `1` and `3` is the atom `2`.

The atom `0` is never part of a formula.
Still, structures indexed by atoms keep a (unused) place for `0`, so that an atom may be used as an index without adjustment.
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;

/// The maximum instance of an atom.
///
/// Limited by the representation of literals as signed integers in DIMACS.
pub const ATOM_MAX: Atom = i32::MAX.unsigned_abs();

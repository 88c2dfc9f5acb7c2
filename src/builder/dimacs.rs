use std::{collections::HashMap, io::BufRead};

use crate::{
    misc::log::targets::{self},
    session::Session,
    structures::{
        atom::{Atom, ATOM_MAX},
        clause::CClause,
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

/// Details of a formula read from DIMACS.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParserInfo {
    /// The count of atoms given by the problem specification, if any.
    pub expected_atoms: Option<usize>,

    /// The count of clauses given by the problem specification, if any.
    pub expected_clauses: Option<usize>,

    /// The count of atoms read.
    pub added_atoms: usize,

    /// The count of clauses read.
    pub added_clauses: usize,
}

impl Session {
    /// Reads a DIMACS formula into the session.
    ///
    /// - Lines beginning with `c` are comments.
    /// - A problem specification `p cnf <atoms> <clauses>` may appear before the first clause.
    /// - A clause is a sequence of non-zero integers, terminated by `0`, and may span lines.
    /// - A line beginning with `%` ends the formula.
    ///
    /// DIMACS variables are mapped to atoms in the order they are first seen, and the map is returned alongside details of the read.
    ///
    /// ```rust
    /// # use otter_step::config::Config;
    /// # use otter_step::session::Session;
    /// let mut session = Session::new(Config::default());
    ///
    /// let dimacs = "
    /// c An example formula
    /// p cnf 3 3
    ///  1  2    0
    ///  1 -2    0
    ///    -2  3 0
    /// ";
    ///
    /// let (info, atom_map) = session.read_dimacs(dimacs.as_bytes()).unwrap();
    /// assert_eq!(info.expected_atoms, Some(3));
    /// assert_eq!(info.added_clauses, 3);
    /// assert_eq!(atom_map.get(&3), Some(&3));
    /// ```
    pub fn read_dimacs(
        &mut self,
        mut reader: impl BufRead,
    ) -> Result<(ParserInfo, HashMap<isize, Atom>), err::ErrorKind> {
        let mut info = ParserInfo::default();
        let mut atom_map = HashMap::<isize, Atom>::default();

        let mut buffer = String::with_capacity(1024);
        let mut clause_buffer: CClause = Vec::default();

        let mut line_counter = 0;
        let mut in_preamble = true;

        'line_loop: loop {
            buffer.clear();
            match reader.read_line(&mut buffer) {
                Ok(0) => break,
                Ok(_) => line_counter += 1,
                Err(_) => return Err(err::ParseError::Line(line_counter).into()),
            }

            let line = buffer.trim();
            match line.chars().next() {
                None | Some('c') => continue 'line_loop,

                Some('%') => break 'line_loop,

                Some('p') => {
                    if !in_preamble {
                        return Err(err::ParseError::MisplacedProblem(line_counter).into());
                    }
                    let (atoms, clauses) = problem_specification(line)?;
                    info.expected_atoms = Some(atoms);
                    info.expected_clauses = Some(clauses);
                    in_preamble = false;
                }

                Some(_) => {
                    in_preamble = false;

                    for item in line.split_whitespace() {
                        let parsed_int = match item.parse::<isize>() {
                            Ok(int) => int,
                            Err(_) => return Err(err::ParseError::Literal(line_counter).into()),
                        };

                        if parsed_int == 0 {
                            let the_clause = std::mem::take(&mut clause_buffer);
                            self.add_clause(the_clause)?;
                            info.added_clauses += 1;
                            continue;
                        }

                        let atom = match atom_map.get(&parsed_int.abs()) {
                            Some(atom) => *atom,
                            None => {
                                if parsed_int.unsigned_abs() > ATOM_MAX as usize {
                                    return Err(err::ParseError::AtomLimit(line_counter).into());
                                }
                                let fresh_atom = self.fresh_atom()?;
                                atom_map.insert(parsed_int.abs(), fresh_atom);
                                fresh_atom
                            }
                        };
                        clause_buffer.push(CLiteral::new(atom, parsed_int.is_positive()));
                    }
                }
            }
        }

        if !clause_buffer.is_empty() {
            log::warn!(target: targets::SESSION, "The final clause is not terminated by 0, and is read as a clause");
            self.add_clause(clause_buffer)?;
            info.added_clauses += 1;
        }

        info.added_atoms = atom_map.len();

        if let Some(expected) = info.expected_clauses {
            if expected != info.added_clauses {
                log::warn!(target: targets::SESSION, "Expected {expected} clauses, read {}", info.added_clauses);
            }
        }

        Ok((info, atom_map))
    }
}

/// The atom and clause counts of a problem specification line.
fn problem_specification(line: &str) -> Result<(usize, usize), err::ParseError> {
    let mut details = line.split_whitespace();
    if details.next() != Some("p") || details.next() != Some("cnf") {
        return Err(err::ParseError::ProblemSpecification);
    }

    let mut count = || -> Result<usize, err::ParseError> {
        match details.next().map(|string| string.parse::<usize>()) {
            Some(Ok(count)) => Ok(count),
            _ => Err(err::ParseError::ProblemSpecification),
        }
    };

    let atoms = count()?;
    let clauses = count()?;
    Ok((atoms, clauses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn atoms_in_order_of_appearance() {
        let mut session = Session::new(Config::default());
        let (info, atom_map) = session.read_dimacs("7 -3 0\n3 12 0\n".as_bytes()).unwrap();

        assert_eq!(info.expected_atoms, None);
        assert_eq!(info.added_atoms, 3);
        assert_eq!(atom_map.get(&7), Some(&1));
        assert_eq!(atom_map.get(&3), Some(&2));
        assert_eq!(atom_map.get(&12), Some(&3));
    }

    #[test]
    fn clauses_across_lines() {
        let mut session = Session::new(Config::default());
        let dimacs = "p cnf 4 3\n1 2\n 3 0 -4\n 0 -1 0\n";
        let (info, _) = session.read_dimacs(dimacs.as_bytes()).unwrap();

        assert_eq!(info.added_clauses, 3);
        assert_eq!(session.clause_db.original_count(), 1);
        assert_eq!(session.trail_size(), 2);
    }

    #[test]
    fn percent_ends_formula() {
        let mut session = Session::new(Config::default());
        let dimacs = "1 2 0\n%\n0\n";
        let (info, _) = session.read_dimacs(dimacs.as_bytes()).unwrap();
        assert_eq!(info.added_clauses, 1);
    }

    #[test]
    fn malformed() {
        let mut session = Session::new(Config::default());
        assert_eq!(
            session.read_dimacs("p cnf x 2\n".as_bytes()).err(),
            Some(err::ErrorKind::Parse(err::ParseError::ProblemSpecification))
        );

        let mut session = Session::new(Config::default());
        assert_eq!(
            session.read_dimacs("1 2 0\n1 b 0\n".as_bytes()).err(),
            Some(err::ErrorKind::Parse(err::ParseError::Literal(2)))
        );

        let mut session = Session::new(Config::default());
        assert_eq!(
            session.read_dimacs("1 2 0\np cnf 2 1\n".as_bytes()).err(),
            Some(err::ErrorKind::Parse(err::ParseError::MisplacedProblem(2)))
        );
    }

    #[test]
    fn unterminated_final_clause() {
        let mut session = Session::new(Config::default());
        let (info, _) = session.read_dimacs("1 -2 0\n2 3".as_bytes()).unwrap();
        assert_eq!(info.added_clauses, 2);
        assert_eq!(session.clause_db.original_count(), 2);
    }
}

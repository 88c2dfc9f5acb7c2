use std::{io::BufReader, path::PathBuf};

use crate::{
    builder::ParserInfo,
    config::Config,
    misc::log::targets::{self},
    session::Session,
    types::err::{self},
};

/// Where a formula is read from.
///
/// A restart reads the formula again, and so a source is kept for the life of a driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormulaSource {
    /// A DIMACS file, either `.cnf`, `.gz` (with the default `gz` feature), or `.xz` (with the `xz` feature).
    File(PathBuf),

    /// A DIMACS string.
    Text(String),
}

impl FormulaSource {
    /// Reads the formula of the source into `session`.
    pub fn read_into(&self, session: &mut Session) -> Result<ParserInfo, err::ErrorKind> {
        let info = match self {
            Self::Text(dimacs) => session.read_dimacs(dimacs.as_bytes())?.0,

            Self::File(path) => {
                log::info!(target: targets::SESSION, "Reading DIMACS file from {path:?}");

                let file = match std::fs::File::open(path) {
                    Ok(file) => file,
                    Err(_) => {
                        return Err(err::ReadError::FailedToOpen(path.display().to_string()).into())
                    }
                };

                match path.extension() {
                    #[cfg(feature = "xz")]
                    Some(extension) if extension == "xz" => {
                        session
                            .read_dimacs(BufReader::new(xz2::read::XzDecoder::new(&file)))?
                            .0
                    }

                    #[cfg(feature = "gz")]
                    Some(extension) if extension == "gz" => {
                        session
                            .read_dimacs(BufReader::new(flate2::read::GzDecoder::new(&file)))?
                            .0
                    }

                    Some(extension) if extension == "cnf" => {
                        session.read_dimacs(BufReader::new(&file))?.0
                    }

                    Some(unknown) => {
                        return Err(err::ReadError::UnknownExtension(unknown.to_owned()).into())
                    }

                    None => return Err(err::ReadError::NoExtension.into()),
                }
            }
        };

        match info.expected_atoms {
            Some(count) => log::info!(target: targets::SESSION, "Expected atoms:   {count}"),
            None => log::info!(target: targets::SESSION, "No preamble was found"),
        }
        log::info!(target: targets::SESSION, "Atom count:       {}", info.added_atoms);
        if let Some(count) = info.expected_clauses {
            log::info!(target: targets::SESSION, "Expected clauses: {count}");
        }
        log::info!(target: targets::SESSION, "Clause count:     {}", info.added_clauses);

        Ok(info)
    }
}

impl Session {
    /// A session with the formula of `source`, simplified.
    ///
    /// A formula found to be unsatisfiable while reading or simplifying is reported as [ImmediateUnsat](err::ErrorKind::ImmediateUnsat).
    pub fn from_formula(config: Config, source: &FormulaSource) -> Result<Session, err::ErrorKind> {
        let mut session = Session::new(config);
        source.read_into(&mut session)?;
        session.simplify()?;
        Ok(session)
    }

    /// A session with the DIMACS formula `dimacs`, simplified.
    pub fn from_dimacs(config: Config, dimacs: &str) -> Result<Session, err::ErrorKind> {
        let mut session = Session::new(config);
        session.read_dimacs(dimacs.as_bytes())?;
        session.simplify()?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const FORMULA: &str = "p cnf 3 3\n1 2 0\n-1 3 0\n-2 -3 0\n";

    fn formula_file(suffix: &str, bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn plain_file() {
        let file = formula_file(".cnf", FORMULA.as_bytes());
        let source = FormulaSource::File(file.path().to_path_buf());

        let mut session = Session::new(Config::default());
        let info = source.read_into(&mut session).unwrap();
        assert_eq!(info.added_clauses, 3);
        assert_eq!(session.clause_db.original_count(), 3);
    }

    #[cfg(feature = "gz")]
    #[test]
    fn gzipped_file() {
        use flate2::{write::GzEncoder, Compression};

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(FORMULA.as_bytes()).unwrap();
        let file = formula_file(".cnf.gz", &encoder.finish().unwrap());
        let source = FormulaSource::File(file.path().to_path_buf());

        let mut session = Session::new(Config::default());
        let info = source.read_into(&mut session).unwrap();
        assert_eq!(info.expected_atoms, Some(3));
        assert_eq!(info.added_clauses, 3);
        assert_eq!(session.clause_db.original_count(), 3);

        assert!(Session::from_formula(Config::default(), &source).is_ok());
    }

    #[test]
    fn unknown_extension() {
        let file = formula_file(".txt", FORMULA.as_bytes());
        let source = FormulaSource::File(file.path().to_path_buf());

        let mut session = Session::new(Config::default());
        assert!(matches!(
            source.read_into(&mut session),
            Err(err::ErrorKind::Read(err::ReadError::UnknownExtension(_)))
        ));
    }
}

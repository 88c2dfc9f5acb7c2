//! Error types used in the library.
//!
//! - Most of these are very unlikely to occur during use, and indicate a corrupt session.
//! - Some are external, e.g. a [ParseError] when a formula is malformed, or [ErrorKind::ImmediateUnsat] when a formula is unsatisfiable before any decision.
//!
//! Names of the error enums, for the most part, overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use std::ffi::OsString;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Analysis(AnalysisError),
    AtomDB(AtomDBError),
    Build(BuildError),
    ClauseDB(ClauseDBError),
    Parse(ParseError),
    Read(ReadError),

    /// A backjump could not be made, typically as some literal of a clause has no value.
    Backjump,

    /// Some method was called on a session in a state where the method is not sound.
    InvalidState,

    /// A conflict was found before any decision was made.
    ///
    /// In other words, the formula is unsatisfiable, and this is known without search.
    ImmediateUnsat,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Read(e) => write!(f, "{e}"),
            Self::ImmediateUnsat => write!(f, "The formula is unsatisfiable without search"),
            Self::InvalidState => write!(f, "Invalid session state"),
            Self::Backjump => write!(f, "Failed to backjump"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Noted errors during conflict analysis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnalysisError {
    /// Somehow resolution resolved to an empty clause.
    EmptyResolution,

    /// Resolution failed to terminate with an asserting clause.
    NoAssertion,

    /// Some literal in the implication graph was not given a value by propagation, and has no clause to resolve with.
    MissingAntecedent,
}

impl From<AnalysisError> for ErrorKind {
    fn from(e: AnalysisError) -> Self {
        ErrorKind::Analysis(e)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AtomDBError {
    /// There are no more fresh atoms.
    AtomsExhausted,
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        ErrorKind::AtomDB(e)
    }
}

/// Noted errors when building a session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// A clause was added after some decision was made.
    DecisionMade,
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseDBError {
    /// Some attempt was made to store an empty clause.
    EmptyClause,

    /// Some attempt was made to store a unit clause, which belong on the trail.
    UnitClause,

    /// A key to a clause which is not (or no longer) in the database.
    Missing,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

/// Errors during parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Some issue with the problem specification in a DIMACS input.
    ProblemSpecification,

    /// Some unspecific problem at a specific line.
    Line(usize),

    /// Some token which is not a literal, at a specific line.
    Literal(usize),

    /// The problem specification of some DIMACS input is not in the header of the input.
    MisplacedProblem(usize),

    /// A literal whose atom is beyond the atoms which may be represented.
    AtomLimit(usize),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProblemSpecification => write!(f, "Malformed problem specification"),
            Self::Line(line) => write!(f, "Failed to read line {line}"),
            Self::Literal(line) => write!(f, "Malformed literal on line {line}"),
            Self::MisplacedProblem(line) => write!(f, "Misplaced problem specification on line {line}"),
            Self::AtomLimit(line) => write!(f, "Atom out of range on line {line}"),
        }
    }
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors when reading a formula from a file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReadError {
    NoExtension,
    UnknownExtension(OsString),
    FailedToOpen(String),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Self::NoExtension => write!(f, "The file does not have an extension"),
            Self::UnknownExtension(ex) => write!(f, "Unsupported extension '{ex:?}'"),
            Self::FailedToOpen(path) => write!(f, "Failed to open CNF file '{path}'"),
        }
    }
}

impl From<ReadError> for ErrorKind {
    fn from(e: ReadError) -> Self {
        ErrorKind::Read(e)
    }
}

/// Errors when broadcasting to observers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BroadcastError {
    /// There were no observers to broadcast to.
    NoObservers,

    /// The message could not be serialised.
    Serialisation,
}

/// Errors when reading a command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CommandError {
    /// The text is not a command.
    Unknown(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(text) => write!(f, "Unknown command: {text:?}"),
        }
    }
}

/// Errors which end a server.
#[derive(Debug)]
pub enum ServerError {
    /// The listener could not be bound.
    Bind(std::io::Error),

    /// The session could not be built, or failed.
    Session(ErrorKind),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bind(e) => write!(f, "Failed to bind: {e}"),
            Self::Session(e) => write!(f, "{e}"),
        }
    }
}

impl From<ErrorKind> for ServerError {
    fn from(e: ErrorKind) -> Self {
        ServerError::Session(e)
    }
}

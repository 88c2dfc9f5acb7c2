/*!
Reports for a session.
*/

use crate::session::StepState;

/// High-level reports regarding a solve.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Report {
    /// The formula of the session is satisfiable.
    Satisfiable,

    /// The formula of the session is unsatisfiable.
    ///
    /// Or, if assumptions were made, the formula together with the assumptions is unsatisfiable.
    Unsatisfiable,

    /// Satisfiability of the formula of the session is unknown, for some reason.
    Unknown,
}

impl From<&StepState> for Report {
    fn from(value: &StepState) -> Self {
        match value {
            StepState::Exhausted(report) => *report,
            StepState::Idle
            | StepState::Propagating
            | StepState::Deciding
            | StepState::Conflicted => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

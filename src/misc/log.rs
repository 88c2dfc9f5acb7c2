/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for following a solve and for fixing issues.

Note, no log implementation is provided by the library.
The binary uses [env_logger](https://docs.rs/env_logger/latest/env_logger/), and so targets may be filtered with `RUST_LOG`.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [BCP](crate::procedures::bcp)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [analysis](crate::procedures::analysis)
    pub const ANALYSIS: &str = "analysis";

    /// Logs related to [backjumping](crate::procedures::backjump)
    pub const BACKJUMP: &str = "backjump";

    /// Logs related to [decisions](crate::procedures::decision)
    pub const DECISION: &str = "decision";

    /// Logs related to the [step state machine](crate::procedures::step)
    pub const STEP: &str = "step";

    /// Logs related to the [clause database](crate::db::clause)
    pub const CLAUSE_DB: &str = "clause_db";

    /// Logs related to building and simplifying a [session](crate::session)
    pub const SESSION: &str = "session";

    /// Logs related to the [driver and transport](crate::server)
    pub const SERVER: &str = "server";
}

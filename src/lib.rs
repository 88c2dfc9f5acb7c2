//! A conflict-driven clause-learning solver which can be driven one step at a time.
//!
//! otter_step is built for watching a solve happen.
//! A [session](crate::session::Session) holds a formula together with the state of a search for a satisfying valuation, and the search advances only when asked to, by [step](crate::session::Session::step).
//! Between any two steps the session is consistent, and so a search may be paused, resumed, rewound to the formula alone (keeping learnt clauses), or discarded and restarted.
//!
//! The library is split into:
//! - [structures], the abstract elements of a solve (atoms, literals, clauses).
//! - [db], the databases a session is made of (clauses, atoms, watches, the trail).
//! - [procedures], the methods which mutate a session (propagation, analysis, backjumping, decisions, and the step state machine).
//! - [builder], for adding a formula to a session, typically from DIMACS.
//! - [server], a driver which owns a session and exposes it to observers over a websocket, together with the static files of a small browser client.
//!
//! # Example
//!
//! ```rust
//! # use otter_step::config::Config;
//! # use otter_step::reports::Report;
//! # use otter_step::session::Session;
//! # use otter_step::procedures::step::StepOk;
//! let mut session = Session::from_dimacs(Config::default(), "
//!  1  2 0
//! -1  3 0
//! ").unwrap();
//!
//! let mut trail_sizes = Vec::new();
//! loop {
//!     match session.step().unwrap() {
//!         StepOk::Decision { trail, .. } | StepOk::ConflictResolved { trail, .. } => trail_sizes.push(trail),
//!         StepOk::Exhausted(report) => {
//!             assert_eq!(report, Report::Satisfiable);
//!             break;
//!         }
//!     }
//! }
//! assert!(!trail_sizes.is_empty());
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout with the targets listed in [misc::log].
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/), `RUST_LOG=analysis=trace …` shows each learnt clause.

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

pub mod builder;
pub mod config;
pub mod db;
pub mod generic;
pub mod misc;
pub mod procedures;
pub mod reports;
pub mod server;
pub mod session;
pub mod structures;
pub mod types;

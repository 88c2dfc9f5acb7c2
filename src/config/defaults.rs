use crate::config::{Activity, PolarityLean, RandomDecisionBias};

pub const ATOM_DECAY: Activity = 0.95;
pub const ATOM_BUMP: Activity = 1.0;
pub const ATOM_ACTIVITY_MAX: Activity = 1e100;

pub const CLAUSE_DECAY: Activity = 0.999;
pub const CLAUSE_BUMP: Activity = 1.0;
pub const CLAUSE_ACTIVITY_MAX: Activity = 1e20;

pub const MINIMIZATION: bool = true;
pub const PHASE_SAVING: bool = true;
pub const POLARITY_LEAN: PolarityLean = 0.0;
pub const RANDOM_DECISION_BIAS: RandomDecisionBias = 0.0;

pub const RNG_SEED: u64 = 91_648_253;

pub const PORT: u16 = 8000;
pub const FORMULA: &str = "formula.cnf";
pub const WWW: &str = "www";
pub const TICK_MS: u64 = 50;

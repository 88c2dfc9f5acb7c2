/*!
Configuration of a session.

All configuration of a session is contained within a [Config], and a session keeps its own copy of the config it was made with.
Some databases clone the parts of the configuration relevant to them.

Each option is a [ConfigOption], which pairs a value with the bounds of that value.
Values outside the bounds are clamped when the option is [set](ConfigOption::set).

```rust
# use otter_step::config::Config;
let mut config = Config::default();
config.atom_decay.set(2.0);
assert_eq!(config.atom_decay.value, config.atom_decay.max);
```
*/

pub mod defaults;

use serde::Serialize;

/// Representation for the activity of atoms and clauses.
pub type Activity = f64;

/// Representation for the probability of choosing `true`
pub type PolarityLean = f64;

/// Representation for the probability of making a random decision
pub type RandomDecisionBias = f64;

/// A configuration option, with bounds.
#[derive(Clone, Debug, Serialize)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: Clone + PartialOrd> ConfigOption<T> {
    /// Sets the value of the option, clamped to the bounds of the option.
    pub fn set(&mut self, value: T) {
        self.value = if value < self.min {
            self.min.clone()
        } else if value > self.max {
            self.max.clone()
        } else {
            value
        };
    }
}

/// The primary configuration structure.
#[derive(Clone, Debug, Serialize)]
pub struct Config {
    /// The decay applied to the activity of atoms after each conflict.
    ///
    /// Applied by growing the bump for future conflicts by 1 / decay.
    pub atom_decay: ConfigOption<Activity>,

    /// The decay applied to the activity of learnt clauses after each conflict.
    pub clause_decay: ConfigOption<Activity>,

    /// Remove literals from a learnt clause when implied by other literals of the clause.
    pub minimization: ConfigOption<bool>,

    /// Default to the last set value of an atom when choosing a value for the atom, otherwise decide with probability [polarity_lean](Config::polarity_lean).
    pub phase_saving: ConfigOption<bool>,

    /// The probability of assigning positive polarity to an atom when freely choosing an atom.
    pub polarity_lean: ConfigOption<PolarityLean>,

    /// The probability of choosing an atom without a value at random, rather than by activity.
    pub random_decision_bias: ConfigOption<RandomDecisionBias>,

    /// The seed for any randomness during a session.
    pub seed: ConfigOption<u64>,
}

impl Default for Config {
    /// The default config gives deterministic, activity driven, decisions.
    fn default() -> Self {
        Config {
            atom_decay: ConfigOption {
                name: "atom_decay",
                min: 0.5,
                max: 1.0 - Activity::EPSILON,
                value: defaults::ATOM_DECAY,
            },

            clause_decay: ConfigOption {
                name: "clause_decay",
                min: 0.5,
                max: 1.0 - Activity::EPSILON,
                value: defaults::CLAUSE_DECAY,
            },

            minimization: ConfigOption {
                name: "minimization",
                min: false,
                max: true,
                value: defaults::MINIMIZATION,
            },

            phase_saving: ConfigOption {
                name: "phase_saving",
                min: false,
                max: true,
                value: defaults::PHASE_SAVING,
            },

            polarity_lean: ConfigOption {
                name: "polarity_lean",
                min: 0.0,
                max: 1.0,
                value: defaults::POLARITY_LEAN,
            },

            random_decision_bias: ConfigOption {
                name: "random_decision_bias",
                min: 0.0,
                max: 1.0,
                value: defaults::RANDOM_DECISION_BIAS,
            },

            seed: ConfigOption {
                name: "seed",
                min: u64::MIN,
                max: u64::MAX,
                value: defaults::RNG_SEED,
            },
        }
    }
}

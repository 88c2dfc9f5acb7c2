use clap::Parser;

use otter_step::{
    config::{defaults, Config},
    server::{RewindPolicy, ServerConfig, StepGranularity},
};

/// Steps through a solve of a formula, as directed by observers in a browser
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The DIMACS form CNF file to parse, read again on each restart
    #[arg(short, long, default_value = defaults::FORMULA)]
    formula_file: std::path::PathBuf,

    /// The port to serve websockets and the browser client on
    #[arg(short, long, default_value_t = defaults::PORT)]
    port: u16,

    /// The directory of the browser client
    #[arg(short, long, default_value = defaults::WWW)]
    www: std::path::PathBuf,

    /// Milliseconds between steps while playing
    #[arg(short, long, default_value_t = defaults::TICK_MS)]
    tick: u64,

    /// Whether to rewind to level zero after each step
    #[arg(long, default_value_t, value_enum)]
    rewind: RewindPolicy,

    /// The unit of work of a step
    #[arg(long, default_value_t, value_enum)]
    granularity: StepGranularity,

    #[arg(long, default_value_t = defaults::ATOM_DECAY)]
    /// The decay applied to atom activity after each conflict
    atom_decay: f64,

    #[arg(long, default_value_t = defaults::CLAUSE_DECAY)]
    /// The decay applied to learnt clause activity after each conflict
    clause_decay: f64,

    #[arg(short = 'l', long, default_value_t = defaults::POLARITY_LEAN)]
    /// The chance of choosing positive polarity for an atom without a saved phase
    polarity_lean: f64,

    #[arg(short, long, default_value_t = defaults::RANDOM_DECISION_BIAS)]
    /// The chance of deciding on a random atom (as opposed to the most active atom)
    random_decision_bias: f64,

    /// Choose a polarity for each decision without regard to the previous value of the atom
    #[arg(long, default_value_t = false)]
    no_phase_saving: bool,

    /// Keep literals of a learnt clause which are implied by other literals of the clause
    #[arg(long, default_value_t = false)]
    no_minimization: bool,

    /// The seed for any randomness
    #[arg(short, long, default_value_t = defaults::RNG_SEED)]
    seed: u64,
}

impl Args {
    pub fn configs(self) -> (Config, ServerConfig) {
        let mut the_config = Config::default();

        the_config.atom_decay.set(self.atom_decay);
        the_config.clause_decay.set(self.clause_decay);
        the_config.polarity_lean.set(self.polarity_lean);
        the_config.random_decision_bias.set(self.random_decision_bias);
        the_config.phase_saving.value = !self.no_phase_saving;
        the_config.minimization.value = !self.no_minimization;
        the_config.seed.value = self.seed;

        let server_config = ServerConfig {
            port: self.port,
            formula: self.formula_file,
            www: self.www,
            tick_ms: self.tick,
            rewind: self.rewind,
            granularity: self.granularity,
        };

        (the_config, server_config)
    }
}

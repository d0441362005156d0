//! Shared default values for simulation configuration.
//! These values are used by both the `init` and `run` commands (via clap).

pub const CONFIG_FILE: &str = "genex.json";

pub const POPULATION_SIZE: usize = 100;
pub const GENERATIONS: usize = 10;
pub const GENOME_LENGTH: usize = 100;
pub const MUTATION_RATE: f64 = 0.001;

/// Default `RUST_LOG` filter. Anything chattier than `warn` would tear the
/// progress bar.
pub const LOG_FILTER: &str = "warn";

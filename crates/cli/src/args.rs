use clap::{Args, ValueEnum};
use genex_sim::genome::Genome;
use std::path::PathBuf;

use crate::defaults;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output configuration file
    #[arg(short, long, default_value = defaults::CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub params: RunParams,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Configuration file to start from (see `genex init`)
    ///
    /// Command-line parameters override values from the file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub params: RunParams,

    /// Output format for the results
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Write the session (parameters and results) to this JSON file
    #[arg(long)]
    pub session_out: Option<PathBuf>,
}

/// Run parameters shared by `init` and `run`.
///
/// Unset values fall back to the configuration file (for `run`) and then to
/// the built-in defaults.
#[derive(Args, Debug, Default)]
pub struct RunParams {
    /// Population size
    #[arg(short = 'n', long)]
    pub population_size: Option<usize>,

    /// Number of generations
    #[arg(short = 'g', long)]
    pub generations: Option<usize>,

    /// Genome length (sites per organism)
    #[arg(short = 'l', long)]
    pub genome_length: Option<usize>,

    /// Per-site mutation probability per generation
    #[arg(short = 'm', long)]
    pub mutation_rate: Option<f64>,

    /// Random seed (default: drawn at random and reported)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Ancestral genome every organism starts from, e.g. ACGTACGT
    ///
    /// Sets the genome length unless --genome-length is also given.
    #[arg(long)]
    pub ancestor: Option<Genome>,

    /// Grow the population to this size by reproduction before each
    /// round of selection
    #[arg(long)]
    pub brood_size: Option<usize>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Per-generation summary table
    Table,
    /// Full history as JSON
    Json,
}

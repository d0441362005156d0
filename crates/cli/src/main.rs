mod args;
mod commands;
pub mod defaults;
mod printing;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use args::{InitArgs, RunArgs};
use commands::{init, run, validate};

/// Genex: an evolution simulation lab
///
/// Simulates a population of haploid genomes that accumulate mutations,
/// each with an effect on fitness, under truncation selection.
#[derive(Parser, Debug)]
#[command(name = "genex")]
#[command(author, version, about = "Simulates mutation and selection in a population of genomes", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize a new simulation configuration.
    ///
    /// Writes the parameters for a new experiment (population size,
    /// mutation rate, etc.) to a JSON file but does not run it yet.
    Init(Box<InitArgs>),

    /// Run a simulation from a configuration file and/or parameters.
    ///
    /// Executes the simulation generation by generation. Ctrl-C stops the
    /// run after the current generation and still prints the results.
    Run(Box<RunArgs>),

    /// Validate a configuration file.
    Validate {
        /// Configuration file
        #[arg(short, long, default_value = defaults::CONFIG_FILE)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(defaults::LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match cli.command {
        Commands::Init(args) => {
            init::init_simulation(&args)?;
        }
        Commands::Run(args) => {
            run::run_simulation(&args)?;
        }
        Commands::Validate { config } => {
            validate::validate_configuration(&config)?;
        }
    }

    Ok(())
}

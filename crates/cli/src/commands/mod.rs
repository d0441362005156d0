pub mod init;
pub mod run;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use genex_sim::evolution::MutationModel;
use genex_sim::simulation::{Configuration, RunConfiguration};

use crate::args::RunParams;
use crate::defaults;

/// Read and validate a JSON configuration file.
pub fn load_configuration(path: &Path) -> Result<Configuration> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
    Configuration::from_json(&text)
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

/// Merge command-line parameters over an optional base configuration.
///
/// Precedence: command line, then the base configuration, then the built-in
/// defaults. An ancestral genome fixes the genome length unless the length
/// is given explicitly.
pub fn build_configuration(params: &RunParams, base: Option<Configuration>) -> Result<Configuration> {
    let run = base.as_ref().map(|c| &c.run);

    let ancestor = params
        .ancestor
        .clone()
        .or_else(|| run.and_then(|r| r.ancestral_genome().cloned()));
    let genome_length = params
        .genome_length
        .or_else(|| ancestor.as_ref().map(|g| g.len()))
        .or(run.map(RunConfiguration::genome_length))
        .unwrap_or(defaults::GENOME_LENGTH);

    let mut builder = RunConfiguration::builder()
        .population_size(
            params
                .population_size
                .or(run.map(RunConfiguration::population_size))
                .unwrap_or(defaults::POPULATION_SIZE),
        )
        .generations(
            params
                .generations
                .or(run.map(RunConfiguration::generations))
                .unwrap_or(defaults::GENERATIONS),
        )
        .genome_length(genome_length)
        .mutation_rate(
            params
                .mutation_rate
                .or(run.map(RunConfiguration::mutation_rate))
                .unwrap_or(defaults::MUTATION_RATE),
        );

    if let Some(seed) = params.seed.or(run.and_then(RunConfiguration::seed)) {
        builder = builder.seed(seed);
    }
    if let Some(ancestor) = ancestor {
        builder = builder.ancestral_genome(ancestor);
    }
    if let Some(workers) = run.and_then(RunConfiguration::num_workers) {
        builder = builder.num_workers(workers);
    }
    if let Some(brood_size) = params.brood_size.or(run.and_then(RunConfiguration::brood_size)) {
        builder = builder.brood_size(brood_size);
    }

    let run = builder.build().context("Invalid run parameters")?;
    let mutation = base.map(|c| c.mutation).unwrap_or_else(MutationModel::default);
    Ok(Configuration::new(run, mutation))
}

//! Run configuration.
//!
//! A [`RunConfiguration`] is validated once, when it is built or
//! deserialized, and is immutable afterwards. The master [`Configuration`]
//! pairs it with the mutation model so a run can be reproduced from a single
//! JSON document.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;
use crate::evolution::MutationModel;
use crate::genome::Genome;

/// The master configuration struct.
/// Can be deserialized from a file to fully reproduce a simulation setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub run: RunConfiguration,
    #[serde(default)]
    pub mutation: MutationModel,
}

impl Configuration {
    pub fn new(run: RunConfiguration, mutation: MutationModel) -> Self {
        Self { run, mutation }
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Validated, immutable parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RunConfigurationRepr")]
pub struct RunConfiguration {
    mutation_rate: f64,
    population_size: usize,
    generations: usize,
    genome_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ancestral_genome: Option<Genome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_workers: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brood_size: Option<usize>,
}

#[derive(Deserialize)]
struct RunConfigurationRepr {
    mutation_rate: f64,
    population_size: usize,
    generations: usize,
    genome_length: usize,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    ancestral_genome: Option<Genome>,
    #[serde(default)]
    num_workers: Option<usize>,
    #[serde(default)]
    brood_size: Option<usize>,
}

impl TryFrom<RunConfigurationRepr> for RunConfiguration {
    type Error = ConfigurationError;

    fn try_from(r: RunConfigurationRepr) -> Result<Self, Self::Error> {
        let config = Self {
            mutation_rate: r.mutation_rate,
            population_size: r.population_size,
            generations: r.generations,
            genome_length: r.genome_length,
            seed: r.seed,
            ancestral_genome: r.ancestral_genome,
            num_workers: r.num_workers,
            brood_size: r.brood_size,
        };
        config.validate()?;
        Ok(config)
    }
}

impl RunConfiguration {
    /// Start building a configuration.
    pub fn builder() -> RunConfigurationBuilder {
        RunConfigurationBuilder::new()
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigurationError::InvalidMutationRate(self.mutation_rate));
        }
        if self.population_size == 0 {
            return Err(ConfigurationError::EmptyPopulation);
        }
        if self.generations == 0 {
            return Err(ConfigurationError::NoGenerations);
        }
        if self.genome_length == 0 {
            return Err(ConfigurationError::EmptyGenome);
        }
        if let Some(ancestor) = &self.ancestral_genome {
            if ancestor.len() != self.genome_length {
                return Err(ConfigurationError::AncestralLengthMismatch {
                    expected: self.genome_length,
                    actual: ancestor.len(),
                });
            }
        }
        if self.num_workers == Some(0) {
            return Err(ConfigurationError::NoWorkers);
        }
        if let Some(brood_size) = self.brood_size {
            if brood_size < self.population_size {
                return Err(ConfigurationError::BroodTooSmall {
                    brood_size,
                    population_size: self.population_size,
                });
            }
        }
        Ok(())
    }

    /// Per-site mutation probability per generation.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn genome_length(&self) -> usize {
        self.genome_length
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn ancestral_genome(&self) -> Option<&Genome> {
        self.ancestral_genome.as_ref()
    }

    /// Size of the worker pool; `None` means the global rayon pool.
    pub fn num_workers(&self) -> Option<usize> {
        self.num_workers
    }

    /// Size the population grows to by reproduction before selection, if any.
    pub fn brood_size(&self) -> Option<usize> {
        self.brood_size
    }

    /// Copy of this configuration with a different seed.
    pub fn with_seed(&self, seed: Option<u64>) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    /// Copy of this configuration with a different worker count.
    pub fn with_workers(&self, num_workers: Option<usize>) -> Result<Self, ConfigurationError> {
        let config = Self {
            num_workers,
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }
}

/// Builder for [`RunConfiguration`].
///
/// # Examples
///
/// ```
/// use genex_sim::simulation::RunConfiguration;
///
/// let config = RunConfiguration::builder()
///     .population_size(20)
///     .generations(5)
///     .genome_length(100)
///     .mutation_rate(0.01)
///     .seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(config.population_size(), 20);
///
/// let err = RunConfiguration::builder()
///     .population_size(0)
///     .generations(5)
///     .genome_length(100)
///     .build();
/// assert!(err.is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunConfigurationBuilder {
    // Required parameters
    population_size: Option<usize>,
    generations: Option<usize>,
    genome_length: Option<usize>,

    mutation_rate: f64,               // Default: 0.0 (no mutation)
    seed: Option<u64>,                // Default: None (random)
    ancestral_genome: Option<Genome>, // Default: None (random genomes)
    num_workers: Option<usize>,       // Default: None (global pool)
    brood_size: Option<usize>,        // Default: None (no reproduction)
}

impl RunConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the population size (required).
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }

    /// Set the number of generations to run (required).
    pub fn generations(mut self, generations: usize) -> Self {
        self.generations = Some(generations);
        self
    }

    /// Set the genome length (required).
    pub fn genome_length(mut self, len: usize) -> Self {
        self.genome_length = Some(len);
        self
    }

    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start every organism from this genome instead of a random one.
    /// Also sets the genome length.
    pub fn ancestral_genome(mut self, genome: Genome) -> Self {
        self.genome_length.get_or_insert(genome.len());
        self.ancestral_genome = Some(genome);
        self
    }

    pub fn num_workers(mut self, workers: usize) -> Self {
        self.num_workers = Some(workers);
        self
    }

    pub fn brood_size(mut self, size: usize) -> Self {
        self.brood_size = Some(size);
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<RunConfiguration, ConfigurationError> {
        let config = RunConfiguration {
            mutation_rate: self.mutation_rate,
            population_size: self
                .population_size
                .ok_or(ConfigurationError::MissingRequired("population_size"))?,
            generations: self
                .generations
                .ok_or(ConfigurationError::MissingRequired("generations"))?,
            genome_length: self
                .genome_length
                .ok_or(ConfigurationError::MissingRequired("genome_length"))?,
            seed: self.seed,
            ancestral_genome: self.ancestral_genome,
            num_workers: self.num_workers,
            brood_size: self.brood_size,
        };
        config.validate()?;
        Ok(config)
    }
}

use thiserror::Error;

use crate::base::Nucleotide;
use crate::simulation::Status;

/// Error returned when attempting to convert an invalid byte/character into
/// a `Nucleotide`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid nucleotide byte: {} ('{}')", .0, char::from(*.0))]
pub struct InvalidNucleotide(pub u8);

/// Error type for failures when parsing a `Genome`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGenome {
    /// A character was not recognized as a valid nucleotide.
    #[error("Invalid character in genome at position {position}: '{found}'")]
    InvalidChar { position: usize, found: char },

    /// The genome was empty when a non-empty genome was required.
    #[error("Empty genome not allowed")]
    Empty,
}

/// Invalid run parameters.
///
/// Always raised before any generation executes, so a caller can correct the
/// configuration and resubmit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Missing required parameter: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid mutation rate: {0} (must be between 0.0 and 1.0)")]
    InvalidMutationRate(f64),

    #[error("Population size must be greater than zero")]
    EmptyPopulation,

    #[error("Number of generations must be greater than zero")]
    NoGenerations,

    #[error("Genome length must be greater than zero")]
    EmptyGenome,

    #[error("Ancestral genome has length {actual}, configured genome length is {expected}")]
    AncestralLengthMismatch { expected: usize, actual: usize },

    #[error("Worker count must be greater than zero")]
    NoWorkers,

    #[error("Brood size {brood_size} is smaller than population size {population_size}")]
    BroodTooSmall {
        brood_size: usize,
        population_size: usize,
    },

    #[error("Invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("{name} weights sum to {sum}, expected 1.0")]
    WeightsDoNotSumToOne { name: &'static str, sum: f64 },

    #[error("Invalid genome: {0}")]
    Genome(#[from] InvalidGenome),

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// An internal structural contract was broken. Fatal to the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("Population holds {actual} organisms, expected {expected}")]
    PopulationSize { expected: usize, actual: usize },

    #[error("Mutation site {site} is outside a genome of length {len}")]
    SiteOutOfRange { site: usize, len: usize },

    #[error("Reference mismatch at site {site}: event expects {expected}, genome holds {found}")]
    ReferenceMismatch {
        site: usize,
        expected: Nucleotide,
        found: Nucleotide,
    },

    #[error("Cannot reproduce from an empty population")]
    EmptyPopulation,
}

/// Errors surfaced by the simulation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// `last_good_generation` is the last generation whose snapshot made it
    /// into the history, or `None` if the failure hit generation 0.
    #[error("Invariant violated (last good generation: {last_good_generation:?}): {violation}")]
    Invariant {
        #[source]
        violation: InvariantViolation,
        last_good_generation: Option<usize>,
    },

    #[error("Simulation is {0} and cannot advance")]
    NotRunning(Status),
}

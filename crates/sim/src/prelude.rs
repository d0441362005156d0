//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use genex_sim::prelude::*;
//!
//! let run = RunConfiguration::builder()
//!     .population_size(20)
//!     .generations(5)
//!     .genome_length(100)
//!     .mutation_rate(0.01)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let outcome = Simulation::new(Configuration::new(run, MutationModel::default()))
//!     .unwrap()
//!     .run();
//! assert_eq!(outcome.status, Status::Completed);
//! assert_eq!(outcome.history.len(), 5);
//! ```

pub use crate::base::fitness::{self, FitnessScore};
pub use crate::base::Nucleotide;
pub use crate::errors::{ConfigurationError, InvariantViolation, SimulationError};
pub use crate::evolution::{EffectMixture, KindWeights, MutationEvent, MutationKind, MutationModel};
pub use crate::genome::{Genome, Organism, OrganismId};
pub use crate::simulation::{
    CancellationToken, Configuration, GenerationSummary, Population, RunConfiguration,
    RunOutcome, Simulation, SimulationState, Status,
};

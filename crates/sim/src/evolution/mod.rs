//! Evolutionary operators: mutation and selection.
//!
//! - **Mutation**: per-site Bernoulli events with a kind and a fitness effect
//! - **Selection**: truncation ranking and fitness-proportional sampling

pub mod mutation;
pub mod selection;

pub use mutation::{EffectMixture, Impact, KindWeights, MutationEvent, MutationKind, MutationModel};

//! Genome and organism value types.

mod organism;
mod sequence;

pub use organism::{Organism, OrganismId, OrganismMutation};
pub use sequence::Genome;

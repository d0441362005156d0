//! Base types: the nucleotide alphabet and fitness scoring.

pub mod fitness;
mod nucleotide;

pub use fitness::FitnessScore;
pub use nucleotide::Nucleotide;

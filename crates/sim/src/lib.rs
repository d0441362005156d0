//! # Simulation Crate
//!
//! The `sim` crate provides the core logic of a seeded evolutionary
//! simulation. It includes modules for defining genomes and organisms,
//! the evolutionary operators (mutation and selection), the fitness
//! function, and the generation-by-generation simulation engine.

pub mod base;
pub mod errors;
pub mod evolution;
pub mod genome;
pub mod prelude;
pub mod simulation;

pub use base::{FitnessScore, Nucleotide};

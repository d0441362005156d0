//! Simulation engine and population management.
//!
//! This module provides the core simulation loop and population management
//! for evolutionary simulations.
//!
//! - `Simulation`: the engine that runs generations and orchestrates
//!   reproduction, mutation and selection.
//! - `Population`: in-memory container for the organisms of a run.
//! - `RunConfiguration`/`Configuration`: validated run parameters, with a
//!   builder and JSON support.
//! - `runner`: executes a simulation on tokio's blocking pool.

mod configs;
mod control;
mod engine;
mod population;
pub mod runner;
mod state;

pub use configs::{Configuration, RunConfiguration, RunConfigurationBuilder};
pub use control::{CancellationToken, Status};
pub use engine::Simulation;
pub use population::{MutationRound, Population};
pub use runner::{RunHandle, RunnerError};
pub use state::{GenerationSummary, RunOutcome, SimulationState};

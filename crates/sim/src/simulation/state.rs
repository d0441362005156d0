//! Per-generation snapshots and run outcomes.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::SimulationError;
use crate::evolution::MutationEvent;
use crate::genome::OrganismId;
use crate::simulation::Status;

/// Immutable record of one completed generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Zero-based generation index.
    pub generation: usize,
    pub population_size: usize,
    /// Events that occurred during this generation, in organism order.
    /// Includes events of organisms that were later removed by selection.
    pub mutation_events: Vec<Arc<MutationEvent>>,
    /// Fitness of every surviving organism.
    pub fitness_scores: BTreeMap<OrganismId, f64>,
    /// Organisms whose fitness had to be clamped this generation.
    pub clamped_fitness: usize,
    pub timestamp: DateTime<Utc>,
}

/// Condensed view of a [`SimulationState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub generation: usize,
    pub population_size: usize,
    pub mutation_count: usize,
    pub mean_fitness: f64,
    pub min_fitness: f64,
    pub max_fitness: f64,
    pub clamped_fitness: usize,
}

impl SimulationState {
    pub fn mutation_count(&self) -> usize {
        self.mutation_events.len()
    }

    pub fn mean_fitness(&self) -> f64 {
        if self.fitness_scores.is_empty() {
            return 0.0;
        }
        self.fitness_scores.values().sum::<f64>() / self.fitness_scores.len() as f64
    }

    pub fn min_fitness(&self) -> f64 {
        self.fitness_scores
            .values()
            .copied()
            .min_by(f64::total_cmp)
            .unwrap_or(0.0)
    }

    pub fn max_fitness(&self) -> f64 {
        self.fitness_scores
            .values()
            .copied()
            .max_by(f64::total_cmp)
            .unwrap_or(0.0)
    }

    pub fn summary(&self) -> GenerationSummary {
        GenerationSummary {
            generation: self.generation,
            population_size: self.population_size,
            mutation_count: self.mutation_count(),
            mean_fitness: self.mean_fitness(),
            min_fitness: self.min_fitness(),
            max_fitness: self.max_fitness(),
            clamped_fitness: self.clamped_fitness,
        }
    }

    /// Equal in everything except the wall-clock timestamp.
    pub fn same_trajectory(&self, other: &Self) -> bool {
        self.generation == other.generation
            && self.population_size == other.population_size
            && self.mutation_events == other.mutation_events
            && self.fitness_scores == other.fitness_scores
            && self.clamped_fitness == other.clamped_fitness
    }
}

/// Everything a finished run leaves behind.
///
/// `history` is kept on cancellation and failure, holding every generation
/// that completed before the run stopped.
#[derive(Debug)]
pub struct RunOutcome {
    pub status: Status,
    /// Seed the run RNG was built from; replaying it reproduces the run.
    pub seed: u64,
    pub history: Vec<SimulationState>,
    pub error: Option<SimulationError>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.status == Status::Completed
    }

    pub fn final_state(&self) -> Option<&SimulationState> {
        self.history.last()
    }

    pub fn summaries(&self) -> Vec<GenerationSummary> {
        self.history.iter().map(SimulationState::summary).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Nucleotide;
    use crate::evolution::MutationKind;

    fn state() -> SimulationState {
        let event = Arc::new(MutationEvent {
            site: 3,
            kind: MutationKind::Substitution,
            ref_symbol: Nucleotide::A,
            alt_symbol: Some(Nucleotide::G),
            effect: -0.5,
        });
        SimulationState {
            generation: 2,
            population_size: 3,
            mutation_events: vec![event],
            fitness_scores: [(OrganismId(0), 1.0), (OrganismId(1), 0.5), (OrganismId(4), 0.0)]
                .into_iter()
                .collect(),
            clamped_fitness: 1,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_state_views() {
        let s = state();
        assert_eq!(s.mutation_count(), 1);
        assert_eq!(s.mean_fitness(), 0.5);
        assert_eq!(s.min_fitness(), 0.0);
        assert_eq!(s.max_fitness(), 1.0);

        let summary = s.summary();
        assert_eq!(summary.generation, 2);
        assert_eq!(summary.population_size, 3);
        assert_eq!(summary.clamped_fitness, 1);
    }

    #[test]
    fn test_same_trajectory_ignores_timestamp() {
        let a = state();
        let mut b = a.clone();
        b.timestamp = a.timestamp + chrono::Duration::seconds(5);
        assert!(a.same_trajectory(&b));
        assert_ne!(a, b);

        b.fitness_scores.insert(OrganismId(1), 0.6);
        assert!(!a.same_trajectory(&b));
    }

    #[test]
    fn test_state_serializes_ids_as_numbers() {
        let json = serde_json::to_value(state()).unwrap();
        assert_eq!(json["fitness_scores"]["1"], 0.5);
        assert_eq!(json["mutation_events"][0]["kind"], "substitution");
    }
}

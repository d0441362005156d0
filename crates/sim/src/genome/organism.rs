use std::fmt;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::base::{fitness, FitnessScore};
use crate::errors::InvariantViolation;
use crate::evolution::{MutationEvent, MutationModel};
use crate::genome::Genome;

/// Identifier of an organism, unique within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganismId(pub u64);

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "org-{}", self.0)
    }
}

/// Events produced by one mutation round of a single organism.
#[derive(Debug, Clone, Default)]
pub struct OrganismMutation {
    pub events: Vec<Arc<MutationEvent>>,
    /// Whether rescoring after these events needed clamping.
    pub clamped: bool,
}

/// A haploid organism: a genome plus the log of every mutation it carries.
///
/// Fitness is derived from the mutation log and recomputed every time the log
/// changes; there is no way to set it directly.
#[derive(Debug, Clone)]
pub struct Organism {
    id: OrganismId,
    genome: Genome,
    mutation_log: Vec<Arc<MutationEvent>>,
    fitness: FitnessScore,
}

impl Organism {
    /// Create an unmutated organism with baseline fitness.
    pub fn new(id: OrganismId, genome: Genome) -> Self {
        Self {
            id,
            genome,
            mutation_log: Vec::new(),
            fitness: FitnessScore::baseline(),
        }
    }

    #[inline]
    pub fn id(&self) -> OrganismId {
        self.id
    }

    #[inline]
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    #[inline]
    pub fn mutation_log(&self) -> &[Arc<MutationEvent>] {
        &self.mutation_log
    }

    #[inline]
    pub fn fitness(&self) -> f64 {
        self.fitness.value
    }

    #[inline]
    pub fn fitness_score(&self) -> FitnessScore {
        self.fitness
    }

    /// Run one mutation round: propose events against the current genome,
    /// apply them, append them to the log and rescore.
    pub fn mutate<R: Rng + ?Sized>(
        &mut self,
        model: &MutationModel,
        mutation_rate: f64,
        rng: &mut R,
    ) -> Result<OrganismMutation, InvariantViolation> {
        let proposed = model.propose_mutations(&self.genome, mutation_rate, rng);
        if proposed.is_empty() {
            return Ok(OrganismMutation::default());
        }

        MutationModel::apply(&mut self.genome, &proposed)?;

        let events: Vec<Arc<MutationEvent>> = proposed.into_iter().map(Arc::new).collect();
        self.mutation_log.extend(events.iter().cloned());
        self.fitness = fitness::score(&self.mutation_log);

        Ok(OrganismMutation {
            events,
            clamped: self.fitness.clamped,
        })
    }

    /// Copy this organism under a new id. The copy shares the parent's
    /// recorded events.
    pub fn offspring(&self, id: OrganismId) -> Self {
        Self {
            id,
            genome: self.genome.clone(),
            mutation_log: self.mutation_log.clone(),
            fitness: self.fitness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Nucleotide;
    use crate::evolution::{EffectMixture, KindWeights};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_new_organism_has_baseline_fitness() {
        let org = Organism::new(OrganismId(0), Genome::uniform(Nucleotide::A, 10));
        assert_eq!(org.fitness(), 1.0);
        assert!(org.mutation_log().is_empty());
        assert_eq!(org.id().to_string(), "org-0");
    }

    #[test]
    fn test_mutate_keeps_fitness_in_sync_with_log() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let model = MutationModel::default();
        let mut org = Organism::new(OrganismId(1), Genome::random(200, &mut rng));

        for _ in 0..10 {
            org.mutate(&model, 0.05, &mut rng).unwrap();
            let expected = fitness::score(org.mutation_log());
            assert_eq!(org.fitness(), expected.value);
        }
        assert!(!org.mutation_log().is_empty());
    }

    #[test]
    fn test_mutate_returns_new_events_only() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let model = MutationModel::new(KindWeights::substitutions_only(), EffectMixture::neutral());
        let mut org = Organism::new(OrganismId(1), Genome::uniform(Nucleotide::G, 20));

        let first = org.mutate(&model, 1.0, &mut rng).unwrap();
        assert_eq!(first.events.len(), 20);
        let second = org.mutate(&model, 1.0, &mut rng).unwrap();
        assert_eq!(second.events.len(), 20);
        assert_eq!(org.mutation_log().len(), 40);
        assert!(Arc::ptr_eq(&org.mutation_log()[20], &second.events[0]));
        assert_eq!(org.fitness(), 1.0);
    }

    #[test]
    fn test_offspring_copies_log() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(8);
        let model = MutationModel::default();
        let mut parent = Organism::new(OrganismId(1), Genome::random(100, &mut rng));
        parent.mutate(&model, 0.1, &mut rng).unwrap();

        let child = parent.offspring(OrganismId(2));
        assert_eq!(child.id(), OrganismId(2));
        assert_eq!(child.genome(), parent.genome());
        assert_eq!(child.mutation_log().len(), parent.mutation_log().len());
        assert_eq!(child.fitness(), parent.fitness());
    }
}

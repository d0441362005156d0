//! Population management and operations.
//!
//! This module provides the container for the organisms of a run and the
//! per-generation operations on it: mutation, truncation selection and
//! fitness-proportional reproduction.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

use crate::errors::InvariantViolation;
use crate::evolution::{selection, MutationEvent, MutationModel};
use crate::genome::{Genome, Organism, OrganismId, OrganismMutation};
use crate::simulation::RunConfiguration;

/// Outcome of mutating every organism once.
#[derive(Debug, Clone, Default)]
pub struct MutationRound {
    /// New events, in organism order and then in per-organism order.
    pub events: Vec<Arc<MutationEvent>>,
    /// Number of organisms whose rescoring needed clamping.
    pub clamped: usize,
}

/// A population of haploid organisms.
#[derive(Debug, Clone)]
pub struct Population {
    /// The organisms in this population
    organisms: Vec<Organism>,
    /// Size the population holds between steps
    target_size: usize,
    /// Next unused organism id
    next_id: u64,
}

impl Population {
    /// Create a population from existing organisms.
    ///
    /// Fails if the number of organisms does not match `target_size`.
    pub fn new(target_size: usize, organisms: Vec<Organism>) -> Result<Self, InvariantViolation> {
        if organisms.len() != target_size {
            return Err(InvariantViolation::PopulationSize {
                expected: target_size,
                actual: organisms.len(),
            });
        }
        let next_id = organisms
            .iter()
            .map(|org| org.id().0 + 1)
            .max()
            .unwrap_or(0);
        Ok(Self {
            organisms,
            target_size,
            next_id,
        })
    }

    /// Create the initial population for a run.
    ///
    /// Every organism starts from the ancestral genome when the configuration
    /// has one, otherwise each gets its own random genome drawn from `rng` in
    /// organism order.
    pub fn seeded<R: Rng + ?Sized>(config: &RunConfiguration, rng: &mut R) -> Self {
        let size = config.population_size();
        let organisms = (0..size)
            .map(|i| {
                let genome = match config.ancestral_genome() {
                    Some(ancestor) => ancestor.clone(),
                    None => Genome::random(config.genome_length(), rng),
                };
                Organism::new(OrganismId(i as u64), genome)
            })
            .collect();
        Self {
            organisms,
            target_size: size,
            next_id: size as u64,
        }
    }

    /// Get the number of organisms in the population.
    #[inline]
    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    /// Size the population is kept at between steps.
    #[inline]
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Get all organisms as a slice.
    pub fn organisms(&self) -> &[Organism] {
        &self.organisms
    }

    /// Get a specific organism by index.
    pub fn get(&self, index: usize) -> Option<&Organism> {
        self.organisms.get(index)
    }

    /// Mean fitness, or `0.0` for an empty population.
    pub fn mean_fitness(&self) -> f64 {
        if self.organisms.is_empty() {
            return 0.0;
        }
        self.organisms.iter().map(Organism::fitness).sum::<f64>() / self.organisms.len() as f64
    }

    /// Fitness of every organism keyed by id.
    pub fn fitness_by_id(&self) -> BTreeMap<OrganismId, f64> {
        self.organisms
            .iter()
            .map(|org| (org.id(), org.fitness()))
            .collect()
    }

    /// Mutate every organism once, in parallel.
    ///
    /// One sub-seed per organism is drawn from `rng` in organism order before
    /// the parallel section, so the outcome does not depend on how many
    /// threads the surrounding pool has.
    pub fn mutate<R: Rng + ?Sized>(
        &mut self,
        model: &MutationModel,
        mutation_rate: f64,
        rng: &mut R,
    ) -> Result<MutationRound, InvariantViolation> {
        let seeds: Vec<u64> = (0..self.organisms.len()).map(|_| rng.random()).collect();

        let results: Vec<OrganismMutation> = self
            .organisms
            .par_iter_mut()
            .zip(seeds.into_par_iter())
            .map(|(org, seed)| {
                let mut local_rng = Xoshiro256PlusPlus::seed_from_u64(seed);
                org.mutate(model, mutation_rate, &mut local_rng)
            })
            .collect::<Result<_, _>>()?;

        let mut round = MutationRound::default();
        for result in results {
            if result.clamped {
                round.clamped += 1;
            }
            round.events.extend(result.events);
        }
        Ok(round)
    }

    /// Keep the `target` fittest organisms.
    ///
    /// Ties keep their current relative order. The survivors are ordered from
    /// fittest to least fit.
    pub fn select(&mut self, target: usize) -> Result<(), InvariantViolation> {
        if self.organisms.len() < target {
            return Err(InvariantViolation::PopulationSize {
                expected: target,
                actual: self.organisms.len(),
            });
        }

        let fitness: Vec<f64> = self.organisms.iter().map(Organism::fitness).collect();
        let order = selection::rank_descending(&fitness);

        let mut slots: Vec<Option<Organism>> =
            std::mem::take(&mut self.organisms).into_iter().map(Some).collect();
        self.organisms = order
            .into_iter()
            .take(target)
            .filter_map(|idx| slots[idx].take())
            .collect();
        self.target_size = target;
        Ok(())
    }

    /// Grow the population to `n` organisms by copying parents chosen with
    /// probability proportional to fitness.
    ///
    /// Offspring get fresh ids and a copy of the parent's mutation log.
    /// Does nothing when the population already holds `n` or more.
    pub fn reproduce_to<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        rng: &mut R,
    ) -> Result<(), InvariantViolation> {
        if self.organisms.is_empty() {
            return Err(InvariantViolation::EmptyPopulation);
        }
        let missing = n.saturating_sub(self.organisms.len());
        if missing == 0 {
            return Ok(());
        }

        let fitness: Vec<f64> = self.organisms.iter().map(Organism::fitness).collect();
        let parents = selection::sample_proportional(&fitness, missing, rng);

        self.organisms.reserve(missing);
        for parent in parents {
            let id = OrganismId(self.next_id);
            self.next_id += 1;
            let child = self.organisms[parent].offspring(id);
            self.organisms.push(child);
        }
        Ok(())
    }

    /// Check the population holds exactly its target size.
    pub fn check_size(&self) -> Result<(), InvariantViolation> {
        if self.organisms.len() != self.target_size {
            return Err(InvariantViolation::PopulationSize {
                expected: self.target_size,
                actual: self.organisms.len(),
            });
        }
        Ok(())
    }
}

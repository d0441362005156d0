//! Simulation engine for evolutionary processes.
//!
//! This module provides the main simulation loop. Each generation runs, in
//! order: optional reproduction up to the brood size, parallel mutation of
//! every organism, truncation selection back to the population size, and a
//! snapshot appended to the history.

use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use crate::errors::{ConfigurationError, InvariantViolation, SimulationError};
use crate::simulation::{
    CancellationToken, Configuration, Population, RunOutcome, SimulationState, Status,
};

/// Main simulation engine.
#[derive(Debug)]
pub struct Simulation {
    /// Run and mutation parameters
    config: Configuration,
    /// Seed the run RNG was built from
    seed: u64,
    /// Random number generator (using Xoshiro256++ for better performance)
    rng: Xoshiro256PlusPlus,
    /// Dedicated worker pool, or `None` to use rayon's global pool
    pool: Option<ThreadPool>,
    /// Current population, created by `start`
    population: Option<Population>,
    status: Status,
    history: Vec<SimulationState>,
    token: CancellationToken,
    error: Option<SimulationError>,
}

impl Simulation {
    /// Create an idle simulation.
    ///
    /// Builds the worker pool when the configuration asks for a fixed number
    /// of workers. A run without a seed draws one from the thread RNG; it is
    /// available through [`Simulation::seed`] so the run can be replayed.
    pub fn new(config: Configuration) -> Result<Self, SimulationError> {
        let pool = match config.run.num_workers() {
            Some(workers) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .build()
                    .map_err(|e| ConfigurationError::WorkerPool(e.to_string()))?,
            ),
            None => None,
        };

        let seed = config.run.seed().unwrap_or_else(|| rand::rng().random());

        Ok(Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            seed,
            pool,
            population: None,
            status: Status::Idle,
            history: Vec::with_capacity(config.run.generations()),
            token: CancellationToken::new(),
            error: None,
            config,
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Snapshots of every completed generation, oldest first.
    pub fn history(&self) -> &[SimulationState] {
        &self.history
    }

    /// Current population; `None` before the run has started.
    pub fn population(&self) -> Option<&Population> {
        self.population.as_ref()
    }

    /// A handle that can cancel this run from another thread.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Seed the initial population and move from `Idle` to `Running`.
    pub fn start(&mut self) -> Result<(), SimulationError> {
        if self.status != Status::Idle {
            return Err(SimulationError::NotRunning(self.status));
        }
        self.initialize();
        Ok(())
    }

    fn initialize(&mut self) {
        let run = &self.config.run;
        info!(
            seed = self.seed,
            population_size = run.population_size(),
            generations = run.generations(),
            genome_length = run.genome_length(),
            mutation_rate = run.mutation_rate(),
            "simulation started"
        );
        self.population = Some(Population::seeded(run, &mut self.rng));
        self.status = Status::Running;
    }

    /// Run one generation and return its snapshot.
    ///
    /// Starts the run when it is still idle. After the last configured
    /// generation the run is `Completed`; otherwise a pending cancellation
    /// request moves it to `Cancelled`.
    ///
    /// # Errors
    /// `NotRunning` when the run has already finished, `Invariant` when a
    /// structural check fails (the run is then `Failed`).
    pub fn step(&mut self) -> Result<&SimulationState, SimulationError> {
        match self.status {
            Status::Idle => self.initialize(),
            Status::Running => {}
            other => return Err(SimulationError::NotRunning(other)),
        }

        let state = match self.advance() {
            Ok(state) => state,
            Err(violation) => {
                let err = SimulationError::Invariant {
                    violation,
                    last_good_generation: self.history.last().map(|s| s.generation),
                };
                warn!(error = %err, "simulation failed");
                self.status = Status::Failed;
                self.error = Some(err.clone());
                return Err(err);
            }
        };

        debug!(
            generation = state.generation,
            mutations = state.mutation_count(),
            mean_fitness = state.mean_fitness(),
            clamped = state.clamped_fitness,
            "generation complete"
        );
        self.history.push(state);

        if self.history.len() >= self.config.run.generations() {
            self.status = Status::Completed;
            info!(generations = self.history.len(), "simulation completed");
        } else if self.token.is_cancelled() {
            self.cancel_now();
        }

        self.history.last().ok_or(SimulationError::NotRunning(self.status))
    }

    fn advance(&mut self) -> Result<SimulationState, InvariantViolation> {
        let Self {
            config,
            rng,
            pool,
            population,
            history,
            ..
        } = self;
        let population = population
            .as_mut()
            .ok_or(InvariantViolation::EmptyPopulation)?;
        let rate = config.run.mutation_rate();
        let model = &config.mutation;

        if let Some(brood_size) = config.run.brood_size() {
            population.reproduce_to(brood_size, rng)?;
        }

        let round = match pool {
            Some(pool) => pool.install(|| population.mutate(model, rate, rng))?,
            None => population.mutate(model, rate, rng)?,
        };

        population.select(config.run.population_size())?;
        population.check_size()?;

        Ok(SimulationState {
            generation: history.len(),
            population_size: population.len(),
            mutation_events: round.events,
            fitness_scores: population.fitness_by_id(),
            clamped_fitness: round.clamped,
            timestamp: Utc::now(),
        })
    }

    fn cancel_now(&mut self) {
        self.status = Status::Cancelled;
        warn!(
            generations = self.history.len(),
            "simulation cancelled"
        );
    }

    /// Drive the run to a terminal state.
    pub fn run(self) -> RunOutcome {
        self.run_with(|_| {})
    }

    /// Drive the run to a terminal state, handing each snapshot to
    /// `observer` as soon as it is appended.
    ///
    /// The cancellation token is checked before every generation, so a
    /// request made from `observer` after generation `k` leaves `k + 1`
    /// snapshots.
    pub fn run_with<F>(mut self, mut observer: F) -> RunOutcome
    where
        F: FnMut(&SimulationState),
    {
        if self.status == Status::Idle {
            self.initialize();
        }

        while self.status == Status::Running {
            if self.token.is_cancelled() {
                self.cancel_now();
                break;
            }
            match self.step() {
                Ok(state) => observer(state),
                Err(_) => break,
            }
        }
        self.into_outcome()
    }

    /// Consume the engine, keeping its status, seed, history and error.
    pub fn into_outcome(self) -> RunOutcome {
        RunOutcome {
            status: self.status,
            seed: self.seed,
            history: self.history,
            error: self.error,
        }
    }
}

//! Background execution of a [`Simulation`] for async hosts.
//!
//! The engine is CPU-bound, so it runs on tokio's blocking pool and streams
//! each snapshot back over an unbounded channel while the caller's runtime
//! stays responsive.

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::simulation::{CancellationToken, RunOutcome, Simulation, SimulationState};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Simulation task panicked or was aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Handle to a simulation running in the background.
#[derive(Debug)]
pub struct RunHandle {
    /// Snapshots in generation order. Closes when the run ends.
    pub updates: mpsc::UnboundedReceiver<SimulationState>,
    token: CancellationToken,
    task: JoinHandle<RunOutcome>,
}

impl RunHandle {
    /// Ask the run to stop after the generation in progress.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Wait for the run to end and return its outcome.
    ///
    /// Snapshots not yet taken from `updates` are dropped.
    pub async fn finish(self) -> Result<RunOutcome, RunnerError> {
        Ok(self.task.await?)
    }
}

/// Move `simulation` onto the blocking pool and start it.
///
/// Must be called from within a tokio runtime.
pub fn spawn(simulation: Simulation) -> RunHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let token = simulation.cancellation_token();

    let task = tokio::task::spawn_blocking(move || {
        simulation.run_with(|state| {
            // A dropped receiver only means nobody is listening.
            let _ = tx.send(state.clone());
        })
    });

    RunHandle {
        updates: rx,
        token,
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::MutationModel;
    use crate::simulation::{Configuration, RunConfiguration, Status};

    fn simulation(generations: usize) -> Simulation {
        let run = RunConfiguration::builder()
            .population_size(6)
            .generations(generations)
            .genome_length(40)
            .mutation_rate(0.02)
            .seed(17)
            .build()
            .unwrap();
        Simulation::new(Configuration::new(run, MutationModel::default())).unwrap()
    }

    #[tokio::test]
    async fn test_updates_stream_in_order() {
        let mut handle = spawn(simulation(5));
        let mut generations = Vec::new();
        while let Some(state) = handle.updates.recv().await {
            generations.push(state.generation);
        }
        let outcome = handle.finish().await.unwrap();
        assert_eq!(outcome.status, Status::Completed);
        assert_eq!(generations, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_cancel_through_handle() {
        let sim = simulation(100_000);
        let mut handle = spawn(sim);
        let first = handle.updates.recv().await.unwrap();
        assert_eq!(first.generation, 0);
        handle.cancel();

        let outcome = handle.finish().await.unwrap();
        assert_eq!(outcome.status, Status::Cancelled);
        assert!(!outcome.history.is_empty());
        assert!(outcome.history.len() < 100_000);
    }
}

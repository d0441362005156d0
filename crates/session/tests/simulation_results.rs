//! Storing simulation parameters and results in a session.

use genex_session::{keys, Session};
use genex_sim::evolution::MutationModel;
use genex_sim::simulation::{Configuration, GenerationSummary, RunConfiguration, Simulation};

#[test]
fn test_store_and_read_back_run() {
    let run = RunConfiguration::builder()
        .mutation_rate(0.01)
        .population_size(20)
        .generations(5)
        .genome_length(100)
        .seed(42)
        .build()
        .unwrap();
    let outcome = Simulation::new(Configuration::new(run.clone(), MutationModel::default()))
        .unwrap()
        .run();

    let mut session = Session::new();
    session.set(keys::SIMULATION_PARAMS, &run).unwrap();
    session
        .set(keys::SIMULATION_RESULTS, outcome.summaries())
        .unwrap();

    let params: RunConfiguration = session
        .get(keys::SIMULATION_PARAMS, run.with_seed(None))
        .unwrap();
    assert_eq!(params, run);

    let summaries: Vec<GenerationSummary> = session.get(keys::SIMULATION_RESULTS, vec![]).unwrap();
    assert_eq!(summaries.len(), 5);
    for (stored, original) in summaries.iter().zip(outcome.summaries()) {
        assert_eq!(stored.generation, original.generation);
        assert_eq!(stored.population_size, 20);
        assert_eq!(stored.mutation_count, original.mutation_count);
        assert!((stored.mean_fitness - original.mean_fitness).abs() < 1e-12);
    }
}

#[test]
fn test_sessions_are_independent() {
    let mut first = Session::new();
    let second = Session::new();
    first.set(keys::THEME, "dark").unwrap();
    first.clear(None);

    assert_eq!(first.len(), 1);
    assert_eq!(second.get(keys::THEME, String::new()).unwrap(), "light");
    assert!(second.contains(keys::SIMULATION_PARAMS));
}

#[test]
fn test_session_roundtrips_through_json() {
    let mut session = Session::new();
    session.set(keys::CURRENT_GENOME, "ACGT").unwrap();
    let json = serde_json::to_string(&session).unwrap();
    let back: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(back, session);
}

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn genex() -> Command {
    Command::cargo_bin("genex").unwrap()
}

#[test]
fn test_init_writes_configuration() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("sim.json");

    genex()
        .arg("init")
        .arg("--output")
        .arg(&path)
        .arg("--population-size")
        .arg("12")
        .arg("--seed")
        .arg("9")
        .assert()
        .success()
        .stdout(predicate::str::contains("Population Size: 12"))
        .stdout(predicate::str::contains("Configuration written to"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["run"]["population_size"], 12);
    assert_eq!(json["run"]["generations"], 10);
    assert_eq!(json["run"]["seed"], 9);
    assert_eq!(json["mutation"]["kinds"]["substitution"], 0.9);
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("sim.json");
    std::fs::write(&path, "{}").unwrap();

    genex()
        .arg("init")
        .arg("--output")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    genex()
        .arg("init")
        .arg("--output")
        .arg(&path)
        .arg("--force")
        .assert()
        .success();
}

#[test]
fn test_validate_accepts_initialized_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("sim.json");

    genex().arg("init").arg("-o").arg(&path).assert().success();
    genex()
        .arg("validate")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_validate_rejects_bad_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"run": {"mutation_rate": 2.0, "population_size": 5, "generations": 3, "genome_length": 10}}"#,
    )
    .unwrap();

    genex()
        .arg("validate")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid mutation rate"));
}

#[test]
fn test_run_json_history() {
    let output = genex()
        .args([
            "run",
            "--population-size",
            "20",
            "--generations",
            "5",
            "--genome-length",
            "100",
            "--mutation-rate",
            "0.01",
            "--seed",
            "42",
            "--format",
            "json",
            "--no-progress",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let history: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let states = history.as_array().unwrap();
    assert_eq!(states.len(), 5);
    for (i, state) in states.iter().enumerate() {
        assert_eq!(state["generation"], i);
        assert_eq!(state["population_size"], 20);
        assert_eq!(state["fitness_scores"].as_object().unwrap().len(), 20);
    }
}

#[test]
fn test_run_table_from_config_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("sim.json");
    let session = temp.path().join("session.json");

    genex()
        .args(["init", "-n", "8", "-g", "3", "-l", "40", "-s", "1", "-o"])
        .arg(&path)
        .assert()
        .success();

    genex()
        .arg("run")
        .arg("--config")
        .arg(&path)
        .arg("--no-progress")
        .arg("--session-out")
        .arg(&session)
        .assert()
        .success()
        .stdout(predicate::str::contains("Simulation completed after 3 generation(s)"))
        .stdout(predicate::str::contains("Seed: 1"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&session).unwrap()).unwrap();
    assert_eq!(saved["theme"], "light");
    assert_eq!(saved["simulation_params"]["population_size"], 8);
    assert_eq!(saved["simulation_results"].as_array().unwrap().len(), 3);
}

#[test]
fn test_run_rejects_empty_population() {
    genex()
        .args(["run", "--population-size", "0", "--no-progress"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Population size must be greater than zero",
        ));
}

#[test]
fn test_run_same_seed_same_output() {
    let run = || {
        genex()
            .args([
                "run", "-n", "10", "-g", "4", "-l", "60", "-m", "0.02", "-s", "7", "-f", "json",
                "--no-progress",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    let strip = |bytes: Vec<u8>| {
        let mut value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        for state in value.as_array_mut().unwrap() {
            state.as_object_mut().unwrap().remove("timestamp");
        }
        value
    };
    assert_eq!(strip(run()), strip(run()));
}

#[test]
fn test_threads_flag() {
    genex()
        .args([
            "-t", "2", "run", "-n", "5", "-g", "2", "-l", "20", "-s", "3", "--no-progress",
        ])
        .assert()
        .success();
}

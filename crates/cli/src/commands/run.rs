use anyhow::{Context, Result};
use genex_session::{keys, Session};
use genex_sim::simulation::{runner, RunOutcome, Simulation, Status};
use indicatif::{ProgressBar, ProgressStyle};

use crate::args::{OutputFormat, RunArgs};
use crate::commands::{build_configuration, load_configuration};
use crate::printing::{print_parameters, print_summary_table};

pub fn run_simulation(args: &RunArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => Some(load_configuration(path)?),
        None => None,
    };
    let config = build_configuration(&args.params, base)?;
    let table = args.format == OutputFormat::Table;

    if table {
        println!("🧬 Genex - Running Simulation");
        println!("============================================");
        print_parameters(&config);
        println!("Running {} generations...", config.run.generations());
    }

    let mut session = Session::new();
    session
        .set(keys::SIMULATION_PARAMS, &config.run)
        .context("Failed to store parameters in session")?;

    let total = config.run.generations();
    let sim = Simulation::new(config).context("Failed to initialize simulation")?;

    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let outcome = rt.block_on(drive(sim, total, !args.no_progress))?;

    session
        .set(keys::SIMULATION_RESULTS, outcome.summaries())
        .context("Failed to store results in session")?;

    match args.format {
        OutputFormat::Table => print_summary_table(&outcome),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome.history)
                .context("Failed to serialize history")?;
            println!("{json}");
        }
    }

    if let Some(path) = &args.session_out {
        let json = serde_json::to_string_pretty(&session).context("Failed to serialize session")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write session to {}", path.display()))?;
        if table {
            println!("  Session saved to {}", path.display());
        }
    }

    match outcome.error {
        Some(err) => Err(err).context("Simulation failed"),
        None => Ok(()),
    }
}

/// Run the simulation in the background, feeding the progress bar and
/// turning Ctrl-C into a cancellation request.
async fn drive(sim: Simulation, total: usize, show_progress: bool) -> Result<RunOutcome> {
    let mut handle = runner::spawn(sim);
    let token = handle.cancellation_token();

    let pb = if show_progress {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut cancelled = false;

    loop {
        tokio::select! {
            update = handle.updates.recv() => match update {
                Some(state) => {
                    if let Some(pb) = &pb {
                        pb.set_message(format!("mean fitness {:.4}", state.mean_fitness()));
                        pb.inc(1);
                    }
                }
                None => break,
            },
            _ = &mut ctrl_c, if !cancelled => {
                cancelled = true;
                token.cancel();
                match &pb {
                    Some(pb) => pb.println("Cancelling after the current generation..."),
                    None => eprintln!("Cancelling after the current generation..."),
                }
            }
        }
    }

    let outcome = handle.finish().await.context("Simulation task failed")?;

    if let Some(pb) = pb {
        match outcome.status {
            Status::Completed => pb.finish_with_message("Done"),
            status => pb.abandon_with_message(status.to_string()),
        }
    }
    Ok(outcome)
}

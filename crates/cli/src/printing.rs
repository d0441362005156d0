use genex_sim::simulation::{Configuration, RunOutcome, Status};

pub fn print_parameters(config: &Configuration) {
    let run = &config.run;
    let kinds = &config.mutation.kinds;
    let effects = &config.mutation.effects;

    println!("\n📋 Simulation Configuration");
    println!(
        "  • Population Size: {} [-n, --population-size]",
        run.population_size()
    );
    println!("  • Generations: {} [-g, --generations]", run.generations());
    if let Some(seed) = run.seed() {
        println!("  • Random Seed: {seed} [--seed]");
    } else {
        println!("  • Random Seed: Random [--seed]");
    }
    if let Some(brood_size) = run.brood_size() {
        println!("  • Brood Size: {brood_size} [--brood-size]");
    }
    if let Some(workers) = run.num_workers() {
        println!("  • Workers: {workers}");
    }

    println!("\n🧬 Genome");
    println!("  • Genome Length: {} bp [-l, --genome-length]", run.genome_length());
    match run.ancestral_genome() {
        Some(ancestor) if ancestor.len() <= 60 => println!("  • Ancestor: {ancestor}"),
        Some(_) => println!("  • Ancestor: provided"),
        None => println!("  • Ancestor: random per organism"),
    }

    println!("\n⚡ Mutation Parameters");
    println!(
        "  • Mutation Rate: {:.2e} /site/gen [-m, --mutation-rate]",
        run.mutation_rate()
    );
    println!(
        "  • Kinds: substitution {:.2}, insertion {:.2}, deletion {:.2}",
        kinds.substitution(),
        kinds.insertion(),
        kinds.deletion()
    );
    println!(
        "  • Effects: deleterious {:.2} (mean {:.3}), neutral {:.2}, beneficial {:.2} (mean {:.3})",
        effects.p_deleterious(),
        effects.mean_deleterious(),
        effects.p_neutral(),
        effects.p_beneficial(),
        effects.mean_beneficial()
    );
    println!();
}

pub fn print_summary_table(outcome: &RunOutcome) {
    println!(
        "{:>5} {:>6} {:>10} {:>12} {:>10} {:>10} {:>8}",
        "Gen", "Size", "Mutations", "Mean fit.", "Min fit.", "Max fit.", "Clamped"
    );
    println!("{}", "-".repeat(67));
    for summary in outcome.summaries() {
        println!(
            "{:>5} {:>6} {:>10} {:>12.6} {:>10.6} {:>10.6} {:>8}",
            summary.generation,
            summary.population_size,
            summary.mutation_count,
            summary.mean_fitness,
            summary.min_fitness,
            summary.max_fitness,
            summary.clamped_fitness
        );
    }
    println!();
    print_outcome(outcome);
}

pub fn print_outcome(outcome: &RunOutcome) {
    let symbol = match outcome.status {
        Status::Completed => "✓",
        Status::Cancelled => "⚠️ ",
        _ => "✗",
    };
    println!(
        "{symbol} Simulation {} after {} generation(s)",
        outcome.status,
        outcome.history.len()
    );
    println!("  Seed: {} (pass --seed {} to replay)", outcome.seed, outcome.seed);
    if let Some(last) = outcome.final_state() {
        println!("  Final mean fitness: {:.6}", last.mean_fitness());
    }
}

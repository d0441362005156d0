use anyhow::{Context, Result};

use crate::args::InitArgs;
use crate::commands::build_configuration;
use crate::printing::print_parameters;

pub fn init_simulation(args: &InitArgs) -> Result<()> {
    let output = &args.output;

    println!("🧬 Genex - Evolution Simulation Lab");
    println!("============================================\n");

    if output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }

    let config = build_configuration(&args.params, None)?;
    let json = config
        .to_json_pretty()
        .context("Failed to serialize configuration")?;
    std::fs::write(output, json)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    print_parameters(&config);
    println!("✓ Configuration written to {}", output.display());
    println!(
        "\n💡 Use 'genex run --config {}' to run it",
        output.display()
    );
    Ok(())
}

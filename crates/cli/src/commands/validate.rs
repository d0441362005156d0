use anyhow::Result;
use std::path::Path;

use crate::commands::load_configuration;
use crate::printing::print_parameters;

pub fn validate_configuration(path: &Path) -> Result<()> {
    println!("🔍 Validating configuration: {}", path.display());

    let config = load_configuration(path)?;
    print_parameters(&config);

    let expected_effect = config.mutation.effects.expected_effect();
    if expected_effect > 0.0 {
        println!("⚠️  Mean mutation effect is positive ({expected_effect:.4}); fitness will tend to grow");
    }

    println!("✓ Configuration is valid");
    Ok(())
}

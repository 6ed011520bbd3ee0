//! Rates command implementation.

use anyhow::Result;
use console::style;
use radqec_core::ExperimentConfig;

use super::common::{OrbitArgs, print_rates};

/// Execute the rates command.
pub fn execute(mut config: ExperimentConfig, orbit: &OrbitArgs) -> Result<()> {
    orbit.apply(&mut config);
    config.validate()?;

    let profile = config.orbit_profile();
    let rates = config.rate_table().error_rates(&profile)?;

    println!(
        "{} Space radiation for {}",
        style("→").cyan().bold(),
        style(&profile).green()
    );
    print_rates(&rates);
    Ok(())
}

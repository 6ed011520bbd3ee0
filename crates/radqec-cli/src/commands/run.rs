//! Run command implementation.

use std::fs;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use radqec_adapter_sim::SimulatorBackend;
use radqec_core::{Experiment, ExperimentConfig, ExperimentReport};
use radqec_hal::Executor;

use super::common::{
    OrbitArgs, OutputFormat, print_classification, print_outcomes, print_rates,
};

/// Flags of the run command beyond the orbit.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub error_probability: Option<f64>,
    pub shots: Option<u32>,
    pub seed: Option<u64>,
    pub compare_ideal: bool,
    pub format: OutputFormat,
    pub export: Option<String>,
}

/// Execute the run command.
pub async fn execute(
    mut config: ExperimentConfig,
    orbit: &OrbitArgs,
    options: RunOptions,
) -> Result<()> {
    orbit.apply(&mut config);
    if options.error_probability.is_some() {
        config.error_probability = options.error_probability;
    }
    if let Some(shots) = options.shots {
        config.shots = shots;
    }
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    config.validate()?;

    let experiment = Experiment::from_orbit(
        &config.rate_table(),
        config.orbit_profile(),
        config.error_probability,
    )?;
    let backend = SimulatorBackend::new().with_optional_seed(config.seed);

    let table = options.format == OutputFormat::Table;
    if table {
        print_header(&experiment, &backend, config.shots);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!("Simulating {} shots...", config.shots));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let outcome = if options.compare_ideal {
        experiment.run_with_ideal(&backend, config.shots).await
    } else {
        experiment.run(&backend, config.shots).await
    };
    spinner.finish_and_clear();
    let report = outcome?;

    match options.format {
        OutputFormat::Table => print_report(&report),
        OutputFormat::Json => println!("{}", report.to_json_pretty()?),
    }

    if let Some(path) = &options.export {
        fs::write(path, report.to_json_pretty()?)
            .with_context(|| format!("Failed to write report: {path}"))?;
        if table {
            println!(
                "\n{} Report written to {}",
                style("✓").green().bold(),
                style(path).green()
            );
        }
    }

    Ok(())
}

fn print_header(experiment: &Experiment, backend: &SimulatorBackend, shots: u32) {
    match experiment.orbit() {
        Some(orbit) => println!(
            "{} Running [[4,2,2]] syndrome extraction for {} ({} shots)",
            style("→").cyan().bold(),
            style(orbit).green(),
            shots
        ),
        None => println!(
            "{} Running [[4,2,2]] syndrome extraction ({} shots)",
            style("→").cyan().bold(),
            shots
        ),
    }
    if let Some(rates) = experiment.rates() {
        print_rates(rates);
    }
    println!(
        "  Error probability:     {:.4} ({} noise rules, executor {})",
        experiment.error_probability(),
        experiment.noise().len(),
        style(backend.name()).yellow()
    );
}

fn print_report(report: &ExperimentReport) {
    print_classification("Syndrome distribution (post-selected)", &report.classification);
    print_outcomes(&report.outcomes);

    if let Some(ideal) = &report.ideal {
        print_classification("Noiseless comparison", ideal);
        let lost = ideal.post_selection_ratio - report.classification.post_selection_ratio;
        println!("  Ratio lost to noise:  {lost:.4}");
    }

    println!();
    if let Some(time_ms) = report.execution_time_ms {
        println!("  Execution time: {} ms", style(time_ms).yellow());
    }
    if let Some(seed) = report.seed {
        println!("  Seed:           {seed}");
    }
    println!("  Run ID:         {}", style(report.run_id).dim());
}

//! Sweep command implementation.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use radqec_adapter_sim::SimulatorBackend;
use radqec_core::{Experiment, ExperimentConfig, ExperimentReport, OrbitProfile};
use tokio::task::JoinSet;
use tracing::debug;

/// Execute the sweep command.
pub async fn execute(
    mut config: ExperimentConfig,
    duration: Option<f64>,
    shots: Option<u32>,
    seed: Option<u64>,
) -> Result<()> {
    if let Some(duration) = duration {
        config.orbit.mission_duration_years = duration;
    }
    if let Some(shots) = shots {
        config.shots = shots;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate()?;

    let table = config.rate_table();
    let years = config.orbit.mission_duration_years;
    let orbits: Vec<OrbitProfile> = table
        .entries()
        .map(|(altitude, inclination, _)| OrbitProfile::new(altitude, inclination, years))
        .collect();
    if orbits.is_empty() {
        anyhow::bail!("Rate table has no entries");
    }

    println!(
        "{} Sweeping {} orbits, {} year mission ({} shots each)",
        style("→").cyan().bold(),
        orbits.len(),
        years,
        config.shots
    );

    let progress = ProgressBar::new(orbits.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar().template("{spinner:.cyan} [{bar:30.cyan}] {pos}/{len} {msg}")?,
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut tasks = JoinSet::new();
    for (index, orbit) in orbits.into_iter().enumerate() {
        let experiment = Experiment::from_orbit(&table, orbit, config.error_probability)?;
        let backend = SimulatorBackend::new()
            .with_optional_seed(config.seed.map(|s| s.wrapping_add(index as u64)));
        let shots = config.shots;
        tasks.spawn(async move { (index, experiment.run(&backend, shots).await) });
    }

    let mut rows: Vec<(usize, ExperimentReport)> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, outcome) = joined.context("Sweep task panicked")?;
        let report = outcome?;
        debug!("Orbit {index} finished");
        progress.inc(1);
        rows.push((index, report));
    }
    progress.finish_and_clear();
    rows.sort_by_key(|(index, _)| *index);

    print_table(rows.iter().map(|(_, report)| report));
    Ok(())
}

fn print_table<'a>(reports: impl Iterator<Item = &'a ExperimentReport>) {
    println!(
        "\n  {:>8}  {:<6}  {:>8}  {:>8}  {:>9}  {:>8}  {:>8}  {:>8}  {:>8}",
        "Altitude", "Incl.", "p", "Ratio", "Valid", "00", "10", "01", "11"
    );
    for report in reports {
        let (altitude, inclination) = report
            .orbit
            .as_ref()
            .map(|o| (o.altitude_km().to_string(), o.inclination().to_string()))
            .unwrap_or_default();
        let summary = &report.classification;
        let percentages: Vec<&str> = summary
            .error_percentages
            .values()
            .map(String::as_str)
            .collect();
        println!(
            "  {:>8}  {:<6}  {:>8.4}  {:>8.4}  {:>9}  {:>8}  {:>8}  {:>8}  {:>8}",
            format!("{altitude}km"),
            inclination,
            report.error_probability,
            summary.post_selection_ratio,
            summary.valid_shots,
            percentages[0],
            percentages[1],
            percentages[2],
            percentages[3],
        );
    }
}

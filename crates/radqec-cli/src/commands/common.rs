//! Shared helpers for CLI commands.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use console::style;
use radqec_core::{
    ErrorRateProfile, ExperimentConfig, LoggingConfig, OutcomeDistribution,
    SyndromeClassification,
};
use tracing_subscriber::EnvFilter;

/// Rows shown in outcome histograms.
const MAX_HISTOGRAM_ROWS: usize = 16;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Orbit flags shared by `rates` and `run`.
#[derive(Debug, Clone, Default, Args)]
pub struct OrbitArgs {
    /// Orbit altitude in km
    #[arg(short, long)]
    pub altitude: Option<u32>,

    /// Orbit inclination (e.g. SSO, 45)
    #[arg(short, long)]
    pub inclination: Option<String>,

    /// Mission duration in years
    #[arg(short, long)]
    pub duration: Option<f64>,
}

impl OrbitArgs {
    /// Apply the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut ExperimentConfig) {
        if let Some(altitude) = self.altitude {
            config.orbit.altitude_km = altitude;
        }
        if let Some(inclination) = &self.inclination {
            config.orbit.inclination.clone_from(inclination);
        }
        if let Some(duration) = self.duration {
            config.orbit.mission_duration_years = duration;
        }
    }
}

/// Install the global subscriber.
///
/// `-v` flags win; otherwise `RUST_LOG`, then the configured level. Logs go to
/// stderr so JSON reports on stdout stay parseable.
pub fn init_tracing(verbose: u8, logging: &LoggingConfig) -> Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

/// Load a counts file: a JSON object mapping bitstrings to counts.
pub fn load_counts(path: &str) -> Result<OutcomeDistribution> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    parse_counts(&source).with_context(|| format!("Invalid counts file: {path}"))
}

/// Parse and validate counts JSON.
pub fn parse_counts(source: &str) -> Result<OutcomeDistribution> {
    let raw: BTreeMap<String, u64> = serde_json::from_str(source)?;
    Ok(OutcomeDistribution::from_pairs(raw)?)
}

/// Print an error-rate profile.
pub fn print_rates(rates: &ErrorRateProfile) {
    println!(
        "  Overall error rate:    {}",
        style(format!("{:.4}", rates.overall_rate)).yellow()
    );
    println!("  Bit-flip error rate:   {:.4}", rates.bit_flip_rate);
    println!("  Phase-flip error rate: {:.4}", rates.phase_flip_rate);
    if rates.is_saturated() {
        println!("  {}", style("(saturated)").dim());
    }
}

/// Print the post-selection summary.
pub fn print_classification(title: &str, summary: &SyndromeClassification) {
    println!("\n{} {}:", style("✓").green().bold(), title);

    for (label, count) in summary.syndrome_distribution() {
        println!(
            "  {} {:<5} {:>8}  ({:>7})",
            style(label.bits()).cyan(),
            label.description(),
            count,
            summary.formatted_percentage(label)
        );
    }

    println!();
    println!("  Total shots:          {}", summary.total_shots);
    println!("  Valid shots:          {}", summary.valid_shots);
    println!("  Rejected shots:       {}", summary.rejected_shots());
    println!(
        "  Post-selection ratio: {}",
        style(format!("{:.4}", summary.post_selection_ratio)).yellow()
    );
}

/// Print a bar histogram of raw outcomes, most frequent first.
pub fn print_outcomes(outcomes: &OutcomeDistribution) {
    let total = outcomes.total_shots();
    if total == 0 {
        println!("\n  No outcomes recorded");
        return;
    }

    println!("\n  Outcomes (c2 c1):");
    let sorted = outcomes.sorted();
    for (bitstring, count) in sorted.iter().take(MAX_HISTOGRAM_ROWS) {
        let prob = *count as f64 / total as f64 * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {} {}: {:>8} ({:>5.2}%) {}",
            style(&bitstring[..2]).cyan(),
            style(&bitstring[2..]).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > MAX_HISTOGRAM_ROWS {
        println!("  ... and {} more outcomes", sorted.len() - MAX_HISTOGRAM_ROWS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_args_override_only_given_fields() {
        let mut config = ExperimentConfig::default();
        let args = OrbitArgs {
            altitude: Some(800),
            inclination: None,
            duration: Some(4.0),
        };
        args.apply(&mut config);
        assert_eq!(config.orbit.altitude_km, 800);
        assert_eq!(config.orbit.inclination, "SSO");
        assert_eq!(config.orbit.mission_duration_years, 4.0);
    }

    #[test]
    fn test_parse_counts_with_register_spaces() {
        let outcomes = parse_counts(r#"{"00 00": 90, "01 01": 10}"#).unwrap();
        assert_eq!(outcomes.get("0000"), 90);
        assert_eq!(outcomes.get("0101"), 10);
    }

    #[test]
    fn test_parse_counts_rejects_bad_input() {
        assert!(parse_counts(r#"{"000": 1}"#).is_err());
        assert!(parse_counts(r#"{"0000": -1}"#).is_err());
        assert!(parse_counts("[1, 2]").is_err());
    }

    #[test]
    fn test_load_counts_missing_file() {
        let err = load_counts("/nonexistent/counts.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}

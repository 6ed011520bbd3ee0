//! radqec Command-Line Interface
//!
//! Estimates how a [[4,2,2]] code holds up in orbit: derive an error rate from
//! the orbit, simulate two rounds of syndrome extraction under that noise and
//! post-select on rounds that agree.
//!
//! ```text
//! radqec rates --altitude 700 --inclination SSO --duration 2
//! radqec run --altitude 800 --shots 50000 --seed 7 --compare-ideal
//! radqec sweep --duration 1.5
//! radqec analyze --input counts.json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;
use radqec_core::ExperimentConfig;

mod commands;

use commands::common::{OrbitArgs, OutputFormat, init_tracing};
use commands::{analyze, circuit, rates, run, sweep, version};

/// radqec - radiation-aware quantum error correction analysis
#[derive(Parser)]
#[command(name = "radqec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ~/.radqec/config.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the error rates for an orbit
    Rates {
        #[command(flatten)]
        orbit: OrbitArgs,
    },

    /// Simulate syndrome extraction under orbit-derived noise
    Run {
        #[command(flatten)]
        orbit: OrbitArgs,

        /// Override the orbit-derived error probability
        #[arg(short = 'p', long)]
        error_probability: Option<f64>,

        /// Number of shots
        #[arg(short, long)]
        shots: Option<u32>,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Also run noiselessly and report both
        #[arg(long)]
        compare_ideal: bool,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,

        /// Write the JSON report to a file
        #[arg(short, long)]
        export: Option<String>,
    },

    /// Run every orbit in the rate table concurrently
    Sweep {
        /// Mission duration in years
        #[arg(short, long)]
        duration: Option<f64>,

        /// Shots per orbit
        #[arg(short, long)]
        shots: Option<u32>,

        /// RNG seed; each orbit derives its own from it
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Classify a counts file produced elsewhere
    Analyze {
        /// JSON object mapping bitstrings to counts
        #[arg(short, long)]
        input: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the syndrome-extraction circuit
    Circuit,

    /// Show version information
    Version,
}

async fn dispatch(command: Commands, config: ExperimentConfig) -> anyhow::Result<()> {
    match command {
        Commands::Rates { orbit } => rates::execute(config, &orbit),

        Commands::Run {
            orbit,
            error_probability,
            shots,
            seed,
            compare_ideal,
            format,
            export,
        } => {
            let options = run::RunOptions {
                error_probability,
                shots,
                seed,
                compare_ideal,
                format,
                export,
            };
            run::execute(config, &orbit, options).await
        }

        Commands::Sweep {
            duration,
            shots,
            seed,
        } => sweep::execute(config, duration, shots, seed).await,

        Commands::Analyze { input, format } => analyze::execute(&input, format),

        Commands::Circuit => circuit::execute(),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let result = async {
        let config = ExperimentConfig::load(cli.config.as_deref().map(std::path::Path::new))
            .context("Failed to load configuration")?;
        init_tracing(cli.verbose, &config.logging)?;
        dispatch(cli.command, config).await
    }
    .await;

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

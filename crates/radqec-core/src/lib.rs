//! Orbital radiation noise and [[4,2,2]] syndrome post-selection.
//!
//! The pipeline:
//!
//! ```text
//!   OrbitProfile ──→ ErrorRateProfile ──→ NoiseChannelSet
//!                                              │
//!   CircuitTopology ───────────────────────────┴──→ Executor::run
//!                                                        │
//!   ExperimentReport ←── SyndromeClassification ←── OutcomeDistribution
//! ```
//!
//! - [`radiation`]: orbit → physical error rates
//! - [`noise_spec`]: error probability → per-operation noise rules
//! - [`topology`]: the fixed encoding and two-round syndrome circuit
//! - [`syndrome`]: post-selection on round agreement
//! - [`experiment`]: drives one configured run against an executor
//! - [`config`]: YAML / environment configuration
//!
//! # Example
//!
//! ```rust
//! use radqec_core::{OutcomeDistribution, SyndromeLabel, analyze, compute_error_rates};
//!
//! let rates = compute_error_rates(600, "SSO", 1.0).unwrap();
//! assert!((rates.overall_rate - 0.010).abs() < 1e-12);
//!
//! let outcomes = OutcomeDistribution::from_pairs([("0000", 900), ("0101", 100)]).unwrap();
//! let summary = analyze(&outcomes);
//! assert_eq!(summary.formatted_percentage(SyndromeLabel::NoError), "90.00%");
//! ```

pub mod config;
pub mod error;
pub mod experiment;
pub mod noise_spec;
pub mod radiation;
pub mod syndrome;
pub mod topology;

pub use config::{ExperimentConfig, LoggingConfig, OrbitConfig};
pub use error::{QecError, QecResult};
pub use experiment::{Experiment, ExperimentReport};
pub use noise_spec::{MAX_ERROR_PROBABILITY, build_noise_channels, validate_error_probability};
pub use radiation::{
    BaseRateTable, ErrorRateProfile, OrbitProfile, SATURATION_RATE, compute_error_rates,
};
pub use syndrome::{
    OUTCOME_WIDTH, OutcomeDistribution, SyndromeClassification, SyndromeCounts, SyndromeLabel,
    analyze,
};
pub use topology::CircuitTopology;

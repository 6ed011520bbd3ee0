//! End-to-end experiment: orbit → noise → execution → classification.

use chrono::{DateTime, Utc};
use radqec_hal::{ExecutionResult, Executor, ValidationResult};
use radqec_ir::NoiseChannelSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{QecError, QecResult};
use crate::noise_spec::{build_noise_channels, validate_error_probability};
use crate::radiation::{BaseRateTable, ErrorRateProfile, OrbitProfile};
use crate::syndrome::{OutcomeDistribution, SyndromeClassification, analyze};
use crate::topology::CircuitTopology;

/// One configured experiment.
///
/// Owns its circuit and noise model; independent experiments share nothing
/// and can run concurrently.
#[derive(Debug, Clone)]
pub struct Experiment {
    orbit: Option<OrbitProfile>,
    rates: Option<ErrorRateProfile>,
    error_probability: f64,
    topology: CircuitTopology,
    noise: NoiseChannelSet,
}

impl Experiment {
    /// Derive the error probability from an orbit.
    ///
    /// `error_probability_override`, when present, replaces the orbit's
    /// overall rate. `Some(0.0)` is honoured and yields a noiseless model;
    /// a zero override is an explicit value, never a request to fall back to
    /// the orbit rate. Pass `None` for the orbit rate.
    pub fn from_orbit(
        table: &BaseRateTable,
        orbit: OrbitProfile,
        error_probability_override: Option<f64>,
    ) -> QecResult<Self> {
        let rates = table.error_rates(&orbit)?;
        let p = error_probability_override.unwrap_or(rates.overall_rate);
        let mut experiment = Self::with_error_probability(p)?;
        experiment.orbit = Some(orbit);
        experiment.rates = Some(rates);
        Ok(experiment)
    }

    /// Use an explicit error probability with no orbit attached.
    pub fn with_error_probability(error_probability: f64) -> QecResult<Self> {
        let p = validate_error_probability(error_probability)?;
        let topology = CircuitTopology::new()?;
        let noise = build_noise_channels(p, topology.num_qubits() as u32)?;
        debug!("Built {} noise rules for p = {:.4}", noise.len(), p);
        Ok(Self {
            orbit: None,
            rates: None,
            error_probability: p,
            topology,
            noise,
        })
    }

    /// Orbit, if the experiment was derived from one.
    pub fn orbit(&self) -> Option<&OrbitProfile> {
        self.orbit.as_ref()
    }

    /// Orbit-derived rates, if any.
    pub fn rates(&self) -> Option<&ErrorRateProfile> {
        self.rates.as_ref()
    }

    /// Error probability driving the noise model.
    pub fn error_probability(&self) -> f64 {
        self.error_probability
    }

    /// The circuit and its layout.
    pub fn topology(&self) -> &CircuitTopology {
        &self.topology
    }

    /// The noise model.
    pub fn noise(&self) -> &NoiseChannelSet {
        &self.noise
    }

    /// Run once under the noise model and classify the outcomes.
    #[instrument(skip(self, executor), fields(executor = executor.name(), p = self.error_probability))]
    pub async fn run(&self, executor: &dyn Executor, shots: u32) -> QecResult<ExperimentReport> {
        let (outcomes, result) = self.execute(executor, &self.noise, shots).await?;
        let classification = analyze(&outcomes);
        info!(
            "Post-selection kept {}/{} shots (ratio {:.4})",
            classification.valid_shots,
            classification.total_shots,
            classification.post_selection_ratio
        );
        Ok(self.report(executor, shots, result, outcomes, classification, None))
    }

    /// Run under the noise model and again noiselessly for comparison.
    #[instrument(skip(self, executor), fields(executor = executor.name(), p = self.error_probability))]
    pub async fn run_with_ideal(
        &self,
        executor: &dyn Executor,
        shots: u32,
    ) -> QecResult<ExperimentReport> {
        let mut report = self.run(executor, shots).await?;
        let (ideal_outcomes, _) = self
            .execute(executor, &NoiseChannelSet::noiseless(), shots)
            .await?;
        let ideal = analyze(&ideal_outcomes);
        debug!(
            "Ideal run: ratio {:.4}, {} error shots",
            ideal.post_selection_ratio,
            ideal.error_shots()
        );
        report.ideal = Some(ideal);
        Ok(report)
    }

    async fn execute(
        &self,
        executor: &dyn Executor,
        noise: &NoiseChannelSet,
        shots: u32,
    ) -> QecResult<(OutcomeDistribution, ExecutionResult)> {
        if shots == 0 {
            return Err(QecError::InvalidParameter(
                "shot count must be at least 1".into(),
            ));
        }

        let circuit = self.topology.circuit();
        if let ValidationResult::Invalid { reasons } = executor.validate(circuit).await? {
            return Err(QecError::CircuitRejected(reasons));
        }

        let result = executor.run(circuit, noise, shots).await?;
        let outcomes = OutcomeDistribution::from_counts(&result.counts)?;
        debug!(
            "{} returned {} distinct outcomes over {} shots",
            executor.name(),
            outcomes.len(),
            outcomes.total_shots()
        );
        Ok((outcomes, result))
    }

    fn report(
        &self,
        executor: &dyn Executor,
        shots: u32,
        result: ExecutionResult,
        outcomes: OutcomeDistribution,
        classification: SyndromeClassification,
        ideal: Option<SyndromeClassification>,
    ) -> ExperimentReport {
        ExperimentReport {
            run_id: Uuid::new_v4(),
            completed_at: Utc::now(),
            orbit: self.orbit.clone(),
            rates: self.rates,
            error_probability: self.error_probability,
            shots,
            executor: executor.name().to_string(),
            seed: result.seed,
            execution_time_ms: result.execution_time_ms,
            outcomes,
            classification,
            ideal,
        }
    }
}

/// Terminal artifact of an experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Unique run identifier.
    pub run_id: Uuid,
    /// When the noisy run finished.
    pub completed_at: DateTime<Utc>,
    /// Orbit, if the experiment was derived from one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit: Option<OrbitProfile>,
    /// Orbit-derived rates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<ErrorRateProfile>,
    /// Error probability driving the noise model.
    pub error_probability: f64,
    /// Shots requested.
    pub shots: u32,
    /// Executor name.
    pub executor: String,
    /// RNG seed reported by the executor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Execution time of the noisy run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    /// Raw outcomes of the noisy run.
    pub outcomes: OutcomeDistribution,
    /// Post-selection summary of the noisy run.
    pub classification: SyndromeClassification,
    /// Summary of the noiseless comparison run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal: Option<SyndromeClassification>,
}

impl ExperimentReport {
    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> QecResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

//! End-to-end experiment tests against the local simulator and stub executors.

use async_trait::async_trait;
use radqec_adapter_sim::SimulatorBackend;
use radqec_core::{BaseRateTable, Experiment, OrbitProfile, QecError, SyndromeLabel};
use radqec_hal::{
    Capabilities, Counts, ExecutionResult, Executor, HalError, HalResult, ValidationResult,
};
use radqec_ir::{Circuit, NoiseChannelSet};

/// Returns a fixed histogram regardless of input.
struct CannedExecutor {
    caps: Capabilities,
    counts: Counts,
    reject: Option<Vec<String>>,
}

impl CannedExecutor {
    fn returning(pairs: &[(&str, u64)]) -> Self {
        Self {
            caps: Capabilities::trajectory_simulator(16, 1_000_000).with_name("canned"),
            counts: Counts::from_pairs(pairs.iter().copied()).unwrap(),
            reject: None,
        }
    }
}

#[async_trait]
impl Executor for CannedExecutor {
    fn name(&self) -> &str {
        &self.caps.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(match &self.reject {
            Some(reasons) => ValidationResult::Invalid {
                reasons: reasons.clone(),
            },
            None => ValidationResult::Valid,
        })
    }

    async fn run(
        &self,
        _circuit: &Circuit,
        _noise: &NoiseChannelSet,
        shots: u32,
    ) -> HalResult<ExecutionResult> {
        Ok(ExecutionResult::new(self.counts.clone(), shots))
    }
}

/// Always fails at run time.
struct BrokenExecutor(Capabilities);

#[async_trait]
impl Executor for BrokenExecutor {
    fn name(&self) -> &str {
        "broken"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.0
    }

    async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(ValidationResult::Valid)
    }

    async fn run(
        &self,
        _circuit: &Circuit,
        _noise: &NoiseChannelSet,
        _shots: u32,
    ) -> HalResult<ExecutionResult> {
        Err(HalError::Backend("device offline".into()))
    }
}

#[tokio::test]
async fn test_noiseless_simulation_is_round_consistent() {
    let experiment = Experiment::with_error_probability(0.0).unwrap();
    let backend = SimulatorBackend::new().with_seed(2024);
    let report = experiment.run(&backend, 2_000).await.unwrap();

    let summary = &report.classification;
    assert_eq!(summary.total_shots, 2_000);
    assert_eq!(summary.valid_shots, 2_000);
    assert_eq!(summary.post_selection_ratio, 1.0);
    // The encoded state is a +1 eigenstate of both checks.
    assert_eq!(summary.count(SyndromeLabel::NoError), 2_000);
    assert_eq!(report.outcomes.get("0000"), 2_000);
    assert_eq!(report.seed, Some(2024));
}

#[tokio::test]
async fn test_noisy_simulation_loses_shots() {
    let table = BaseRateTable::standard();
    let orbit = OrbitProfile::new(800, "SSO", 10.0);
    let experiment = Experiment::from_orbit(&table, orbit, None).unwrap();
    assert!((experiment.error_probability() - 0.20).abs() < 1e-12);

    let backend = SimulatorBackend::new().with_seed(7);
    let report = experiment.run(&backend, 4_000).await.unwrap();
    let summary = &report.classification;

    assert_eq!(summary.total_shots, 4_000);
    assert!(summary.valid_shots < summary.total_shots);
    assert!(summary.error_shots() > 0);
    assert!(report.rates.is_some());
    assert_eq!(report.executor, "simulator");
}

#[tokio::test]
async fn test_seeded_experiments_reproduce() {
    let experiment = Experiment::with_error_probability(0.05).unwrap();
    let first = experiment
        .run(&SimulatorBackend::new().with_seed(99), 1_000)
        .await
        .unwrap();
    let second = experiment
        .run(&SimulatorBackend::new().with_seed(99), 1_000)
        .await
        .unwrap();
    assert_eq!(first.outcomes, second.outcomes);
    assert_ne!(first.run_id, second.run_id);
}

#[tokio::test]
async fn test_ideal_comparison() {
    let experiment = Experiment::with_error_probability(0.1).unwrap();
    let backend = SimulatorBackend::new().with_seed(5);
    let report = experiment.run_with_ideal(&backend, 1_000).await.unwrap();

    let ideal = report.ideal.as_ref().unwrap();
    assert_eq!(ideal.post_selection_ratio, 1.0);
    assert_eq!(ideal.error_shots(), 0);
    assert!(report.classification.post_selection_ratio <= 1.0);
}

#[tokio::test]
async fn test_canned_counts_are_classified() {
    let experiment = Experiment::with_error_probability(0.01).unwrap();
    let executor = CannedExecutor::returning(&[("0000", 900), ("0101", 100)]);
    let report = experiment.run(&executor, 1_000).await.unwrap();

    let summary = &report.classification;
    assert_eq!(summary.valid_shots, 1_000);
    assert_eq!(summary.count(SyndromeLabel::ZType), 100);
    assert_eq!(summary.formatted_percentage(SyndromeLabel::NoError), "90.00%");

    let json = report.to_json_pretty().unwrap();
    assert!(json.contains("\"executor\": \"canned\""));
}

#[tokio::test]
async fn test_malformed_outcomes_are_executor_failures() {
    let experiment = Experiment::with_error_probability(0.01).unwrap();
    for bad in ["000", "00000", "01a1"] {
        let executor = CannedExecutor::returning(&[(bad, 10)]);
        let err = experiment.run(&executor, 10).await.unwrap_err();
        assert!(matches!(err, QecError::MalformedOutcome(_)), "{bad} accepted");
        assert!(err.is_executor_failure());
    }
}

#[tokio::test]
async fn test_rejected_circuit() {
    let experiment = Experiment::with_error_probability(0.01).unwrap();
    let mut executor = CannedExecutor::returning(&[("0000", 1)]);
    executor.reject = Some(vec!["no mid-circuit measurement".into()]);

    let err = experiment.run(&executor, 10).await.unwrap_err();
    assert!(matches!(err, QecError::CircuitRejected(ref r) if r.len() == 1));
}

#[tokio::test]
async fn test_executor_errors_propagate() {
    let experiment = Experiment::with_error_probability(0.01).unwrap();
    let executor = BrokenExecutor(Capabilities::trajectory_simulator(16, 100));
    let err = experiment.run(&executor, 10).await.unwrap_err();
    assert!(matches!(err, QecError::Executor(HalError::Backend(_))));
}

#[tokio::test]
async fn test_zero_shots_rejected_before_execution() {
    let experiment = Experiment::with_error_probability(0.01).unwrap();
    let executor = BrokenExecutor(Capabilities::trajectory_simulator(16, 100));
    let err = experiment.run(&executor, 0).await.unwrap_err();
    assert!(err.is_invalid_parameter());
}

#[tokio::test]
async fn test_small_simulator_rejects_circuit() {
    let experiment = Experiment::with_error_probability(0.01).unwrap();
    let backend = SimulatorBackend::new().with_max_qubits(4);
    let err = experiment.run(&backend, 10).await.unwrap_err();
    assert!(matches!(err, QecError::CircuitRejected(_)));
}

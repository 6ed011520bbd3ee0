//! The executor boundary.
//!
//! An [`Executor`] takes a circuit, a noise description and a shot count and
//! returns an outcome histogram. The lifecycle is deliberately flat:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ run()
//!    (sync, &ref)       (async)       (async)
//! ```
//!
//! `capabilities()` is synchronous and infallible; implementations cache it at
//! construction time.

use async_trait::async_trait;
use radqec_ir::{Circuit, InstructionKind, NoiseChannelSet};
use tracing::debug;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Something that can run a circuit under a noise model.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Name of this executor.
    fn name(&self) -> &str;

    /// Capabilities of this executor.
    fn capabilities(&self) -> &Capabilities;

    /// Check a circuit against executor constraints.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult>;

    /// Execute `circuit` for `shots` shots with `noise` applied.
    ///
    /// One call is one run; executors do not retry.
    async fn run(
        &self,
        circuit: &Circuit,
        noise: &NoiseChannelSet,
        shots: u32,
    ) -> HalResult<ExecutionResult>;
}

/// Result of circuit validation against executor constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit can be run as-is.
    Valid,
    /// Circuit cannot run on this executor.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Reasons for rejection, empty when valid.
    pub fn reasons(&self) -> &[String] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid { reasons } => reasons,
        }
    }
}

/// Check qubit count and gate vocabulary against `caps`.
pub fn validate_circuit(caps: &Capabilities, circuit: &Circuit) -> HalResult<ValidationResult> {
    let mut reasons = Vec::new();

    if circuit.num_qubits() > caps.num_qubits as usize {
        reasons.push(format!(
            "Circuit has {} qubits but {} supports at most {}",
            circuit.num_qubits(),
            caps.name,
            caps.num_qubits
        ));
    }

    let instructions = circuit
        .instructions()
        .map_err(|e| HalError::InvalidCircuit(e.to_string()))?;
    for instruction in instructions {
        match instruction.kind {
            InstructionKind::Gate(gate) if !caps.gate_set.contains(gate.name()) => {
                reasons.push(format!("Unsupported gate: {}", gate.name()));
            }
            InstructionKind::Reset if !caps.has_feature("reset") => {
                reasons.push("Reset is not supported".into());
            }
            _ => {}
        }
    }
    reasons.dedup();

    if reasons.is_empty() {
        Ok(ValidationResult::Valid)
    } else {
        debug!(?reasons, "circuit rejected");
        Ok(ValidationResult::Invalid { reasons })
    }
}

/// Reject `shots` outside `1..=caps.max_shots`.
pub fn check_shots(caps: &Capabilities, shots: u32) -> HalResult<()> {
    if shots == 0 {
        return Err(HalError::InvalidShots("shots must be at least 1".into()));
    }
    if shots > caps.max_shots {
        return Err(HalError::InvalidShots(format!(
            "{shots} exceeds the maximum of {} for {}",
            caps.max_shots, caps.name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::GateSet;
    use crate::result::Counts;
    use radqec_ir::{ClbitId, QubitId, StandardGate};

    struct FixedExecutor {
        caps: Capabilities,
        counts: Counts,
    }

    #[async_trait]
    impl Executor for FixedExecutor {
        fn name(&self) -> &str {
            "fixed"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
            validate_circuit(&self.caps, circuit)
        }

        async fn run(
            &self,
            _circuit: &Circuit,
            _noise: &NoiseChannelSet,
            shots: u32,
        ) -> HalResult<ExecutionResult> {
            check_shots(&self.caps, shots)?;
            Ok(ExecutionResult::new(self.counts.clone(), shots))
        }
    }

    fn bell() -> Circuit {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.measure(QubitId(1), ClbitId(1)).unwrap();
        circuit
    }

    #[tokio::test]
    async fn test_executor_as_trait_object() {
        let executor: Box<dyn Executor> = Box::new(FixedExecutor {
            caps: Capabilities::trajectory_simulator(4, 100),
            counts: Counts::from_pairs([("00", 5), ("11", 5)]).unwrap(),
        });
        let circuit = bell();
        assert!(executor.validate(&circuit).await.unwrap().is_valid());

        let result = executor
            .run(&circuit, &NoiseChannelSet::noiseless(), 10)
            .await
            .unwrap();
        assert_eq!(result.counts.total_shots(), 10);
    }

    #[tokio::test]
    async fn test_shot_limits() {
        let executor = FixedExecutor {
            caps: Capabilities::trajectory_simulator(4, 100),
            counts: Counts::new(),
        };
        let noise = NoiseChannelSet::noiseless();
        let zero = executor.run(&bell(), &noise, 0).await.unwrap_err();
        assert!(matches!(zero, HalError::InvalidShots(_)));
        let many = executor.run(&bell(), &noise, 101).await.unwrap_err();
        assert!(matches!(many, HalError::InvalidShots(_)));
    }

    #[test]
    fn test_validation_rejects_large_circuit_and_unknown_gates() {
        let mut caps = Capabilities::trajectory_simulator(1, 100);
        caps.gate_set = GateSet::from_gates([StandardGate::H]);
        let result = validate_circuit(&caps, &bell()).unwrap();
        assert!(!result.is_valid());
        let reasons = result.reasons();
        assert!(reasons.iter().any(|r| r.contains("at most 1")));
        assert!(reasons.iter().any(|r| r.contains("Unsupported gate: cx")));
    }

    #[test]
    fn test_validation_result_is_valid() {
        assert!(ValidationResult::Valid.is_valid());
        assert!(ValidationResult::Valid.reasons().is_empty());
        assert!(!ValidationResult::Invalid { reasons: vec![] }.is_valid());
    }
}

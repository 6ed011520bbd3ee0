//! Executor capability introspection.
//!
//! Describes what an executor can run: qubit count, shot limit, supported
//! gates and whether it honours a [`NoiseChannelSet`](radqec_ir::NoiseChannelSet).
//! The experiment layer uses this to reject circuits before running them.

use radqec_ir::StandardGate;
use serde::{Deserialize, Serialize};

/// Hardware or simulator capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the executor.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set (OpenQASM naming convention).
    pub gate_set: GateSet,
    /// Maximum number of shots per run.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
    /// Whether stochastic noise rules are applied during execution.
    pub supports_noise: bool,
    /// Additional capability flags: `"statevector"`,
    /// `"mid_circuit_measurement"`, `"reset"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Capabilities of a noisy statevector trajectory simulator.
    pub fn trajectory_simulator(num_qubits: u32, max_shots: u32) -> Self {
        Self {
            name: "trajectory-simulator".into(),
            num_qubits,
            gate_set: GateSet::clifford(),
            max_shots,
            is_simulator: true,
            supports_noise: true,
            features: vec![
                "statevector".into(),
                "mid_circuit_measurement".into(),
                "reset".into(),
            ],
        }
    }

    /// Rename the capability record.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether a feature flag is set.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Gates an executor accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
    /// Native gates. Empty means every supported gate is native.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub native: Vec<String>,
}

impl GateSet {
    /// Every gate in the IR vocabulary.
    pub fn clifford() -> Self {
        Self::from_gates(StandardGate::ALL)
    }

    /// Gate set covering exactly `gates`.
    pub fn from_gates(gates: impl IntoIterator<Item = StandardGate>) -> Self {
        let mut set = Self::default();
        for gate in gates {
            let bucket = match gate.num_qubits() {
                1 => &mut set.single_qubit,
                _ => &mut set.two_qubit,
            };
            bucket.push(gate.name().to_string());
        }
        set
    }

    /// Check whether a gate is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit.iter().any(|g| g == gate) || self.two_qubit.iter().any(|g| g == gate)
    }

    /// Check if a gate is native.
    pub fn is_native(&self, gate: &str) -> bool {
        if self.native.is_empty() {
            self.contains(gate)
        } else {
            self.native.iter().any(|g| g == gate)
        }
    }
}

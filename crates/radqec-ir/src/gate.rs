//! Gate vocabulary.
//!
//! Only the Clifford gates the syndrome-extraction circuits and their Pauli
//! noise need. Names follow the OpenQASM spelling so they can key noise rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger.
    Sdg,
    /// Controlled-X (CNOT), control first.
    CX,
    /// Controlled-Y, control first.
    CY,
    /// Controlled-Z.
    CZ,
    /// SWAP.
    Swap,
}

impl StandardGate {
    /// Every gate in the vocabulary.
    pub const ALL: [StandardGate; 11] = [
        StandardGate::I,
        StandardGate::X,
        StandardGate::Y,
        StandardGate::Z,
        StandardGate::H,
        StandardGate::S,
        StandardGate::Sdg,
        StandardGate::CX,
        StandardGate::CY,
        StandardGate::CZ,
        StandardGate::Swap,
    ];

    /// Lower-case mnemonic.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
        }
    }

    /// Number of qubits the gate acts on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg => 1,
            StandardGate::CX | StandardGate::CY | StandardGate::CZ | StandardGate::Swap => 2,
        }
    }

    /// Look a gate up by mnemonic.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }

    /// Whether the gate is a single-qubit Pauli (including identity).
    pub fn is_pauli(&self) -> bool {
        matches!(
            self,
            StandardGate::I | StandardGate::X | StandardGate::Y | StandardGate::Z
        )
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Noise model construction from a physical error probability.

use radqec_ir::{
    InstructionKind, NoiseChannelSet, PauliChannel, QuantumError, QubitId, StandardGate,
};

use crate::error::{QecError, QecResult};

/// Largest error probability the symmetric Pauli channel accepts.
pub const MAX_ERROR_PROBABILITY: f64 = 1.0 / 3.0;

/// Single-qubit operations that carry the Pauli channel.
pub const SINGLE_QUBIT_NOISY_OPS: [InstructionKind; 4] = [
    InstructionKind::Reset,
    InstructionKind::Gate(StandardGate::H),
    InstructionKind::Gate(StandardGate::X),
    InstructionKind::Gate(StandardGate::Z),
];

/// Two-qubit operations that carry the depolarizing channel.
pub const TWO_QUBIT_NOISY_OPS: [InstructionKind; 2] = [
    InstructionKind::Gate(StandardGate::CX),
    InstructionKind::Gate(StandardGate::CZ),
];

/// Reject probabilities outside `[0, 1/3]`.
pub fn validate_error_probability(error_probability: f64) -> QecResult<f64> {
    if !error_probability.is_finite()
        || !(0.0..=MAX_ERROR_PROBABILITY).contains(&error_probability)
    {
        return Err(QecError::InvalidParameter(format!(
            "error probability must be within [0, 1/3], got {error_probability}"
        )));
    }
    Ok(error_probability)
}

/// Number of rules [`build_noise_channels`] emits for `qubit_count` qubits.
pub fn expected_rule_count(qubit_count: u32) -> usize {
    let n = qubit_count as usize;
    SINGLE_QUBIT_NOISY_OPS.len() * n + TWO_QUBIT_NOISY_OPS.len() * n * n.saturating_sub(1)
}

/// Build the noise model for `qubit_count` qubits.
///
/// Every qubit gets a symmetric Pauli channel (`p/3` each for X, Y, Z) on
/// each single-qubit op; every ordered pair of distinct qubits gets a
/// two-qubit depolarizing channel with parameter `p` on `cx` and `cz`.
/// Rules are ordered by qubit then op, then by pair then op.
pub fn build_noise_channels(error_probability: f64, qubit_count: u32) -> QecResult<NoiseChannelSet> {
    let p = validate_error_probability(error_probability)?;

    let single = QuantumError::Pauli(PauliChannel::symmetric(p)?);
    let pair = QuantumError::depolarizing(p, 2)?;

    let mut noise = NoiseChannelSet::new();
    for q in 0..qubit_count {
        for op in SINGLE_QUBIT_NOISY_OPS {
            noise.add_rule(op.name(), [QubitId(q)], single)?;
        }
    }
    for q1 in 0..qubit_count {
        for q2 in (0..qubit_count).filter(|&q2| q2 != q1) {
            for op in TWO_QUBIT_NOISY_OPS {
                noise.add_rule(op.name(), [QubitId(q1), QubitId(q2)], pair)?;
            }
        }
    }
    Ok(noise)
}

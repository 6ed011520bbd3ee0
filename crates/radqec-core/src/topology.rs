//! The fixed [[4,2,2]] encoding and two-round syndrome-extraction circuit.

use radqec_ir::{Circuit, ClassicalRegister, ClbitId, QubitId};

use crate::error::QecResult;

/// Data qubits in register `q`.
pub const NUM_DATA_QUBITS: u32 = 4;

/// Ancillas in register `a`: `a[0]` reads the Z check, `a[1]` the X check.
pub const NUM_ANCILLAS: u32 = 2;

/// Syndrome-extraction rounds.
pub const NUM_ROUNDS: usize = 2;

/// Bits written per round.
pub const ROUND_WIDTH: usize = 2;

/// Circuit name.
pub const CIRCUIT_NAME: &str = "radqec_422_two_round";

/// The encoding and syndrome circuit with its register layout.
///
/// Layout: data `q[0..4]` are qubits 0..3, ancillas `a[0..2]` are qubits 4..5,
/// round 1 writes `c1` (clbits 0..1) and round 2 writes `c2` (clbits 2..3).
#[derive(Debug, Clone)]
pub struct CircuitTopology {
    circuit: Circuit,
    data: Vec<QubitId>,
    ancillas: Vec<QubitId>,
}

impl CircuitTopology {
    /// Build the circuit.
    pub fn new() -> QecResult<Self> {
        let mut circuit = Circuit::new(CIRCUIT_NAME);
        let q = circuit.add_qreg("q", NUM_DATA_QUBITS);
        let a = circuit.add_qreg("a", NUM_ANCILLAS);
        let rounds: Vec<Vec<ClbitId>> = (1..=NUM_ROUNDS)
            .map(|k| circuit.add_creg(format!("c{k}"), ROUND_WIDTH as u32))
            .collect();

        // Encoding
        circuit.reset(q[2])?.reset(q[3])?.h(q[3])?;
        circuit
            .cx(q[0], q[2])?
            .cx(q[1], q[2])?
            .cx(q[3], q[2])?
            .cx(q[3], q[1])?
            .cx(q[3], q[0])?;

        for creg in &rounds {
            circuit.barrier_all()?;

            // Z check: a[0] picks up the Z⊗4 parity through phase kickback.
            circuit.reset(a[0])?.h(a[0])?;
            for &d in &q {
                circuit.cz(a[0], d)?;
            }
            circuit.h(a[0])?.measure(a[0], creg[0])?;

            // X check
            circuit.reset(a[1])?.h(a[1])?;
            for &d in &q {
                circuit.cx(a[1], d)?;
            }
            circuit.h(a[1])?.measure(a[1], creg[1])?;
        }

        Ok(Self {
            circuit,
            data: q,
            ancillas: a,
        })
    }

    /// The circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Data qubits in order.
    pub fn data_qubits(&self) -> &[QubitId] {
        &self.data
    }

    /// Ancilla qubits: Z check first, then X check.
    pub fn ancillas(&self) -> &[QubitId] {
        &self.ancillas
    }

    /// Classical register written by round `round` (0-based).
    pub fn round_register(&self, round: usize) -> Option<&ClassicalRegister> {
        self.circuit.classical_registers().get(round)
    }

    /// Total classical bits.
    pub fn classical_width(&self) -> usize {
        self.circuit.num_clbits()
    }

    /// Bits per round.
    pub fn round_width(&self) -> usize {
        ROUND_WIDTH
    }

    /// Number of rounds.
    pub fn num_rounds(&self) -> usize {
        NUM_ROUNDS
    }

    /// Total qubits.
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let topology = CircuitTopology::new().unwrap();
        assert_eq!(topology.num_qubits(), 6);
        assert_eq!(topology.classical_width(), 4);
        assert_eq!(topology.round_width(), 2);
        assert_eq!(topology.data_qubits(), &[QubitId(0), QubitId(1), QubitId(2), QubitId(3)]);
        assert_eq!(topology.ancillas(), &[QubitId(4), QubitId(5)]);

        let c1 = topology.round_register(0).unwrap();
        let c2 = topology.round_register(1).unwrap();
        assert_eq!(c1.name, "c1");
        assert_eq!(c1.bits, vec![ClbitId(0), ClbitId(1)]);
        assert_eq!(c2.name, "c2");
        assert_eq!(c2.bits, vec![ClbitId(2), ClbitId(3)]);
        assert!(topology.round_register(2).is_none());
    }

    #[test]
    fn test_operation_counts() {
        let topology = CircuitTopology::new().unwrap();
        let ops = topology.circuit().count_ops();
        // 2 encoding resets + 2 per round × 2 rounds
        assert_eq!(ops.get("reset"), Some(&6));
        // 1 encoding + 4 per round × 2 rounds
        assert_eq!(ops.get("h"), Some(&9));
        // 5 encoding + 4 per round × 2 rounds
        assert_eq!(ops.get("cx"), Some(&13));
        assert_eq!(ops.get("cz"), Some(&8));
        assert_eq!(ops.get("measure"), Some(&4));
        assert_eq!(ops.get("barrier"), Some(&2));
    }

    #[test]
    fn test_encoding_prefix_order() {
        let topology = CircuitTopology::new().unwrap();
        let ops: Vec<String> = topology
            .circuit()
            .instructions()
            .unwrap()
            .iter()
            .take(8)
            .map(|i| i.to_string())
            .collect();
        assert_eq!(
            ops,
            vec![
                "reset q2", "reset q3", "h q3", "cx q0, q2", "cx q1, q2", "cx q3, q2", "cx q3, q1",
                "cx q3, q0",
            ]
        );
    }

    #[test]
    fn test_rounds_measure_into_their_register() {
        let topology = CircuitTopology::new().unwrap();
        let measures: Vec<String> = topology
            .circuit()
            .instructions()
            .unwrap()
            .iter()
            .filter(|i| i.is_measure())
            .map(|i| i.to_string())
            .collect();
        assert_eq!(
            measures,
            vec![
                "measure q4 -> c0",
                "measure q5 -> c1",
                "measure q4 -> c2",
                "measure q5 -> c3",
            ]
        );
    }
}

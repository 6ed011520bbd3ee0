//! Statevector simulation engine.
//!
//! Qubit `k` is bit `k` of the amplitude index. Measurement is projective:
//! the caller supplies the uniform sample so the engine stays RNG-agnostic.

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use radqec_ir::{Pauli, StandardGate};

/// A pure n-qubit state.
pub(crate) struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// |0...0⟩ on `num_qubits` qubits.
    pub(crate) fn new(num_qubits: usize) -> Self {
        let mut sv = Self {
            amplitudes: vec![Complex64::new(0.0, 0.0); 1 << num_qubits],
            num_qubits,
        };
        sv.amplitudes[0] = Complex64::new(1.0, 0.0);
        sv
    }

    /// Return to |0...0⟩ without reallocating.
    pub(crate) fn reinitialize(&mut self) {
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[0] = Complex64::new(1.0, 0.0);
    }

    #[cfg(test)]
    pub(crate) fn amplitude(&self, index: usize) -> Complex64 {
        self.amplitudes[index]
    }

    fn dim(&self) -> usize {
        1 << self.num_qubits
    }

    /// Apply a unitary gate.
    pub(crate) fn apply_gate(&mut self, gate: StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Y => self.apply_y(qubits[0]),
            StandardGate::Z => self.apply_z(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::S => self.apply_phase(qubits[0], Complex64::new(0.0, 1.0)),
            StandardGate::Sdg => self.apply_phase(qubits[0], Complex64::new(0.0, -1.0)),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::CY => self.apply_cy(qubits[0], qubits[1]),
            StandardGate::CZ => self.apply_cz(qubits[0], qubits[1]),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),
        }
    }

    /// Apply a sampled Pauli fault.
    #[inline]
    pub(crate) fn apply_pauli(&mut self, pauli: Pauli, qubit: usize) {
        match pauli {
            Pauli::I => {}
            Pauli::X => self.apply_x(qubit),
            Pauli::Y => self.apply_y(qubit),
            Pauli::Z => self.apply_z(qubit),
        }
    }

    /// Probability of reading 1 on `qubit`.
    pub(crate) fn probability_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Projectively measure `qubit` given a uniform sample `u ∈ [0, 1)`.
    ///
    /// Collapses and renormalises the state; returns the observed bit.
    pub(crate) fn measure(&mut self, qubit: usize, u: f64) -> bool {
        let p_one = self.probability_one(qubit).clamp(0.0, 1.0);
        let outcome = u < p_one;
        let p_outcome = if outcome { p_one } else { 1.0 - p_one };
        let scale = if p_outcome > 0.0 {
            1.0 / p_outcome.sqrt()
        } else {
            0.0
        };

        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) == outcome {
                *amp *= scale;
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
        outcome
    }

    /// Reset `qubit` to |0⟩: measure, then flip if the result was 1.
    pub(crate) fn reset(&mut self, qubit: usize, u: f64) {
        if self.measure(qubit, u) {
            self.apply_x(qubit);
        }
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.dim() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.dim() {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        self.apply_phase(qubit, Complex64::new(-1.0, 0.0));
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.dim() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = FRAC_1_SQRT_2 * (a + b);
                self.amplitudes[j] = FRAC_1_SQRT_2 * (a - b);
            }
        }
    }

    /// diag(1, phase) on `qubit`.
    fn apply_phase(&mut self, qubit: usize, phase: Complex64) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.dim() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_cy(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.dim() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_cz(&mut self, q1: usize, q2: usize) {
        let mask = (1 << q1) | (1 << q2);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *amp = -*amp;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let m1 = 1 << q1;
        let m2 = 1 << q2;
        for i in 0..self.dim() {
            if (i & m1 != 0) && (i & m2 == 0) {
                self.amplitudes.swap(i, (i & !m1) | m2);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_h_then_measure_collapses() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(StandardGate::H, &[0]);
        assert!((sv.probability_one(0) - 0.5).abs() < EPS);

        // u below p(1) selects |1⟩
        assert!(sv.measure(0, 0.25));
        assert!((sv.probability_one(0) - 1.0).abs() < EPS);
        assert!((sv.amplitude(1).norm() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_reset_returns_to_zero() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(StandardGate::H, &[1]);
        sv.apply_gate(StandardGate::CX, &[1, 0]);
        sv.reset(1, 0.1);
        assert!(sv.probability_one(1) < EPS);
        // The entangled partner collapsed with it.
        assert!((sv.probability_one(0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_cz_phase_kickback() {
        // H · CZ · H on an ancilla detects a Z-parity of 1 on the data qubit.
        let mut sv = Statevector::new(2);
        sv.apply_gate(StandardGate::X, &[0]);
        sv.apply_gate(StandardGate::H, &[1]);
        sv.apply_gate(StandardGate::CZ, &[1, 0]);
        sv.apply_gate(StandardGate::H, &[1]);
        assert!((sv.probability_one(1) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_swap_and_paulis() {
        let mut sv = Statevector::new(2);
        sv.apply_pauli(Pauli::X, 0);
        sv.apply_gate(StandardGate::Swap, &[0, 1]);
        assert!(sv.probability_one(0) < EPS);
        assert!((sv.probability_one(1) - 1.0).abs() < EPS);

        sv.apply_pauli(Pauli::Y, 1);
        assert!(sv.probability_one(1) < EPS);
    }

    #[test]
    fn test_s_sdg_cancel() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(StandardGate::H, &[0]);
        sv.apply_gate(StandardGate::S, &[0]);
        sv.apply_gate(StandardGate::Sdg, &[0]);
        sv.apply_gate(StandardGate::H, &[0]);
        assert!((sv.amplitude(0).re - 1.0).abs() < EPS);
    }

    #[test]
    fn test_reinitialize() {
        let mut sv = Statevector::new(3);
        sv.apply_gate(StandardGate::X, &[2]);
        sv.reinitialize();
        assert!((sv.amplitude(0).re - 1.0).abs() < EPS);
        assert!(sv.probability_one(2) < EPS);
    }
}

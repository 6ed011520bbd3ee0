//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors raised while building or walking a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit is not part of the circuit.
    #[error("Qubit {qubit} not found in circuit{}", format_op_context(.op))]
    QubitNotFound {
        /// The missing qubit.
        qubit: QubitId,
        /// Operation that referenced it, if known.
        op: Option<String>,
    },

    /// Classical bit is not part of the circuit.
    #[error("Classical bit {clbit} not found in circuit{}", format_op_context(.op))]
    ClbitNotFound {
        /// The missing classical bit.
        clbit: ClbitId,
        /// Operation that referenced it, if known.
        op: Option<String>,
    },

    /// Operation received the wrong number of qubit operands.
    #[error("Operation '{op}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Operation name.
        op: String,
        /// Number of operands the operation acts on.
        expected: usize,
        /// Number of operands supplied.
        got: usize,
    },

    /// Measurement operands are not paired one-to-one.
    #[error("Measurement pairs {qubits} qubits with {clbits} classical bits")]
    MeasurementArity {
        /// Number of measured qubits.
        qubits: usize,
        /// Number of target classical bits.
        clbits: usize,
    },

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_op_context(.op))]
    DuplicateQubit {
        /// The repeated qubit.
        qubit: QubitId,
        /// Operation name, if known.
        op: Option<String>,
    },

    /// A noise channel was given probabilities outside the simplex.
    #[error("Invalid noise channel: {0}")]
    InvalidChannel(String),

    /// The DAG lost an internal invariant.
    #[error("Invalid DAG structure: {0}")]
    InvalidDag(String),
}

#[allow(clippy::ref_option)]
fn format_op_context(op: &Option<String>) -> String {
    match op {
        Some(name) => format!(" (op: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

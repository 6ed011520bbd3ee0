//! Circuit intermediate representation for radqec.
//!
//! This crate holds the data structures the rest of the workspace shares:
//! circuits built on a DAG, the small Clifford gate vocabulary syndrome
//! extraction needs, and the noise-channel descriptions executors realise.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] plus named
//!   [`ClassicalRegister`]s
//! - **Gates**: [`StandardGate`]
//! - **Instructions**: [`Instruction`] combining an operation with its operands
//! - **DAG**: [`CircuitDag`] for the internal graph representation
//! - **Circuit**: [`Circuit`] high-level builder API
//! - **Noise**: [`NoiseChannelSet`] mapping `(operation, qubits)` to a [`QuantumError`]
//!
//! # Example: A noisy Bell pair
//!
//! ```rust
//! use radqec_ir::{Circuit, NoiseChannelSet, PauliChannel, QuantumError, QubitId, ClbitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//! assert_eq!(circuit.depth().unwrap(), 3);
//!
//! let mut noise = NoiseChannelSet::new();
//! let flip = QuantumError::Pauli(PauliChannel::symmetric(0.01).unwrap());
//! noise.add_rule("h", [QubitId(0)], flip).unwrap();
//! assert!(noise.lookup("h", &[QubitId(0)]).is_some());
//! ```

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod noise;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use noise::{NoiseChannelSet, NoiseRule, Pauli, PauliChannel, QuantumError};
pub use qubit::{ClassicalRegister, Clbit, ClbitId, Qubit, QubitId, RegisterSlot};

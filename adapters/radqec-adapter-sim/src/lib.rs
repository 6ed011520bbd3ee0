//! Noisy statevector trajectory simulator for radqec.
//!
//! Implements [`Executor`](radqec_hal::Executor) by simulating each shot as an
//! independent trajectory. Noise rules from a
//! [`NoiseChannelSet`](radqec_ir::NoiseChannelSet) are resolved once per run,
//! then sampled after every matching gate or reset.
//!
//! # Performance
//!
//! | Qubits | Memory per trajectory |
//! |--------|-----------------------|
//! | 6 | 1 KB |
//! | 10 | 16 KB |
//! | 16 | 1 MB |
//!
//! The shot loop runs on tokio's blocking pool so it never stalls the async
//! runtime.
//!
//! # Example
//!
//! ```ignore
//! use radqec_adapter_sim::SimulatorBackend;
//! use radqec_hal::Executor;
//! use radqec_ir::{Circuit, NoiseChannelSet, QubitId, ClbitId};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut circuit = Circuit::with_size("bell", 2, 2);
//!     circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
//!     circuit.measure(QubitId(0), ClbitId(0))?.measure(QubitId(1), ClbitId(1))?;
//!
//!     let backend = SimulatorBackend::new().with_seed(7);
//!     let result = backend.run(&circuit, &NoiseChannelSet::noiseless(), 1000).await?;
//!     println!("Results: {:?}", result.counts);
//!     Ok(())
//! }
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, DEFAULT_MAX_SHOTS, SimulatorBackend};

//! Executor abstraction layer for radqec.
//!
//! The experiment pipeline never talks to a simulator directly. It hands a
//! [`Circuit`](radqec_ir::Circuit) and a [`NoiseChannelSet`](radqec_ir::NoiseChannelSet)
//! to an [`Executor`] and receives an [`ExecutionResult`] holding [`Counts`].
//!
//! # Implementing an executor
//!
//! ```ignore
//! use radqec_hal::{Capabilities, Executor, ExecutionResult, HalResult, ValidationResult};
//! use radqec_ir::{Circuit, NoiseChannelSet};
//! use async_trait::async_trait;
//!
//! struct MyExecutor {
//!     caps: Capabilities,
//! }
//!
//! #[async_trait]
//! impl Executor for MyExecutor {
//!     fn name(&self) -> &str { "mine" }
//!     fn capabilities(&self) -> &Capabilities { &self.caps }
//!
//!     async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
//!         radqec_hal::validate_circuit(&self.caps, circuit)
//!     }
//!
//!     async fn run(
//!         &self,
//!         circuit: &Circuit,
//!         noise: &NoiseChannelSet,
//!         shots: u32,
//!     ) -> HalResult<ExecutionResult> {
//!         todo!()
//!     }
//! }
//! ```

pub mod capability;
pub mod error;
pub mod executor;
pub mod result;

pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use executor::{Executor, ValidationResult, check_shots, validate_circuit};
pub use result::{Counts, ExecutionResult};

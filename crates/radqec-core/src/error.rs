//! Error types for the experiment pipeline.

use radqec_hal::HalError;
use radqec_ir::IrError;
use thiserror::Error;

/// Errors raised while configuring or running an experiment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QecError {
    /// Altitude is not a key of the base-rate table.
    #[error("Unsupported altitude: {altitude_km} km")]
    UnsupportedAltitude {
        /// Requested altitude.
        altitude_km: u32,
    },

    /// Inclination has no entry for the requested altitude.
    #[error("Unsupported inclination '{inclination}' at {altitude_km} km")]
    UnsupportedInclination {
        /// Requested altitude.
        altitude_km: u32,
        /// Requested inclination label.
        inclination: String,
    },

    /// Configuration file or environment could not be used.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A numeric parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The executor failed.
    #[error("Executor failure: {0}")]
    Executor(#[from] HalError),

    /// The executor returned outcomes that do not fit the circuit.
    #[error("Malformed outcome: {0}")]
    MalformedOutcome(String),

    /// The executor refused the circuit during validation.
    #[error("Circuit rejected by executor: {}", .0.join("; "))]
    CircuitRejected(Vec<String>),

    /// Circuit construction failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),

    /// Report serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QecError {
    /// Unsupported orbit or unusable configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            QecError::UnsupportedAltitude { .. }
                | QecError::UnsupportedInclination { .. }
                | QecError::Config(_)
        )
    }

    /// A numeric parameter was out of range.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, QecError::InvalidParameter(_))
    }

    /// The executor failed, rejected the circuit, or returned bad data.
    pub fn is_executor_failure(&self) -> bool {
        matches!(
            self,
            QecError::Executor(_) | QecError::MalformedOutcome(_) | QecError::CircuitRejected(_)
        )
    }
}

/// Result type for experiment operations.
pub type QecResult<T> = Result<T, QecError>;

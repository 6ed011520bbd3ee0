//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur while executing a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Execution failed after it started.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// Invalid circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Executor misconfigured.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Circuit exceeds executor capabilities.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Unsupported feature.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Accumulated counts no longer fit in a `u64`.
    #[error("Count overflow: {0}")]
    CountOverflow(String),

    /// Generic executor error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;

//! Error types for partisim.
//!
//! Setup-time operations (state construction, configuration, snapshot
//! decoding) return `PartisimResult<T>`. Numerical failure inside the
//! Cholesky kernel is reported as a status value; see `partisim-math`.

use thiserror::Error;

/// Unified error type for partisim.
#[derive(Debug, Error)]
pub enum PartisimError {
    /// Particle state is malformed or inconsistent.
    #[error("Invalid particle state: {0}")]
    InvalidState(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two buffers that must agree in length do not.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Cholesky factorization met a non-positive pivot.
    #[error("Matrix is not positive definite (non-positive pivot at index {pivot})")]
    NotPositiveDefinite { pivot: usize },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, PartisimError>`.
pub type PartisimResult<T> = Result<T, PartisimError>;

//! Physical constants, simulation defaults, and factorization tuning.

use crate::scalar::Scalar;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: Scalar = 9.81;

/// Default simulation timestep (seconds).
pub const DEFAULT_DT: Scalar = 0.01;

/// Degrees of freedom carried by one 2D particle (x and y).
pub const DOFS_PER_PARTICLE: usize = 2;

/// Below this dimension the blocked Cholesky kernel falls back to the
/// unblocked one. Purely a performance knob.
pub const BLOCKED_LLT_THRESHOLD: usize = 32;

/// Smallest block size used by the blocked Cholesky kernel.
pub const MIN_LLT_BLOCK: usize = 8;

/// Largest block size used by the blocked Cholesky kernel.
pub const MAX_LLT_BLOCK: usize = 128;

/// Block sizes are rounded down to a multiple of this before clamping.
pub const LLT_BLOCK_MULTIPLE: usize = 16;

/// Relative tolerance used when checking `L·Lᵀ` against the input matrix.
pub const RECONSTRUCTION_TOLERANCE: Scalar = 1.0e-10;

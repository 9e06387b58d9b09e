//! # partisim-math
//!
//! Dense linear algebra for the partisim simulator.
//!
//! Provides:
//! - [`DenseMatrix`], column-major storage with the handful of products
//!   the solver and its tests need
//! - Cholesky (LLᵀ) factorization, unblocked and cache-blocked, reading
//!   either triangle ([`Side`])
//! - Forward/backward substitution on the factor
//! - [`SpdSolver`], the seam implicit integrators solve through

pub mod cholesky;
pub mod dense;
pub mod solver;
pub mod triangular;

pub use cholesky::{
    llt_block_size, llt_in_place_blocked, llt_in_place_unblocked, ComputationInfo, Llt,
    LltStrategy,
};
pub use dense::DenseMatrix;
pub use solver::SpdSolver;
pub use triangular::Side;

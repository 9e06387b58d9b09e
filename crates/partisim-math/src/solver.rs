//! Solver interface for symmetric positive-definite systems.
//!
//! Implicit integrators assemble an SPD system each step and solve it
//! through this trait, so the factorization backend stays swappable.

use partisim_types::Scalar;

use crate::cholesky::ComputationInfo;
use crate::dense::DenseMatrix;

/// Trait for dense symmetric positive-definite solvers.
///
/// Implementations: [`Llt`](crate::cholesky::Llt).
pub trait SpdSolver {
    /// Factorize the matrix. Numerical failure is reported, never panics.
    fn factorize(&mut self, matrix: &DenseMatrix) -> ComputationInfo;

    /// Solve `A x = b` in place using the pre-computed factorization.
    ///
    /// Calling this without a successful `factorize` is a precondition
    /// violation.
    fn solve_in_place(&self, rhs: &mut [Scalar]) -> bool;

    /// Returns true if the solver holds a valid factorization.
    fn is_factorized(&self) -> bool;
}

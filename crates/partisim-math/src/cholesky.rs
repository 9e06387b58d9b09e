//! Dense Cholesky (LLᵀ) factorization.
//!
//! ## Workflow
//! 1. `Llt::compute(&a)`: copies `a` and factors it in place (blocked kernel)
//! 2. `info()`: `Success` or `NumericalIssue`; always check before solving
//! 3. `solve_in_place(&mut b)`: forward then backward substitution
//! 4. Repeat step 3 with different right-hand sides
//!
//! The free functions [`llt_in_place_unblocked`] and [`llt_in_place_blocked`]
//! expose the kernels directly for callers that own their storage.

use serde::{Deserialize, Serialize};

use partisim_types::constants::{
    BLOCKED_LLT_THRESHOLD, LLT_BLOCK_MULTIPLE, MAX_LLT_BLOCK, MIN_LLT_BLOCK,
};
use partisim_types::{PartisimError, PartisimResult, Scalar};

use crate::dense::DenseMatrix;
use crate::solver::SpdSolver;
use crate::triangular::{backward_substitute, forward_substitute, Side, TriangularLayout};

/// Outcome of the last factorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComputationInfo {
    /// Every pivot was strictly positive.
    Success,
    /// A pivot was non-positive; the stored factor must be discarded.
    NumericalIssue,
}

/// Which kernel [`Llt`] runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LltStrategy {
    /// Cache-blocked right-looking kernel (falls back to unblocked below 32).
    #[default]
    Blocked,
    /// Column-by-column kernel.
    Unblocked,
}

impl LltStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            LltStrategy::Blocked => "blocked",
            LltStrategy::Unblocked => "unblocked",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [LltStrategy::Blocked, LltStrategy::Unblocked]
            .into_iter()
            .find(|s| s.name() == name)
    }
}

/// Block size used by the blocked kernel for an `n×n` matrix.
///
/// `n/8` rounded down to a multiple of 16, then clamped to `[8, 128]`.
pub fn llt_block_size(n: usize) -> usize {
    let bs = (n / 8) / LLT_BLOCK_MULTIPLE * LLT_BLOCK_MULTIPLE;
    bs.clamp(MIN_LLT_BLOCK, MAX_LLT_BLOCK)
}

/// Factors the `size×size` diagonal block starting at `offset`, using only
/// columns inside the block. Returns the global index of a failing pivot.
fn factor_diagonal_block(
    a: &mut [Scalar],
    layout: TriangularLayout,
    offset: usize,
    size: usize,
) -> Result<(), usize> {
    for k in offset..offset + size {
        let mut x = a[layout.idx(k, k)];
        for j in offset..k {
            let l = a[layout.idx(k, j)];
            x -= l * l;
        }
        // NaN compares false against everything; reject it here too.
        if !(x > 0.0) {
            return Err(k);
        }
        let pivot = x.sqrt();
        a[layout.idx(k, k)] = pivot;

        let inv = 1.0 / pivot;
        for i in k + 1..offset + size {
            let mut s = a[layout.idx(i, k)];
            for j in offset..k {
                s -= a[layout.idx(i, j)] * a[layout.idx(k, j)];
            }
            a[layout.idx(i, k)] = s * inv;
        }
    }
    Ok(())
}

/// `A21 ← A21 · L11⁻ᵀ` for the panel below the block at `k`.
fn solve_panel(a: &mut [Scalar], layout: TriangularLayout, k: usize, bs: usize) {
    for i in k + bs..layout.n {
        for j in k..k + bs {
            let mut s = a[layout.idx(i, j)];
            for p in k..j {
                s -= a[layout.idx(i, p)] * a[layout.idx(j, p)];
            }
            a[layout.idx(i, j)] = s / a[layout.idx(j, j)];
        }
    }
}

/// `A22 ← A22 − A21·A21ᵀ`, lower half of `A22` only.
fn rank_update(a: &mut [Scalar], layout: TriangularLayout, k: usize, bs: usize) {
    let n = layout.n;
    for j in k + bs..n {
        for i in j..n {
            let mut s = 0.0;
            for p in k..k + bs {
                s += a[layout.idx(i, p)] * a[layout.idx(j, p)];
            }
            a[layout.idx(i, j)] -= s;
        }
    }
}

fn unblocked(a: &mut [Scalar], layout: TriangularLayout) -> Result<(), usize> {
    factor_diagonal_block(a, layout, 0, layout.n)
}

fn blocked(a: &mut [Scalar], layout: TriangularLayout) -> Result<(), usize> {
    let n = layout.n;
    if n < BLOCKED_LLT_THRESHOLD {
        return unblocked(a, layout);
    }

    let block = llt_block_size(n);
    let mut k = 0;
    while k < n {
        //       A00 |  -  |  -
        //  A =  A10 | A11 |  -
        //       A20 | A21 | A22
        let bs = block.min(n - k);
        factor_diagonal_block(a, layout, k, bs)?;
        if k + bs < n {
            solve_panel(a, layout, k, bs);
            rank_update(a, layout, k, bs);
        }
        k += bs;
    }
    Ok(())
}

fn assert_square(a: &DenseMatrix) {
    assert!(
        a.is_square(),
        "Cholesky requires a square matrix, got {}×{}",
        a.rows,
        a.cols
    );
}

fn run_kernel(a: &mut DenseMatrix, side: Side, strategy: LltStrategy) -> Result<(), usize> {
    assert_square(a);
    let layout = TriangularLayout::new(a.rows, side);
    match strategy {
        LltStrategy::Blocked => blocked(a.as_mut_slice(), layout),
        LltStrategy::Unblocked => unblocked(a.as_mut_slice(), layout),
    }
}

/// Factors `a` in place column by column.
///
/// Returns `false` at the first non-positive pivot; the storage is then
/// partially overwritten and must be discarded.
pub fn llt_in_place_unblocked(a: &mut DenseMatrix, side: Side) -> bool {
    run_kernel(a, side, LltStrategy::Unblocked).is_ok()
}

/// Factors `a` in place with the cache-blocked kernel.
///
/// Produces the same factor as [`llt_in_place_unblocked`] up to rounding.
pub fn llt_in_place_blocked(a: &mut DenseMatrix, side: Side) -> bool {
    run_kernel(a, side, LltStrategy::Blocked).is_ok()
}

/// Cholesky decomposition `A = L·Lᵀ` of a dense SPD matrix.
///
/// State machine: uninitialized (`info() == None`) → `compute` →
/// `Success` | `NumericalIssue`. A new `compute` restarts the cycle.
#[derive(Debug, Clone)]
pub struct Llt {
    factor: DenseMatrix,
    side: Side,
    strategy: LltStrategy,
    info: Option<ComputationInfo>,
    failed_pivot: Option<usize>,
}

impl Llt {
    /// Creates an uninitialized lower-side decomposition using the blocked kernel.
    pub fn new() -> Self {
        Self::with_side(Side::Lower)
    }

    /// Creates an uninitialized decomposition reading the given triangle.
    pub fn with_side(side: Side) -> Self {
        Self {
            factor: DenseMatrix::zeros(0, 0),
            side,
            strategy: LltStrategy::default(),
            info: None,
            failed_pivot: None,
        }
    }

    /// Selects the kernel used by subsequent `compute` calls.
    pub fn with_strategy(mut self, strategy: LltStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Copies `a` and factors the copy.
    pub fn compute(&mut self, a: &DenseMatrix) -> &mut Self {
        self.compute_owned(a.clone())
    }

    /// Factors `a` in its own storage, taking ownership of it.
    pub fn compute_owned(&mut self, a: DenseMatrix) -> &mut Self {
        self.factor = a;
        let result = run_kernel(&mut self.factor, self.side, self.strategy);
        match result {
            Ok(()) => {
                self.info = Some(ComputationInfo::Success);
                self.failed_pivot = None;
                tracing::debug!(dim = self.factor.rows, strategy = ?self.strategy, "llt factorized");
            }
            Err(pivot) => {
                self.info = Some(ComputationInfo::NumericalIssue);
                self.failed_pivot = Some(pivot);
                tracing::debug!(dim = self.factor.rows, pivot, "llt hit non-positive pivot");
            }
        }
        self
    }

    /// Status of the last `compute`, or `None` before the first one.
    pub fn info(&self) -> Option<ComputationInfo> {
        self.info
    }

    /// Index of the first non-positive pivot after a failed `compute`.
    pub fn failed_pivot(&self) -> Option<usize> {
        self.failed_pivot
    }

    /// Converts the status into a `Result` for `?`-style callers.
    pub fn check(&self) -> PartisimResult<()> {
        match self.info {
            Some(ComputationInfo::Success) => Ok(()),
            Some(ComputationInfo::NumericalIssue) => Err(PartisimError::NotPositiveDefinite {
                pivot: self.failed_pivot.unwrap_or(0),
            }),
            None => Err(PartisimError::InvalidState(
                "Cholesky decomposition has not been computed".into(),
            )),
        }
    }

    /// Which triangle this decomposition reads and writes.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Kernel used by `compute`.
    pub fn strategy(&self) -> LltStrategy {
        self.strategy
    }

    /// Dimension of the factored matrix.
    pub fn dim(&self) -> usize {
        self.factor.rows
    }

    /// Raw factor storage. The triangle opposite to [`side`](Self::side)
    /// still holds whatever the input matrix had there.
    pub fn packed_factor(&self) -> &DenseMatrix {
        self.assert_success();
        &self.factor
    }

    /// Lower factor `L` with its upper triangle zeroed.
    pub fn matrix_l(&self) -> DenseMatrix {
        self.assert_success();
        match self.side {
            Side::Lower => self.factor.lower_triangle(),
            Side::Upper => self.factor.upper_triangle().transpose(),
        }
    }

    /// Upper factor `U = Lᵀ` with its lower triangle zeroed.
    pub fn matrix_u(&self) -> DenseMatrix {
        self.assert_success();
        match self.side {
            Side::Lower => self.factor.lower_triangle().transpose(),
            Side::Upper => self.factor.upper_triangle(),
        }
    }

    /// `L·Lᵀ`, for diagnostics.
    pub fn reconstructed_matrix(&self) -> DenseMatrix {
        let l = self.matrix_l();
        l.mul(&l.transpose())
    }

    /// Solves `A x = b` in place: `b_and_x` enters as `b`, leaves as `x`.
    ///
    /// Always returns `true`.
    ///
    /// # Panics
    /// Panics if the last `compute` did not succeed or if the length of
    /// `b_and_x` differs from the matrix dimension.
    pub fn solve_in_place(&self, b_and_x: &mut [Scalar]) -> bool {
        self.assert_success();
        assert_eq!(
            b_and_x.len(),
            self.dim(),
            "right-hand side length {} != matrix dimension {}",
            b_and_x.len(),
            self.dim()
        );
        let layout = TriangularLayout::new(self.dim(), self.side);
        forward_substitute(self.factor.as_slice(), layout, b_and_x);
        backward_substitute(self.factor.as_slice(), layout, b_and_x);
        true
    }

    /// Solves `A x = b` and returns `x`.
    pub fn solve(&self, b: &[Scalar]) -> Vec<Scalar> {
        let mut x = b.to_vec();
        self.solve_in_place(&mut x);
        x
    }

    /// Solves `A X = B` column by column, overwriting `B` with `X`.
    pub fn solve_matrix_in_place(&self, b_and_x: &mut DenseMatrix) -> bool {
        self.assert_success();
        assert_eq!(
            b_and_x.rows,
            self.dim(),
            "right-hand side rows {} != matrix dimension {}",
            b_and_x.rows,
            self.dim()
        );
        for j in 0..b_and_x.cols {
            self.solve_in_place(b_and_x.col_mut(j));
        }
        true
    }

    fn assert_success(&self) {
        assert!(
            self.info == Some(ComputationInfo::Success),
            "Cholesky factor used without a successful factorization (status: {:?})",
            self.info
        );
    }
}

impl Default for Llt {
    fn default() -> Self {
        Self::new()
    }
}

impl SpdSolver for Llt {
    fn factorize(&mut self, matrix: &DenseMatrix) -> ComputationInfo {
        self.compute(matrix);
        self.info.unwrap_or(ComputationInfo::NumericalIssue)
    }

    fn solve_in_place(&self, rhs: &mut [Scalar]) -> bool {
        Llt::solve_in_place(self, rhs)
    }

    fn is_factorized(&self) -> bool {
        self.info == Some(ComputationInfo::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_size_rounding_and_clamp() {
        assert_eq!(llt_block_size(32), 8);
        assert_eq!(llt_block_size(64), 8);
        assert_eq!(llt_block_size(200), 16);
        assert_eq!(llt_block_size(300), 32);
        assert_eq!(llt_block_size(4096), 128);
    }

    #[test]
    fn failing_pivot_index_is_reported() {
        // Second pivot: 1 - 2² = -3.
        let mut a = DenseMatrix::from_rows(&[&[1.0, 2.0], &[2.0, 1.0]]);
        let layout = TriangularLayout::new(2, Side::Lower);
        assert_eq!(unblocked(a.as_mut_slice(), layout), Err(1));
    }

    #[test]
    fn nan_pivot_is_rejected() {
        let mut a = DenseMatrix::from_rows(&[&[Scalar::NAN]]);
        assert!(!llt_in_place_unblocked(&mut a, Side::Lower));
    }
}

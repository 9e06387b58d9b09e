//! Triangular storage layout and forward/backward substitution.
//!
//! A Cholesky factor is kept in the same square storage as the matrix it
//! was computed from. [`TriangularLayout`] maps logical lower-triangle
//! coordinates onto that storage so one set of kernels serves both
//! [`Side::Lower`] (factor `L` in the lower half) and [`Side::Upper`]
//! (factor `U = Lᵀ` in the upper half).

use serde::{Deserialize, Serialize};

use partisim_types::Scalar;

/// Which triangle of a symmetric matrix is read and overwritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Read the lower triangle; store `L` there.
    #[default]
    Lower,
    /// Read the upper triangle; store `U = Lᵀ` there.
    Upper,
}

/// Maps lower-triangle coordinates `(i, j)` with `i >= j` onto
/// column-major `n×n` storage.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TriangularLayout {
    pub(crate) n: usize,
    row_stride: usize,
    col_stride: usize,
}

impl TriangularLayout {
    pub(crate) fn new(n: usize, side: Side) -> Self {
        match side {
            Side::Lower => Self { n, row_stride: 1, col_stride: n },
            // Upper storage is the transpose of the logical lower factor.
            Side::Upper => Self { n, row_stride: n, col_stride: 1 },
        }
    }

    #[inline(always)]
    pub(crate) fn idx(&self, i: usize, j: usize) -> usize {
        i * self.row_stride + j * self.col_stride
    }
}

/// Solves `L y = b` in place, where `L` is the logical lower factor held in
/// `data` under `layout`.
pub(crate) fn forward_substitute(data: &[Scalar], layout: TriangularLayout, b: &mut [Scalar]) {
    debug_assert_eq!(b.len(), layout.n);
    for i in 0..layout.n {
        let mut s = b[i];
        for j in 0..i {
            s -= data[layout.idx(i, j)] * b[j];
        }
        b[i] = s / data[layout.idx(i, i)];
    }
}

/// Solves `Lᵀ x = y` in place.
pub(crate) fn backward_substitute(data: &[Scalar], layout: TriangularLayout, y: &mut [Scalar]) {
    debug_assert_eq!(y.len(), layout.n);
    for i in (0..layout.n).rev() {
        let mut s = y[i];
        // Row i of Lᵀ is column i of L below the diagonal.
        for j in i + 1..layout.n {
            s -= data[layout.idx(j, i)] * y[j];
        }
        y[i] = s / data[layout.idx(i, i)];
    }
}

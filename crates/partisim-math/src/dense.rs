//! Dense column-major matrix storage.
//!
//! Only the operations the Cholesky solver and its callers need are
//! provided. This is storage with a few helpers, not an expression library.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use partisim_types::Scalar;

/// Dense matrix in column-major order.
///
/// Entry `(i, j)` lives at `data[i + j * rows]`, so each column is a
/// contiguous slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseMatrix {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    data: Vec<Scalar>,
}

impl DenseMatrix {
    /// Creates a zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates an `n×n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Creates a matrix whose entry `(i, j)` is `f(i, j)`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Scalar) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for j in 0..cols {
            for i in 0..rows {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Creates a matrix from row slices.
    ///
    /// # Panics
    /// Panics if the rows have different lengths.
    pub fn from_rows(rows: &[&[Scalar]]) -> Self {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());
        assert!(
            rows.iter().all(|r| r.len() == n_cols),
            "all rows must have {n_cols} columns"
        );
        Self::from_fn(n_rows, n_cols, |i, j| rows[i][j])
    }

    /// Creates a column vector (`n×1`) from a slice.
    pub fn column(values: &[Scalar]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    /// Returns true if `rows == cols`.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Column-major backing storage.
    pub fn as_slice(&self) -> &[Scalar] {
        &self.data
    }

    /// Mutable column-major backing storage.
    pub fn as_mut_slice(&mut self) -> &mut [Scalar] {
        &mut self.data
    }

    /// Column `j` as a contiguous slice.
    pub fn col(&self, j: usize) -> &[Scalar] {
        assert!(j < self.cols, "column {j} out of range ({} columns)", self.cols);
        &self.data[j * self.rows..(j + 1) * self.rows]
    }

    /// Column `j` as a contiguous mutable slice.
    pub fn col_mut(&mut self, j: usize) -> &mut [Scalar] {
        assert!(j < self.cols, "column {j} out of range ({} columns)", self.cols);
        let rows = self.rows;
        &mut self.data[j * rows..(j + 1) * rows]
    }

    /// Returns the transpose as a new matrix.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self[(j, i)])
    }

    /// Matrix product `self · rhs`.
    ///
    /// # Panics
    /// Panics if the inner dimensions disagree.
    pub fn mul(&self, rhs: &DenseMatrix) -> DenseMatrix {
        assert_eq!(
            self.cols, rhs.rows,
            "inner dimensions disagree: {}×{} · {}×{}",
            self.rows, self.cols, rhs.rows, rhs.cols
        );
        let mut out = DenseMatrix::zeros(self.rows, rhs.cols);
        for j in 0..rhs.cols {
            for p in 0..self.cols {
                let r = rhs[(p, j)];
                if r == 0.0 {
                    continue;
                }
                let lhs_col = self.col(p);
                let out_col = out.col_mut(j);
                for (o, &l) in out_col.iter_mut().zip(lhs_col) {
                    *o += l * r;
                }
            }
        }
        out
    }

    /// Matrix-vector product `self · x`.
    pub fn mul_vec(&self, x: &[Scalar]) -> Vec<Scalar> {
        assert_eq!(
            self.cols,
            x.len(),
            "vector length {} != column count {}",
            x.len(),
            self.cols
        );
        let mut out = vec![0.0; self.rows];
        for (j, &xj) in x.iter().enumerate() {
            for (o, &a) in out.iter_mut().zip(self.col(j)) {
                *o += a * xj;
            }
        }
        out
    }

    /// Copy of the lower triangle (diagonal included); the rest is zero.
    pub fn lower_triangle(&self) -> Self {
        Self::from_fn(self.rows, self.cols, |i, j| if i >= j { self[(i, j)] } else { 0.0 })
    }

    /// Copy of the upper triangle (diagonal included); the rest is zero.
    pub fn upper_triangle(&self) -> Self {
        Self::from_fn(self.rows, self.cols, |i, j| if i <= j { self[(i, j)] } else { 0.0 })
    }

    /// Largest absolute entry.
    pub fn max_abs(&self) -> Scalar {
        self.data.iter().fold(0.0, |m, v| m.max(v.abs()))
    }

    /// Largest absolute entry-wise difference against `other`.
    pub fn max_abs_diff(&self, other: &DenseMatrix) -> Scalar {
        assert_eq!(
            (self.rows, self.cols),
            (other.rows, other.cols),
            "shape mismatch"
        );
        self.data
            .iter()
            .zip(&other.data)
            .fold(0.0, |m, (a, b)| m.max((a - b).abs()))
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of range for {}×{} matrix",
            self.rows,
            self.cols
        );
        i + j * self.rows
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = Scalar;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &Scalar {
        &self.data[self.offset(i, j)]
    }
}

impl IndexMut<(usize, usize)> for DenseMatrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Scalar {
        let offset = self.offset(i, j);
        &mut self.data[offset]
    }
}

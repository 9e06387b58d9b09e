//! Plain-text formatting of matrices and DoF vectors.
//!
//! Output looks like
//! ```text
//! [  4, 12]
//! [ 12, 37]
//! ```
//! with every entry right-aligned to the widest one.

use partisim_math::DenseMatrix;
use partisim_types::Scalar;

/// Formatting options for [`DenseMatrix`] and slices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixFormat {
    /// Digits after the decimal point; trailing zeros are trimmed.
    pub precision: usize,
    /// Right-align entries to a common width.
    pub align_cols: bool,
    pub col_separator: String,
    pub row_separator: String,
    pub row_prefix: String,
    pub row_suffix: String,
}

impl Default for MatrixFormat {
    fn default() -> Self {
        Self::clean()
    }
}

impl MatrixFormat {
    /// Four decimals, `", "` between columns, each row wrapped in brackets.
    pub fn clean() -> Self {
        Self {
            precision: 4,
            align_cols: true,
            col_separator: ", ".into(),
            row_separator: "\n".into(),
            row_prefix: "[".into(),
            row_suffix: "]".into(),
        }
    }

    /// Everything on one line: `[a, b]; [c, d]`.
    pub fn inline() -> Self {
        Self {
            align_cols: false,
            row_separator: "; ".into(),
            ..Self::clean()
        }
    }

    /// Formats a single scalar.
    pub fn scalar(&self, value: Scalar) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let s = format!("{value:.prec$}", prec = self.precision);
        let s = if s.contains('.') {
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            s
        };
        // "-0" after rounding reads as noise.
        if s == "-0" {
            "0".into()
        } else {
            s
        }
    }

    /// Formats a matrix row by row.
    pub fn matrix(&self, m: &DenseMatrix) -> String {
        let cells: Vec<Vec<String>> = (0..m.rows)
            .map(|i| (0..m.cols).map(|j| self.scalar(m[(i, j)])).collect())
            .collect();
        self.render(&cells)
    }

    /// Formats a DoF vector as one row per particle (`stride` entries each).
    pub fn dofs(&self, values: &[Scalar], stride: usize) -> String {
        assert!(stride > 0, "stride must be positive");
        let cells: Vec<Vec<String>> = values
            .chunks(stride)
            .map(|row| row.iter().map(|&v| self.scalar(v)).collect())
            .collect();
        self.render(&cells)
    }

    fn render(&self, cells: &[Vec<String>]) -> String {
        let width = if self.align_cols {
            cells.iter().flatten().map(|c| c.len()).max().unwrap_or(0)
        } else {
            0
        };
        cells
            .iter()
            .map(|row| {
                let body = row
                    .iter()
                    .map(|c| format!("{c:>width$}"))
                    .collect::<Vec<_>>()
                    .join(&self.col_separator);
                format!("{}{}{}", self.row_prefix, body, self.row_suffix)
            })
            .collect::<Vec<_>>()
            .join(&self.row_separator)
    }
}

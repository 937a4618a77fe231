use alloc::vec::Vec;

use crate::error::{MatrixError, Result};
use crate::layout::require_shape;
use crate::traits::Scalar;

use super::DenseMatrix;

impl<T: Scalar> DenseMatrix<T> {
    fn check_span(&self, i: usize, j: usize, rows: usize, cols: usize) -> Result<()> {
        let fits = |start: usize, len: usize, limit: usize| {
            start.checked_add(len).is_some_and(|end| end <= limit)
        };
        if fits(i, rows, self.nrows) && fits(j, cols, self.ncols) {
            Ok(())
        } else {
            Err(MatrixError::OutOfBounds {
                row: i.saturating_add(rows.saturating_sub(1)),
                col: j.saturating_add(cols.saturating_sub(1)),
                nrows: self.nrows,
                ncols: self.ncols,
            })
        }
    }

    /// Copy of row `i`.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let m = DenseMatrix::from_rows(2, 3, &[1, 2, 3, 4, 5, 6]);
    /// assert_eq!(m.row(1).unwrap(), vec![4, 5, 6]);
    /// assert!(m.row(2).is_err());
    /// ```
    pub fn row(&self, i: usize) -> Result<Vec<T>> {
        self.check_span(i, 0, 1, self.ncols)?;
        Ok((0..self.ncols).map(|j| self[(i, j)]).collect())
    }

    /// Copy of column `j`, a contiguous slice of the column-major storage.
    pub fn col(&self, j: usize) -> Result<Vec<T>> {
        self.check_span(0, j, self.nrows, 1)?;
        let start = j * self.nrows;
        Ok(self.data[start..start + self.nrows].to_vec())
    }

    /// Overwrite row `i`; `values` must have `ncols` entries.
    pub fn set_row(&mut self, i: usize, values: &[T]) -> Result<()> {
        self.check_span(i, 0, 1, self.ncols)?;
        require_shape((1, self.ncols), (1, values.len()))?;
        for (j, &v) in values.iter().enumerate() {
            self[(i, j)] = v;
        }
        Ok(())
    }

    /// Overwrite column `j`; `values` must have `nrows` entries.
    pub fn set_col(&mut self, j: usize, values: &[T]) -> Result<()> {
        self.check_span(0, j, self.nrows, 1)?;
        require_shape((self.nrows, 1), (values.len(), 1))?;
        let start = j * self.nrows;
        self.data[start..start + self.nrows].copy_from_slice(values);
        Ok(())
    }

    /// Extract the `rows x cols` sub-matrix starting at `(i, j)`.
    ///
    /// Fails with `OutOfBounds` if the block extends past the matrix.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let m = DenseMatrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
    /// let b = m.block(1, 1, 2, 2).unwrap();
    /// assert_eq!(b[(0, 0)], 4.0);
    /// assert_eq!(b[(1, 1)], 8.0);
    /// assert!(m.block(2, 2, 2, 1).is_err());
    /// ```
    pub fn block(&self, i: usize, j: usize, rows: usize, cols: usize) -> Result<Self> {
        self.check_span(i, j, rows, cols)?;
        Ok(DenseMatrix::from_fn(rows, cols, |r, c| self[(i + r, j + c)]))
    }

    /// Write `src` into self with its top-left corner at `(i, j)`.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let mut m = DenseMatrix::<f64>::zeros(3, 3);
    /// let patch = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// m.set_block(1, 1, &patch).unwrap();
    /// assert_eq!(m[(1, 1)], 1.0);
    /// assert_eq!(m[(2, 2)], 4.0);
    /// ```
    pub fn set_block(&mut self, i: usize, j: usize, src: &DenseMatrix<T>) -> Result<()> {
        self.check_span(i, j, src.nrows, src.ncols)?;
        for c in 0..src.ncols {
            for r in 0..src.nrows {
                self[(i + r, j + c)] = src[(r, c)];
            }
        }
        Ok(())
    }

    /// Rows in reverse order (mirror about the horizontal axis).
    pub fn flip_rows(&self) -> Self {
        let m = self.nrows;
        DenseMatrix::from_fn(m, self.ncols, |i, j| self[(m - 1 - i, j)])
    }

    /// Columns in reverse order (mirror about the vertical axis).
    pub fn flip_cols(&self) -> Self {
        let n = self.ncols;
        DenseMatrix::from_fn(self.nrows, n, |i, j| self[(i, n - 1 - j)])
    }

    /// Both flips at once: element `(i, j)` moves to `(m-1-i, n-1-j)`.
    pub fn reverse(&self) -> Self {
        let mut data = self.data.clone();
        data.reverse();
        DenseMatrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat4x5() -> DenseMatrix<i32> {
        DenseMatrix::from_fn(4, 5, |i, j| (i * 5 + j) as i32)
    }

    #[test]
    fn rows_and_columns() {
        let mut m = mat4x5();
        assert_eq!(m.row(2).unwrap(), alloc::vec![10, 11, 12, 13, 14]);
        assert_eq!(m.col(4).unwrap(), alloc::vec![4, 9, 14, 19]);
        m.set_row(0, &[9, 9, 9, 9, 9]).unwrap();
        m.set_col(1, &[-1, -1, -1, -1]).unwrap();
        assert_eq!(m.row(0).unwrap(), alloc::vec![9, -1, 9, 9, 9]);
        assert_eq!(m[(3, 1)], -1);
    }

    #[test]
    fn row_and_column_bounds() {
        let mut m = mat4x5();
        assert!(matches!(
            m.row(4),
            Err(MatrixError::OutOfBounds { row: 4, nrows: 4, .. })
        ));
        assert!(matches!(m.col(5), Err(MatrixError::OutOfBounds { col: 5, .. })));
        assert_eq!(
            m.set_row(1, &[1, 2]),
            Err(MatrixError::ShapeMismatch {
                expected: (1, 5),
                got: (1, 2)
            })
        );
        assert!(m.set_col(0, &[1, 2, 3, 4, 5]).is_err());
        assert_eq!(m, mat4x5());
    }

    #[test]
    fn block_extract() {
        let m = mat4x5();
        let b = m.block(1, 1, 2, 3).unwrap();
        assert_eq!(b[(0, 0)], 6);
        assert_eq!(b[(0, 2)], 8);
        assert_eq!(b[(1, 0)], 11);
        assert_eq!(b[(1, 2)], 13);
        assert_eq!(m.block(0, 0, 4, 5).unwrap(), m);
    }

    #[test]
    fn block_out_of_bounds() {
        let m = mat4x5();
        assert_eq!(
            m.block(3, 3, 2, 3),
            Err(MatrixError::OutOfBounds {
                row: 4,
                col: 5,
                nrows: 4,
                ncols: 5
            })
        );
        assert!(m.block(usize::MAX, 0, 2, 1).is_err());
    }

    #[test]
    fn block_roundtrip() {
        let m = mat4x5();
        let b = m.block(1, 2, 2, 3).unwrap();
        let mut m2 = DenseMatrix::zeros(4, 5);
        m2.set_block(1, 2, &b).unwrap();
        assert_eq!(m2.block(1, 2, 2, 3).unwrap(), b);
        assert_eq!(m2[(0, 0)], 0);
        assert!(m2.set_block(3, 0, &b).is_err());
    }

    #[test]
    fn flips() {
        let m = DenseMatrix::from_rows(2, 3, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(m.flip_rows(), DenseMatrix::from_rows(2, 3, &[4, 5, 6, 1, 2, 3]));
        assert_eq!(m.flip_cols(), DenseMatrix::from_rows(2, 3, &[3, 2, 1, 6, 5, 4]));
        assert_eq!(m.reverse(), m.flip_rows().flip_cols());
        assert_eq!(m.reverse(), DenseMatrix::from_rows(2, 3, &[6, 5, 4, 3, 2, 1]));
    }
}

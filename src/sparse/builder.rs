use alloc::vec;
use alloc::vec::Vec;

use crate::error::{MatrixError, Result};
use crate::traits::Scalar;

use super::SparseMatrix;

/// Coordinate-list accumulator for [`SparseMatrix`].
///
/// Entries can arrive in any order. Duplicates at the same position are
/// summed and entries that end up exactly zero are dropped when the CSR
/// matrix is built.
///
/// ```
/// use matrica::{MatrixLayout, SparseBuilder};
///
/// let mut b = SparseBuilder::new(2, 3);
/// b.push(1, 2, 4.0_f64).unwrap();
/// b.push(0, 0, 1.0).unwrap();
/// b.push(1, 2, 0.5).unwrap();
/// let s = b.build();
/// assert_eq!(s.nnz(), 2);
/// assert_eq!(s.get(1, 2).unwrap(), 4.5);
/// ```
#[derive(Debug, Clone)]
pub struct SparseBuilder<T> {
    nrows: usize,
    ncols: usize,
    entries: Vec<(usize, usize, T)>,
}

impl<T: Scalar> SparseBuilder<T> {
    /// Empty accumulator for an `nrows x ncols` matrix.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            entries: Vec::new(),
        }
    }

    /// Queue `value` at `(row, col)`, or `OutOfBounds`.
    pub fn push(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.nrows || col >= self.ncols {
            return Err(MatrixError::OutOfBounds {
                row,
                col,
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        self.entries.push((row, col, value));
        Ok(())
    }

    /// Number of queued entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort once and emit CSR.
    pub fn build(mut self) -> SparseMatrix<T> {
        self.entries.sort_by_key(|&(r, c, _)| (r, c));

        let mut merged: Vec<(usize, usize, T)> = Vec::with_capacity(self.entries.len());
        for (r, c, v) in self.entries {
            match merged.last_mut() {
                Some(last) if last.0 == r && last.1 == c => last.2 = last.2 + v,
                _ => merged.push((r, c, v)),
            }
        }
        merged.retain(|e| !e.2.is_zero());

        let mut row_offsets = vec![0usize; self.nrows + 1];
        for &(r, _, _) in &merged {
            row_offsets[r + 1] += 1;
        }
        for i in 1..=self.nrows {
            row_offsets[i] += row_offsets[i - 1];
        }

        let (col_indices, values) = merged.into_iter().map(|(_, c, v)| (c, v)).unzip();
        SparseMatrix {
            nrows: self.nrows,
            ncols: self.ncols,
            values,
            col_indices,
            row_offsets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MatrixLayout;

    #[test]
    fn push_checks_bounds() {
        let mut b = SparseBuilder::<i64>::new(2, 2);
        assert_eq!(
            b.push(2, 0, 1),
            Err(MatrixError::OutOfBounds {
                row: 2,
                col: 0,
                nrows: 2,
                ncols: 2
            })
        );
        assert!(b.is_empty());
    }

    #[test]
    fn duplicates_summed_and_cancellations_dropped() {
        let mut b = SparseBuilder::new(3, 3);
        b.push(2, 1, 5_i64).unwrap();
        b.push(0, 2, 3).unwrap();
        b.push(0, 2, -3).unwrap();
        b.push(1, 1, 2).unwrap();
        b.push(2, 1, 1).unwrap();
        b.push(0, 0, 1).unwrap();
        assert_eq!(b.len(), 6);
        let s = b.build();
        assert_eq!(s.nnz(), 3);
        assert_eq!(s.get(0, 2).unwrap(), 0);
        assert_eq!(s.get(2, 1).unwrap(), 6);
        assert_eq!(s.row_offsets, vec![0, 1, 2, 3]);
        assert_eq!(s.col_indices, vec![0, 1, 1]);
    }

    #[test]
    fn empty_rows() {
        let mut b = SparseBuilder::new(4, 2);
        b.push(3, 1, 1.0_f64).unwrap();
        let s = b.build();
        assert_eq!(s.row_offsets, vec![0, 0, 0, 0, 1]);
        assert_eq!(s.trace(), Err(MatrixError::ShapeMismatch { expected: (4, 4), got: (4, 2) }));
    }
}

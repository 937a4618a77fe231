pub mod aliases;
mod block;
mod convert;
mod linalg;
mod ops;
mod square;

pub use aliases::*;
pub use linalg::{DenseLu, DenseSymmetricEigen};
pub(crate) use linalg::gram_spectral_norm;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::error::{MatrixError, Result};
use crate::layout::{fmt_rows, MatrixLayout};
use crate::traits::{Element, MatrixMut, MatrixRef, Scalar};

/// Dense, heap-allocated matrix of any shape.
///
/// Column-major `Vec<T>` storage, dimensions set at runtime. This is the
/// reference layout: every other layout converts into it with
/// [`MatrixLayout::to_dense`] and must agree with it.
///
/// # Examples
///
/// ```
/// use matrica::{DenseMatrix, MatrixLayout};
///
/// let a = DenseMatrix::from_rows(2, 2, &[4.0_f64, 3.0, 6.0, 3.0]);
/// assert_eq!(a[(0, 1)], 3.0);
/// assert_eq!(a.det().unwrap(), -6.0);
/// assert_eq!(a.trace().unwrap(), 7.0);
/// assert_eq!(a.norm_inf().unwrap(), 9.0);
///
/// let b = DenseMatrix::<f64>::eye(3);
/// assert_eq!(b[(0, 0)], 1.0);
/// assert_eq!(b[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> DenseMatrix<T> {
    /// Create an `nrows x ncols` matrix of zeros.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let m = DenseMatrix::<f64>::zeros(2, 3);
    /// assert_eq!(m.nrows(), 2);
    /// assert_eq!(m.ncols(), 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create a matrix filled with a given value.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let m = DenseMatrix::fill(2, 3, 7_i64);
    /// assert_eq!(m[(0, 0)], 7);
    /// assert_eq!(m[(1, 2)], 7);
    /// ```
    pub fn fill(nrows: usize, ncols: usize, value: T) -> Self {
        Self {
            data: vec![value; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create an `n x n` identity matrix.
    pub fn eye(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Panics if `row_major.len() != nrows * ncols`.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let m = DenseMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        let mut data = vec![T::zero(); nrows * ncols];
        for i in 0..nrows {
            for j in 0..ncols {
                data[j * nrows + i] = row_major[i * ncols + j];
            }
        }
        Self { data, nrows, ncols }
    }

    /// Create a matrix from column vectors.
    ///
    /// Every column must have the same length; a ragged column yields
    /// `ShapeMismatch`. No columns gives a `0 x 0` matrix.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let m = DenseMatrix::from_columns(&[[1, 3], [2, 4]]).unwrap();
    /// assert_eq!(m[(0, 1)], 2);
    /// assert_eq!(m[(1, 0)], 3);
    /// ```
    pub fn from_columns<C: AsRef<[T]>>(columns: &[C]) -> Result<Self> {
        let ncols = columns.len();
        let nrows = columns.first().map_or(0, |c| c.as_ref().len());
        let mut data = Vec::with_capacity(nrows * ncols);
        for column in columns {
            let column = column.as_ref();
            if column.len() != nrows {
                return Err(MatrixError::ShapeMismatch {
                    expected: (nrows, 1),
                    got: (column.len(), 1),
                });
            }
            data.extend_from_slice(column);
        }
        Ok(Self { data, nrows, ncols })
    }

    /// Create a matrix from an owned `Vec<T>` in column-major order.
    ///
    /// Panics if `data.len() != nrows * ncols`.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// // Column-major: col0=[1,3], col1=[2,4]
    /// let m = DenseMatrix::from_vec(2, 2, vec![1.0, 3.0, 2.0, 4.0]);
    /// assert_eq!(m[(0, 0)], 1.0);
    /// assert_eq!(m[(1, 1)], 4.0);
    /// ```
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "vec length {} does not match {}x{} matrix",
            data.len(),
            nrows,
            ncols,
        );
        Self { data, nrows, ncols }
    }
}

impl<T> DenseMatrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Column-major view of the elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let m = DenseMatrix::from_fn(3, 3, |i, j| if i == j { 1.0_f64 } else { 0.0 });
    /// assert_eq!(m[(0, 0)], 1.0);
    /// assert_eq!(m[(0, 1)], 0.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for DenseMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[col * self.nrows + row]
    }
}

impl<T> MatrixMut<T> for DenseMatrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[col * self.nrows + row]
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[col * self.nrows + row]
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[col * self.nrows + row]
    }
}

// ── MatrixLayout ────────────────────────────────────────────────────

impl<T: Element> MatrixLayout<T> for DenseMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_bounds(row, col)?;
        Ok(self[(row, col)])
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_bounds(row, col)?;
        self[(row, col)] = value;
        Ok(())
    }

    fn set_all(&mut self, value: T) -> Result<()> {
        self.data.iter_mut().for_each(|x| *x = value);
        Ok(())
    }

    fn for_each_stored(&self, f: &mut dyn FnMut(usize, usize, T)) {
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                f(i, j, self.data[j * self.nrows + i]);
            }
        }
    }

    fn to_dense(&self) -> DenseMatrix<T> {
        self.clone()
    }

    fn det(&self) -> Result<T> {
        self.det_direct()
    }
}

impl<T: core::fmt::Display> core::fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt_rows(f, self.nrows, self.ncols, |i, j| &self[(i, j)])
    }
}

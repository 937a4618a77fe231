//! Compressed sparse row layout.
//!
//! Only nonzero entries are stored, row by row, with the column indices of
//! each row kept sorted. The kernel defaults visit stored values only, so
//! `trace`, `norm_inf` and `norm_frobenius` cost O(nnz); the determinant and
//! operator norm go through a dense copy.

mod builder;

pub use builder::SparseBuilder;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Add, Mul, Sub};

use crate::dense::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::layout::{fmt_rows, require_shape, MatrixLayout};
use crate::traits::{CastElement, Element, Real, Scalar};

/// CSR matrix.
///
/// Row `i` owns `values[row_offsets[i]..row_offsets[i + 1]]`, with matching
/// column indices in `col_indices`.
///
/// ```
/// use matrica::{DenseMatrix, MatrixLayout, SparseMatrix};
///
/// let a = DenseMatrix::from_rows(2, 2, &[4.0_f64, 0.0, 0.0, -2.0]);
/// let mut s = SparseMatrix::from_dense(&a);
/// assert_eq!(s.nnz(), 2);
/// s.set(0, 1, 1.0).unwrap();
/// assert_eq!(s.nnz(), 3);
/// assert_eq!(s.det().unwrap(), -8.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix<T> {
    nrows: usize,
    ncols: usize,
    values: Vec<T>,
    col_indices: Vec<usize>,
    row_offsets: Vec<usize>,
}

impl<T: Scalar> SparseMatrix<T> {
    /// `nrows x ncols` matrix with no stored entries.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            values: Vec::new(),
            col_indices: Vec::new(),
            row_offsets: vec![0; nrows + 1],
        }
    }

    /// Compress the nonzeros of a dense matrix.
    pub fn from_dense(a: &DenseMatrix<T>) -> Self {
        let mut out = Self::new(a.nrows(), a.ncols());
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                let v = a[(i, j)];
                if !v.is_zero() {
                    out.values.push(v);
                    out.col_indices.push(j);
                }
            }
            out.row_offsets[i + 1] = out.values.len();
        }
        out
    }

    /// Row-major values; panics if `data.len() != nrows * ncols`.
    pub fn from_rows(nrows: usize, ncols: usize, data: &[T]) -> Self {
        Self::from_dense(&DenseMatrix::from_rows(nrows, ncols, data))
    }

    /// Number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Stored `(col, value)` pairs of row `i`, ascending by column, or
    /// `OutOfBounds`.
    ///
    /// ```
    /// use matrica::SparseMatrix;
    /// let s = SparseMatrix::from_rows(2, 3, &[0, 5, 7, 0, 0, 0]);
    /// assert_eq!(s.row(0).unwrap().collect::<Vec<_>>(), vec![(1, 5), (2, 7)]);
    /// assert_eq!(s.row(1).unwrap().count(), 0);
    /// assert!(s.row(2).is_err());
    /// ```
    pub fn row(&self, i: usize) -> Result<impl Iterator<Item = (usize, T)> + '_> {
        if i >= self.nrows {
            return Err(MatrixError::OutOfBounds {
                row: i,
                col: 0,
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        Ok(self.stored_row(i))
    }

    /// Unchecked form of [`row`](Self::row); callers guarantee `i < nrows`.
    fn stored_row(&self, i: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let range = self.row_offsets[i]..self.row_offsets[i + 1];
        self.col_indices[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    /// `Ok(position)` of a stored entry, or `Err(position)` where it would be
    /// inserted.
    fn locate(&self, row: usize, col: usize) -> core::result::Result<usize, usize> {
        let start = self.row_offsets[row];
        let end = self.row_offsets[row + 1];
        self.col_indices[start..end]
            .binary_search(&col)
            .map(|p| start + p)
            .map_err(|p| start + p)
    }

    /// `A x` in O(nnz).
    pub fn mul_vec(&self, x: &[T]) -> Result<Vec<T>> {
        require_shape((self.ncols, 1), (x.len(), 1))?;
        Ok((0..self.nrows)
            .map(|i| self.stored_row(i).fold(T::zero(), |acc, (j, v)| acc + v * x[j]))
            .collect())
    }

    /// Transpose by counting sort on the column indices, O(nnz + ncols).
    pub fn transpose(&self) -> Self {
        let mut row_offsets = vec![0usize; self.ncols + 1];
        for &c in &self.col_indices {
            row_offsets[c + 1] += 1;
        }
        for i in 1..=self.ncols {
            row_offsets[i] += row_offsets[i - 1];
        }
        let mut next = row_offsets.clone();
        let mut col_indices = vec![0usize; self.nnz()];
        let mut values = vec![T::zero(); self.nnz()];
        for i in 0..self.nrows {
            for (j, v) in self.stored_row(i) {
                let p = next[j];
                col_indices[p] = i;
                values[p] = v;
                next[j] += 1;
            }
        }
        Self {
            nrows: self.ncols,
            ncols: self.nrows,
            values,
            col_indices,
            row_offsets,
        }
    }

    /// Structural and numeric symmetry.
    pub fn is_symmetric(&self) -> bool {
        self.nrows == self.ncols && self.transpose() == *self
    }

    fn map_values<U: Scalar>(&self, f: impl Fn(T) -> U) -> SparseMatrix<U> {
        let mut out = SparseMatrix::new(self.nrows, self.ncols);
        for i in 0..self.nrows {
            for (j, v) in self.stored_row(i) {
                let w = f(v);
                if !w.is_zero() {
                    out.values.push(w);
                    out.col_indices.push(j);
                }
            }
            out.row_offsets[i + 1] = out.values.len();
        }
        out
    }

    /// Multiply every entry by `k`; entries that become zero are dropped.
    pub fn scale(&self, k: T) -> Self {
        self.map_values(|v| v * k)
    }

    /// Convert to another scalar domain; entries that become zero are dropped.
    pub fn cast<U: Scalar>(&self) -> SparseMatrix<U>
    where
        T: CastElement<U>,
    {
        self.map_values(<T as CastElement<U>>::cast_element)
    }

    /// Row-wise merge of two sorted patterns.
    fn merge(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Result<Self> {
        require_shape((self.nrows, self.ncols), (rhs.nrows, rhs.ncols))?;
        let mut out = Self::new(self.nrows, self.ncols);
        let push = |out: &mut Self, j: usize, v: T| {
            if !v.is_zero() {
                out.values.push(v);
                out.col_indices.push(j);
            }
        };
        for i in 0..self.nrows {
            let mut a = self.stored_row(i).peekable();
            let mut b = rhs.stored_row(i).peekable();
            loop {
                match (a.peek().copied(), b.peek().copied()) {
                    (Some((ja, va)), Some((jb, vb))) if ja == jb => {
                        push(&mut out, ja, f(va, vb));
                        a.next();
                        b.next();
                    }
                    (Some((ja, va)), Some((jb, _))) if ja < jb => {
                        push(&mut out, ja, f(va, T::zero()));
                        a.next();
                    }
                    (Some((ja, va)), None) => {
                        push(&mut out, ja, f(va, T::zero()));
                        a.next();
                    }
                    (_, Some((jb, vb))) => {
                        push(&mut out, jb, f(T::zero(), vb));
                        b.next();
                    }
                    (None, None) => break,
                }
            }
            out.row_offsets[i + 1] = out.values.len();
        }
        Ok(out)
    }

    /// Element-wise sum, or `ShapeMismatch`.
    pub fn try_add(&self, rhs: &Self) -> Result<Self> {
        self.merge(rhs, |a, b| a + b)
    }

    /// Element-wise difference, or `ShapeMismatch`.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self> {
        self.merge(rhs, |a, b| a - b)
    }

    /// Sparse product `(M×N) * (N×P) → (M×P)`, or `ShapeMismatch`.
    ///
    /// Row by row with a dense accumulator over the touched columns, so the
    /// cost follows the number of multiplications rather than `M·N·P`.
    /// Sums that cancel to zero are not stored.
    ///
    /// ```
    /// use matrica::{MatrixLayout, SparseMatrix};
    /// let a = SparseMatrix::from_rows(2, 3, &[1, 0, 2, 0, 3, 0]);
    /// let b = SparseMatrix::from_rows(3, 2, &[0, 1, 4, 0, 5, 0]);
    /// let c = a.try_matmul(&b).unwrap();
    /// assert_eq!(c.nnz(), 3);
    /// assert_eq!(c.get(0, 0).unwrap(), 10);
    /// assert_eq!(c.get(1, 0).unwrap(), 12);
    /// ```
    pub fn try_matmul(&self, rhs: &Self) -> Result<Self> {
        if self.ncols != rhs.nrows {
            return Err(MatrixError::ShapeMismatch {
                expected: (self.ncols, rhs.ncols),
                got: (rhs.nrows, rhs.ncols),
            });
        }
        let mut out = Self::new(self.nrows, rhs.ncols);
        let mut acc = vec![T::zero(); rhs.ncols];
        let mut touched = vec![false; rhs.ncols];
        let mut cols: Vec<usize> = Vec::new();
        for i in 0..self.nrows {
            for (k, a) in self.stored_row(i) {
                for (j, b) in rhs.stored_row(k) {
                    if !touched[j] {
                        touched[j] = true;
                        cols.push(j);
                    }
                    acc[j] = acc[j] + a * b;
                }
            }
            cols.sort_unstable();
            for &j in &cols {
                if !acc[j].is_zero() {
                    out.values.push(acc[j]);
                    out.col_indices.push(j);
                }
                acc[j] = T::zero();
                touched[j] = false;
            }
            cols.clear();
            out.row_offsets[i + 1] = out.values.len();
        }
        Ok(out)
    }

    /// Apply `f` to every element, stored or not.
    ///
    /// When `f(0) == 0` only stored entries are visited; otherwise the result
    /// stores every position.
    ///
    /// ```
    /// use matrica::{MatrixLayout, SparseMatrix};
    /// let s = SparseMatrix::from_rows(2, 2, &[0, 3, 0, 0]);
    /// assert_eq!(s.map(|x| x * 2).nnz(), 1);
    /// assert_eq!(s.map(|x| x + 1).nnz(), 4);
    /// ```
    pub fn map<U: Scalar>(&self, f: impl Fn(T) -> U) -> SparseMatrix<U> {
        let background = f(T::zero());
        if background.is_zero() {
            return self.map_values(f);
        }
        let mut dense = DenseMatrix::fill(self.nrows, self.ncols, background);
        for i in 0..self.nrows {
            for (j, v) in self.stored_row(i) {
                dense[(i, j)] = f(v);
            }
        }
        SparseMatrix::from_dense(&dense)
    }
}

impl<T: Element> SparseMatrix<T> {
    /// Entry-wise magnitude; the pattern is unchanged.
    pub fn abs(&self) -> SparseMatrix<Real<T>> {
        self.map_values(T::magnitude)
    }
}

impl<T: Element> MatrixLayout<T> for SparseMatrix<T> {
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
        Ok(match self.locate(row, col) {
            Ok(p) => self.values[p],
            Err(_) => T::zero(),
        })
    }

    /// Overwrite a stored entry, insert a new one, or remove the entry when
    /// `value` is exactly zero. Insertion and removal shift the tail, O(nnz).
    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_bounds(row, col)?;
        match (self.locate(row, col), value.is_zero()) {
            (Ok(p), false) => self.values[p] = value,
            (Ok(p), true) => {
                self.values.remove(p);
                self.col_indices.remove(p);
                self.row_offsets[row + 1..].iter_mut().for_each(|o| *o -= 1);
            }
            (Err(_), true) => {}
            (Err(p), false) => {
                tracing::trace!(row, col, nnz = self.nnz(), "sparse fill-in");
                self.values.insert(p, value);
                self.col_indices.insert(p, col);
                self.row_offsets[row + 1..].iter_mut().for_each(|o| *o += 1);
            }
        }
        Ok(())
    }

    fn set_all(&mut self, value: T) -> Result<()> {
        if value.is_zero() {
            *self = Self::new(self.nrows, self.ncols);
        } else {
            let (r, c) = (self.nrows, self.ncols);
            self.values = vec![value; r * c];
            self.col_indices = (0..r).flat_map(|_| 0..c).collect();
            self.row_offsets = (0..=r).map(|i| i * c).collect();
        }
        Ok(())
    }

    fn for_each_stored(&self, f: &mut dyn FnMut(usize, usize, T)) {
        for i in 0..self.nrows {
            for (j, v) in self.stored_row(i) {
                f(i, j, v);
            }
        }
    }
}

impl<T: core::fmt::Display + Element> core::fmt::Display for SparseMatrix<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let dense = self.to_dense();
        fmt_rows(f, self.nrows, self.ncols, |i, j| dense[(i, j)])
    }
}

impl<T: Scalar> Add for &SparseMatrix<T> {
    type Output = SparseMatrix<T>;
    fn add(self, rhs: Self) -> SparseMatrix<T> {
        match self.try_add(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T: Scalar> Sub for &SparseMatrix<T> {
    type Output = SparseMatrix<T>;
    fn sub(self, rhs: Self) -> SparseMatrix<T> {
        match self.try_sub(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T: Scalar> Mul for &SparseMatrix<T> {
    type Output = SparseMatrix<T>;
    fn mul(self, rhs: Self) -> SparseMatrix<T> {
        match self.try_matmul(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

//! Tridiagonal layout: three bands of length `n`.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Add, Sub};

use crate::dense::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::layout::{checked_total, fmt_rows, require_nonempty, require_shape, MatrixLayout};
use crate::traits::{CastElement, Element, Real, Scalar};

/// Square matrix with nonzeros only on the main, sub- and super-diagonal.
///
/// `lower[i]` holds `A(i, i-1)`, `diag[i]` holds `A(i, i)` and `upper[i]` holds
/// `A(i, i+1)`. `lower[0]` and `upper[n-1]` are always zero.
///
/// ```
/// use matrica::{MatrixLayout, TridiagonalMatrix};
///
/// let t = TridiagonalMatrix::from_bands(&[1, 1], &[2, 2, 2], &[1, 1]).unwrap();
/// assert_eq!(t.det().unwrap(), 4);
/// assert_eq!(t.get(0, 2).unwrap(), 0);
/// assert!(t.is_symmetric());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalMatrix<T> {
    lower: Vec<T>,
    diag: Vec<T>,
    upper: Vec<T>,
}

const OUT_OF_BAND: MatrixError = MatrixError::InvalidOperation {
    reason: "entry outside the tridiagonal band",
};

#[inline]
fn in_band(row: usize, col: usize) -> bool {
    row.abs_diff(col) <= 1
}

impl<T: Scalar> TridiagonalMatrix<T> {
    /// `n x n` zero matrix.
    pub fn new(n: usize) -> Self {
        Self {
            lower: vec![T::zero(); n],
            diag: vec![T::zero(); n],
            upper: vec![T::zero(); n],
        }
    }

    /// Build from the sub-diagonal (`n-1`), diagonal (`n`) and
    /// super-diagonal (`n-1`).
    pub fn from_bands(lower: &[T], diag: &[T], upper: &[T]) -> Result<Self> {
        let n = diag.len();
        let off = n.saturating_sub(1);
        require_shape((off, 1), (lower.len(), 1))?;
        require_shape((off, 1), (upper.len(), 1))?;
        let mut out = Self::new(n);
        out.diag.copy_from_slice(diag);
        if n > 0 {
            out.lower[1..].copy_from_slice(lower);
            out.upper[..off].copy_from_slice(upper);
        }
        Ok(out)
    }

    /// Build from `n * n` row-major values, rejecting out-of-band nonzeros.
    pub fn from_rows(n: usize, data: &[T]) -> Result<Self> {
        require_shape((n * n, 1), (data.len(), 1))?;
        Self::from_dense(&DenseMatrix::from_rows(n, n, data))
    }

    /// Copy the three bands of a square dense matrix.
    ///
    /// Fails with `InvalidOperation` if anything outside the band is nonzero.
    pub fn from_dense(a: &DenseMatrix<T>) -> Result<Self> {
        require_shape((a.nrows(), a.nrows()), (a.nrows(), a.ncols()))?;
        let n = a.nrows();
        let mut out = Self::new(n);
        for j in 0..n {
            for i in 0..n {
                let v = a[(i, j)];
                if i == j {
                    out.diag[i] = v;
                } else if i == j + 1 {
                    out.lower[i] = v;
                } else if j == i + 1 {
                    out.upper[i] = v;
                } else if !v.is_zero() {
                    return Err(OUT_OF_BAND);
                }
            }
        }
        Ok(out)
    }

    /// Dimension `n`.
    #[inline]
    pub fn dim(&self) -> usize {
        self.diag.len()
    }

    /// Main diagonal, length `n`.
    pub fn diagonal(&self) -> &[T] {
        &self.diag
    }

    /// Sub-diagonal `A(i+1, i)`, length `n-1`.
    pub fn sub_diagonal(&self) -> &[T] {
        self.lower.get(1..).unwrap_or(&[])
    }

    /// Super-diagonal `A(i, i+1)`, length `n-1`.
    pub fn super_diagonal(&self) -> &[T] {
        let off = self.dim().saturating_sub(1);
        &self.upper[..off]
    }

    /// True iff `A(i+1, i) == A(i, i+1)` for every `i`.
    pub fn is_symmetric(&self) -> bool {
        self.sub_diagonal() == self.super_diagonal()
    }

    /// Swap the sub- and super-diagonal.
    pub fn transpose(&self) -> Self {
        let n = self.dim();
        let mut out = Self::new(n);
        out.diag.copy_from_slice(&self.diag);
        for i in 1..n {
            out.lower[i] = self.upper[i - 1];
            out.upper[i - 1] = self.lower[i];
        }
        out
    }

    /// Multiply every entry by `k`.
    pub fn scale(&self, k: T) -> Self {
        self.map_bands(|x| x * k)
    }

    fn map_bands<U: Copy>(&self, f: impl Fn(T) -> U) -> TridiagonalMatrix<U> {
        TridiagonalMatrix {
            lower: self.lower.iter().map(|&x| f(x)).collect(),
            diag: self.diag.iter().map(|&x| f(x)).collect(),
            upper: self.upper.iter().map(|&x| f(x)).collect(),
        }
    }

    /// `A x` in O(n).
    pub fn mul_vec(&self, x: &[T]) -> Result<Vec<T>> {
        let n = self.dim();
        require_shape((n, 1), (x.len(), 1))?;
        Ok((0..n)
            .map(|i| {
                let mut s = self.diag[i] * x[i];
                if i > 0 {
                    s = s + self.lower[i] * x[i - 1];
                }
                if i + 1 < n {
                    s = s + self.upper[i] * x[i + 1];
                }
                s
            })
            .collect())
    }

    fn zip_bands(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Result<Self> {
        require_shape((self.dim(), self.dim()), (rhs.dim(), rhs.dim()))?;
        let zip = |a: &[T], b: &[T]| -> Vec<T> { a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect() };
        Ok(Self {
            lower: zip(&self.lower, &rhs.lower),
            diag: zip(&self.diag, &rhs.diag),
            upper: zip(&self.upper, &rhs.upper),
        })
    }

    /// Band-wise sum, or `ShapeMismatch`.
    pub fn try_add(&self, rhs: &Self) -> Result<Self> {
        self.zip_bands(rhs, |a, b| a + b)
    }

    /// Band-wise difference, or `ShapeMismatch`.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self> {
        self.zip_bands(rhs, |a, b| a - b)
    }

    /// Product of two tridiagonal matrices. The result is pentadiagonal, so
    /// it comes back dense.
    pub fn try_matmul(&self, rhs: &Self) -> Result<DenseMatrix<T>> {
        let n = self.dim();
        require_shape((n, n), (rhs.dim(), rhs.dim()))?;
        let mut out = DenseMatrix::zeros(n, n);
        for i in 0..n {
            let lo = i.saturating_sub(1);
            let hi = (i + 2).min(n);
            for k in lo..hi {
                let a = self.band(i, k);
                let klo = k.saturating_sub(1);
                let khi = (k + 2).min(n);
                for j in klo..khi {
                    out[(i, j)] = out[(i, j)] + a * rhs.band(k, j);
                }
            }
        }
        Ok(out)
    }

    /// In-band element; callers guarantee `|row - col| <= 1`.
    #[inline]
    fn band(&self, row: usize, col: usize) -> T {
        if row == col {
            self.diag[row]
        } else if row > col {
            self.lower[row]
        } else {
            self.upper[row]
        }
    }

    /// Apply `f` to every element; `InvalidOperation` unless `f(0) == 0`,
    /// since the entries outside the band would become `f(0)`.
    pub fn map<U: Scalar>(&self, f: impl Fn(T) -> U) -> Result<TridiagonalMatrix<U>> {
        if !f(T::zero()).is_zero() {
            return Err(MatrixError::InvalidOperation {
                reason: "mapping would fill outside the tridiagonal band",
            });
        }
        Ok(self.map_bands(f))
    }

    /// Convert to another scalar domain.
    pub fn cast<U>(&self) -> TridiagonalMatrix<U>
    where
        T: CastElement<U>,
        U: Copy,
    {
        self.map_bands(<T as CastElement<U>>::cast_element)
    }
}

impl<T: Element> TridiagonalMatrix<T> {
    /// Entry-wise magnitude.
    pub fn abs(&self) -> TridiagonalMatrix<Real<T>> {
        self.map_bands(T::magnitude)
    }

    fn continuant(&self) -> Option<T> {
        let mut prev = T::one();
        let mut cur = self.diag[0];
        for k in 1..self.dim() {
            let coupling = self.lower[k]
                .checked_product(self.upper[k - 1])?
                .checked_product(prev)?;
            let next = self.diag[k].checked_product(cur)?.checked_difference(coupling)?;
            prev = cur;
            cur = next;
        }
        Some(cur)
    }
}

impl<T: Element> MatrixLayout<T> for TridiagonalMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.diag.len()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.diag.len()
    }

    fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_bounds(row, col)?;
        Ok(if in_band(row, col) {
            self.band(row, col)
        } else {
            T::zero()
        })
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_bounds(row, col)?;
        if row == col {
            self.diag[row] = value;
        } else if row == col + 1 {
            self.lower[row] = value;
        } else if col == row + 1 {
            self.upper[row] = value;
        } else if !value.is_zero() {
            return Err(OUT_OF_BAND);
        }
        Ok(())
    }

    fn set_all(&mut self, value: T) -> Result<()> {
        if !value.is_zero() {
            return Err(MatrixError::InvalidOperation {
                reason: "a tridiagonal matrix can only be filled with zero",
            });
        }
        *self = Self::new(self.dim());
        Ok(())
    }

    fn for_each_stored(&self, f: &mut dyn FnMut(usize, usize, T)) {
        let n = self.dim();
        for i in 0..n {
            if i > 0 {
                f(i, i - 1, self.lower[i]);
            }
            f(i, i, self.diag[i]);
            if i + 1 < n {
                f(i, i + 1, self.upper[i]);
            }
        }
    }

    fn trace(&self) -> Result<T> {
        require_nonempty::<T, Self>(self, "trace")?;
        checked_total(&self.diag, "trace")
    }

    /// Continuant recurrence `f_k = d_k f_{k-1} - l_k u_{k-1} f_{k-2}`.
    ///
    /// If an integer step overflows, the dense kernel decides.
    fn det(&self) -> Result<T> {
        require_nonempty::<T, Self>(self, "determinant")?;
        match self.continuant() {
            Some(d) => Ok(d),
            None => self.to_dense().det(),
        }
    }
}

impl<T: core::fmt::Display + Element> core::fmt::Display for TridiagonalMatrix<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let n = self.dim();
        fmt_rows(f, n, n, |i, j| {
            if in_band(i, j) {
                self.band(i, j)
            } else {
                T::zero()
            }
        })
    }
}

impl<T: Scalar> Add for &TridiagonalMatrix<T> {
    type Output = TridiagonalMatrix<T>;
    fn add(self, rhs: Self) -> TridiagonalMatrix<T> {
        match self.try_add(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T: Scalar> Sub for &TridiagonalMatrix<T> {
    type Output = TridiagonalMatrix<T>;
    fn sub(self, rhs: Self) -> TridiagonalMatrix<T> {
        match self.try_sub(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TridiagonalMatrix<f64> {
        TridiagonalMatrix::from_bands(&[1.0, -2.0, 0.5], &[4.0, 3.0, 5.0, 2.0], &[2.0, 1.0, -1.0])
            .unwrap()
    }

    #[test]
    fn bands_round_trip() {
        let t = sample();
        assert_eq!(t.sub_diagonal(), &[1.0, -2.0, 0.5]);
        assert_eq!(t.super_diagonal(), &[2.0, 1.0, -1.0]);
        assert_eq!(t.get(1, 0).unwrap(), 1.0);
        assert_eq!(t.get(0, 1).unwrap(), 2.0);
        assert_eq!(t.get(3, 0).unwrap(), 0.0);
    }

    #[test]
    fn band_length_mismatch() {
        assert_eq!(
            TridiagonalMatrix::from_bands(&[1.0], &[1.0, 2.0, 3.0], &[1.0, 1.0]),
            Err(MatrixError::ShapeMismatch {
                expected: (2, 1),
                got: (1, 1)
            })
        );
    }

    #[test]
    fn continuant_matches_dense() {
        let t = sample();
        let dense = t.to_dense();
        let d = t.det().unwrap();
        assert!((d - dense.det().unwrap()).abs() < 1e-10);
    }

    #[test]
    fn integer_continuant_is_exact() {
        // [[2,-1,0],[-1,2,-1],[0,-1,2]] has determinant 4
        let t = TridiagonalMatrix::from_bands(&[-1_i64, -1], &[2, 2, 2], &[-1, -1]).unwrap();
        assert_eq!(t.det().unwrap(), 4);
        assert_eq!(t.trace().unwrap(), 6);
        assert_eq!(t.norm_inf().unwrap(), 4.0);
    }

    #[test]
    fn continuant_overflow_defers_to_dense() {
        let t = TridiagonalMatrix::from_bands(&[0_i32, 0], &[2000, 2000, 2000], &[0, 0]).unwrap();
        assert_eq!(t.det(), Err(MatrixError::Overflow { operation: "determinant" }));
        let t = TridiagonalMatrix::from_bands(&[65536_i32], &[65536, 65537], &[65536]).unwrap();
        assert_eq!(t.det(), Ok(65536));
    }

    #[test]
    fn map_and_abs() {
        let t = TridiagonalMatrix::from_bands(&[-1_i32, 2], &[3, -4, 5], &[6, -7]).unwrap();
        assert_eq!(t.abs().to_dense(), t.to_dense().map(|x| (x as f64).abs()));
        let neg = t.map(|x| -x).unwrap();
        assert_eq!(neg.super_diagonal(), &[-6, 7]);
        assert!(matches!(
            t.map(|x| x + 1),
            Err(MatrixError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn out_of_band_writes() {
        let mut t = TridiagonalMatrix::<f64>::new(3);
        t.set(2, 1, 7.0).unwrap();
        t.set(0, 2, 0.0).unwrap();
        assert_eq!(t.set(0, 2, 1.0), Err(OUT_OF_BAND));
        assert!(matches!(
            t.set_all(1.0),
            Err(MatrixError::InvalidOperation { .. })
        ));
        assert_eq!(t.get(2, 1).unwrap(), 7.0);
        t.set_all(0.0).unwrap();
        assert_eq!(t, TridiagonalMatrix::new(3));
    }

    #[test]
    fn from_rows_rejects_out_of_band() {
        assert_eq!(
            TridiagonalMatrix::from_rows(3, &[1, 0, 1, 0, 1, 0, 0, 0, 1]),
            Err(OUT_OF_BAND)
        );
        let t = TridiagonalMatrix::from_rows(2, &[1, 2, 3, 4]).unwrap();
        assert_eq!(t.det().unwrap(), -2);
    }

    #[test]
    fn transpose_and_symmetry() {
        let t = sample();
        assert!(!t.is_symmetric());
        let tt = t.transpose();
        assert_eq!(tt.to_dense(), t.to_dense().transpose());
        let s = t.try_add(&tt).unwrap();
        assert!(s.is_symmetric());
    }

    #[test]
    fn mul_vec_and_matmul_agree_with_dense() {
        let t = sample();
        let x = [1.0, 2.0, -1.0, 0.5];
        assert_eq!(t.mul_vec(&x).unwrap(), t.to_dense().mul_vec(&x).unwrap());
        let p = t.try_matmul(&t.transpose()).unwrap();
        let q = t.to_dense().try_matmul(&t.transpose().to_dense()).unwrap();
        assert!(p.approx_eq(&q, 1e-12));
    }

    #[test]
    fn operator_norm_uses_gram() {
        let t = sample();
        let a = t.norm_operator().unwrap();
        let b = t.to_dense().norm_operator().unwrap();
        assert!((a - b).abs() < 1e-10);
        assert!(a <= t.norm_frobenius().unwrap() + 1e-12);
    }

    #[test]
    fn empty() {
        let t = TridiagonalMatrix::<f64>::from_bands(&[], &[], &[]).unwrap();
        assert!(t.sub_diagonal().is_empty());
        assert!(matches!(t.det(), Err(MatrixError::UndefinedOnEmpty { .. })));
    }
}

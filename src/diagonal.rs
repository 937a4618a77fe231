//! Diagonal layout: one stored entry per row.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Add, Mul, Sub};

use num_traits::{Float, One, Zero};

use crate::config::KernelConfig;
use crate::dense::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::layout::{checked_total, fmt_rows, require_nonempty, require_shape, MatrixLayout};
use crate::traits::{CastElement, Element, Real, Scalar};

/// Square matrix whose off-diagonal entries are structurally zero.
///
/// Determinant, trace and all three norms are O(n). Writes that would put a
/// nonzero off the diagonal are refused with `InvalidOperation`.
///
/// ```
/// use matrica::{DiagonalMatrix, MatrixError, MatrixLayout};
///
/// let mut d = DiagonalMatrix::from_diagonal(vec![2.0_f64, -3.0, 0.5]);
/// assert_eq!(d.det().unwrap(), -3.0);
/// assert_eq!(d.norm_operator().unwrap(), 3.0);
/// assert_eq!(d.get(0, 1).unwrap(), 0.0);
/// assert!(matches!(d.set(0, 1, 1.0), Err(MatrixError::InvalidOperation { .. })));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiagonalMatrix<T> {
    diag: Vec<T>,
}

impl<T: Scalar> DiagonalMatrix<T> {
    /// `n x n` zero matrix.
    pub fn new(n: usize) -> Self {
        Self {
            diag: vec![T::zero(); n],
        }
    }

    /// `n x n` identity.
    pub fn identity(n: usize) -> Self {
        Self {
            diag: vec![T::one(); n],
        }
    }

    /// Take ownership of the diagonal entries.
    pub fn from_diagonal(diag: Vec<T>) -> Self {
        Self { diag }
    }

    /// Copy the diagonal of a square dense matrix.
    ///
    /// Fails with `ShapeMismatch` for rectangular input and
    /// `InvalidOperation` if any off-diagonal entry is nonzero.
    pub fn from_dense(a: &DenseMatrix<T>) -> Result<Self> {
        require_shape((a.nrows(), a.nrows()), (a.nrows(), a.ncols()))?;
        let n = a.nrows();
        for j in 0..n {
            for i in 0..n {
                if i != j && !a[(i, j)].is_zero() {
                    return Err(MatrixError::InvalidOperation {
                        reason: "off-diagonal entry in a diagonal matrix",
                    });
                }
            }
        }
        Ok(Self {
            diag: (0..n).map(|i| a[(i, i)]).collect(),
        })
    }

    /// Dimension `n`.
    #[inline]
    pub fn dim(&self) -> usize {
        self.diag.len()
    }

    /// The diagonal entries.
    #[inline]
    pub fn diagonal(&self) -> &[T] {
        &self.diag
    }

    /// The transpose, which is the matrix itself.
    pub fn transpose(&self) -> Self {
        self.clone()
    }

    /// Always true.
    pub fn is_symmetric(&self) -> bool {
        true
    }

    /// Multiply every entry by `k`.
    pub fn scale(&self, k: T) -> Self {
        Self {
            diag: self.diag.iter().map(|&x| x * k).collect(),
        }
    }

    /// `A x` in O(n).
    pub fn mul_vec(&self, x: &[T]) -> Result<Vec<T>> {
        require_shape((self.dim(), 1), (x.len(), 1))?;
        Ok(self.diag.iter().zip(x).map(|(&d, &v)| d * v).collect())
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Result<Self> {
        require_shape((self.dim(), self.dim()), (rhs.dim(), rhs.dim()))?;
        Ok(Self {
            diag: self
                .diag
                .iter()
                .zip(rhs.diag.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Element-wise sum, or `ShapeMismatch`.
    pub fn try_add(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |a, b| a + b)
    }

    /// Element-wise difference, or `ShapeMismatch`.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |a, b| a - b)
    }

    /// Product of two diagonal matrices, itself diagonal.
    pub fn try_mul(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |a, b| a * b)
    }

    /// Apply `f` to every element.
    ///
    /// The off-diagonal zeros map to `f(0)`, so a function that does not fix
    /// zero is refused with `InvalidOperation`.
    ///
    /// ```
    /// use matrica::DiagonalMatrix;
    /// let d = DiagonalMatrix::from_diagonal(vec![1_i64, -2]);
    /// assert_eq!(d.map(|x| 3 * x).unwrap().diagonal(), &[3, -6]);
    /// assert!(d.map(|x| x + 1).is_err());
    /// ```
    pub fn map<U: Scalar>(&self, f: impl Fn(T) -> U) -> Result<DiagonalMatrix<U>> {
        if !f(T::zero()).is_zero() {
            return Err(MatrixError::InvalidOperation {
                reason: "mapping would fill the off-diagonal of a diagonal matrix",
            });
        }
        Ok(DiagonalMatrix {
            diag: self.diag.iter().map(|&x| f(x)).collect(),
        })
    }

    /// Convert to another scalar domain.
    pub fn cast<U>(&self) -> DiagonalMatrix<U>
    where
        T: CastElement<U>,
    {
        DiagonalMatrix {
            diag: self.diag.iter().map(|&x| x.cast_element()).collect(),
        }
    }
}

impl<T: Element> DiagonalMatrix<T> {
    /// Entry-wise reciprocal in the kernel field; `Singular` on a zero entry.
    ///
    /// ```
    /// use matrica::DiagonalMatrix;
    /// let d = DiagonalMatrix::from_diagonal(vec![2_i64, 4]);
    /// assert_eq!(d.inverse().unwrap().diagonal(), &[0.5, 0.25]);
    /// assert!(DiagonalMatrix::from_diagonal(vec![1_i64, 0]).inverse().is_err());
    /// ```
    pub fn inverse(&self) -> Result<DiagonalMatrix<T::Field>> {
        let mut out = Vec::with_capacity(self.dim());
        for (i, &d) in self.diag.iter().enumerate() {
            if d.is_zero() {
                tracing::debug!(index = i, size = self.dim(), "zero on the diagonal");
                return Err(MatrixError::Singular);
            }
            out.push(<T::Field as One>::one() / d.to_field());
        }
        Ok(DiagonalMatrix { diag: out })
    }

    /// Entry-wise magnitude.
    pub fn abs(&self) -> DiagonalMatrix<Real<T>> {
        DiagonalMatrix {
            diag: self.diag.iter().map(|d| d.magnitude()).collect(),
        }
    }

    fn max_magnitude(&self, operation: &'static str) -> Result<Real<T>> {
        require_nonempty::<T, Self>(self, operation)?;
        Ok(self
            .diag
            .iter()
            .map(|d| d.magnitude())
            .fold(<Real<T> as Zero>::zero(), Float::max))
    }
}

impl<T: Element> MatrixLayout<T> for DiagonalMatrix<T> {
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
        Ok(if row == col { self.diag[row] } else { T::zero() })
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_bounds(row, col)?;
        if row == col {
            self.diag[row] = value;
            Ok(())
        } else if value.is_zero() {
            Ok(())
        } else {
            Err(MatrixError::InvalidOperation {
                reason: "cannot set an off-diagonal element of a diagonal matrix",
            })
        }
    }

    fn set_all(&mut self, value: T) -> Result<()> {
        if !value.is_zero() {
            return Err(MatrixError::InvalidOperation {
                reason: "a diagonal matrix can only be filled with zero",
            });
        }
        self.diag.iter_mut().for_each(|d| *d = T::zero());
        Ok(())
    }

    fn for_each_stored(&self, f: &mut dyn FnMut(usize, usize, T)) {
        for (i, &d) in self.diag.iter().enumerate() {
            f(i, i, d);
        }
    }

    fn trace(&self) -> Result<T> {
        require_nonempty::<T, Self>(self, "trace")?;
        checked_total(&self.diag, "trace")
    }

    /// Product of the diagonal. An integer product that overflows is handed
    /// to the dense kernel, so the result matches [`DenseMatrix::det`].
    fn det(&self) -> Result<T> {
        require_nonempty::<T, Self>(self, "determinant")?;
        let product = self
            .diag
            .iter()
            .try_fold(T::one(), |acc, &d| acc.checked_product(d));
        match product {
            Some(d) => Ok(d),
            None => self.to_dense().det(),
        }
    }

    fn norm_inf(&self) -> Result<Real<T>> {
        self.max_magnitude("infinity norm")
    }

    fn norm_operator_with(&self, _config: &KernelConfig) -> Result<Real<T>> {
        self.max_magnitude("operator norm")
    }
}

impl<T: core::fmt::Display + Scalar> core::fmt::Display for DiagonalMatrix<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let n = self.dim();
        fmt_rows(f, n, n, |i, j| if i == j { self.diag[i] } else { T::zero() })
    }
}

fn expect_shape<T>(r: Result<T>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

impl<T: Scalar> Add for &DiagonalMatrix<T> {
    type Output = DiagonalMatrix<T>;
    fn add(self, rhs: Self) -> DiagonalMatrix<T> {
        expect_shape(self.try_add(rhs))
    }
}

impl<T: Scalar> Sub for &DiagonalMatrix<T> {
    type Output = DiagonalMatrix<T>;
    fn sub(self, rhs: Self) -> DiagonalMatrix<T> {
        expect_shape(self.try_sub(rhs))
    }
}

impl<T: Scalar> Mul for &DiagonalMatrix<T> {
    type Output = DiagonalMatrix<T>;
    fn mul(self, rhs: Self) -> DiagonalMatrix<T> {
        expect_shape(self.try_mul(rhs))
    }
}

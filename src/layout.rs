use alloc::vec;
use alloc::vec::Vec;

use num_traits::{Float, Zero};

use crate::config::{KernelConfig, DEFAULT_TOLERANCE};
use crate::dense::{gram_spectral_norm, DenseMatrix};
use crate::error::{MatrixError, Result};
use crate::traits::{real_from_f64, Element, LinalgScalar, Real};

/// Checked element access plus the square-matrix kernel, shared by every
/// storage layout.
///
/// Implementors provide storage (`get`, `set`, `set_all`, `for_each_stored`);
/// the determinant, trace and norms come with generic defaults that go through
/// [`to_dense`](Self::to_dense) or visit stored entries only. Layouts with a
/// cheaper structural formula override them.
///
/// The trait is object safe, so mixed-layout comparisons work through
/// `&dyn MatrixLayout<T>`:
///
/// ```
/// use matrica::{DenseMatrix, DiagonalMatrix, MatrixLayout};
///
/// let d = DiagonalMatrix::from_diagonal(vec![2.0_f64, 3.0]);
/// let a = DenseMatrix::from_rows(2, 2, &[2.0, 0.0, 0.0, 3.0]);
/// assert!(d.is_close(&a));
/// assert_eq!(d.det().unwrap(), a.det().unwrap());
/// ```
pub trait MatrixLayout<T: Element> {
    /// Number of rows.
    fn nrows(&self) -> usize;

    /// Number of columns.
    fn ncols(&self) -> usize;

    /// Element at `(row, col)`, or `OutOfBounds`.
    fn get(&self, row: usize, col: usize) -> Result<T>;

    /// Overwrite the element at `(row, col)`.
    ///
    /// Structured layouts refuse writes that would break their structure with
    /// [`MatrixError::InvalidOperation`].
    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()>;

    /// Set every element of the matrix to `value`.
    fn set_all(&mut self, value: T) -> Result<()>;

    /// Visit every stored entry once, as `(row, col, value)`.
    ///
    /// Entries outside the stored pattern are zero and are skipped; stored
    /// entries may themselves be zero.
    fn for_each_stored(&self, f: &mut dyn FnMut(usize, usize, T));

    /// `(nrows, ncols)`.
    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Total number of logical elements, `nrows * ncols`.
    fn len(&self) -> usize {
        self.nrows() * self.ncols()
    }

    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// True when the matrix has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `Ok(())` when `(row, col)` is a valid index.
    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row < self.nrows() && col < self.ncols() {
            Ok(())
        } else {
            Err(MatrixError::OutOfBounds {
                row,
                col,
                nrows: self.nrows(),
                ncols: self.ncols(),
            })
        }
    }

    /// Copy into a dense matrix.
    fn to_dense(&self) -> DenseMatrix<T> {
        let mut out = DenseMatrix::zeros(self.nrows(), self.ncols());
        self.for_each_stored(&mut |i, j, v| out[(i, j)] = v);
        out
    }

    /// Sum of the diagonal.
    ///
    /// Integer traces that do not fit the element type fail with
    /// [`MatrixError::Overflow`].
    fn trace(&self) -> Result<T> {
        require_square::<T, Self>(self, "trace")?;
        let diag = (0..self.nrows())
            .map(|i| self.get(i, i))
            .collect::<Result<Vec<T>>>()?;
        checked_total(&diag, "trace")
    }

    /// Determinant. The default copies to dense and factors.
    fn det(&self) -> Result<T> {
        self.to_dense().det()
    }

    /// Maximum absolute row sum.
    fn norm_inf(&self) -> Result<Real<T>> {
        require_nonempty::<T, Self>(self, "infinity norm")?;
        let mut rows = vec![<Real<T> as Zero>::zero(); self.nrows()];
        self.for_each_stored(&mut |i, _, v| rows[i] = rows[i] + v.magnitude());
        Ok(rows.into_iter().fold(<Real<T> as Zero>::zero(), Float::max))
    }

    /// Square root of the sum of squared magnitudes, accumulated with `hypot`.
    fn norm_frobenius(&self) -> Result<Real<T>> {
        require_nonempty::<T, Self>(self, "Frobenius norm")?;
        let mut acc = <Real<T> as Zero>::zero();
        self.for_each_stored(&mut |_, _, v| acc = acc.hypot(v.magnitude()));
        Ok(acc)
    }

    /// Sum of all elements, with the same overflow rule as [`trace`](Self::trace).
    fn mass(&self) -> Result<T> {
        require_nonempty::<T, Self>(self, "mass")?;
        let mut stored = Vec::new();
        self.for_each_stored(&mut |_, _, v| stored.push(v));
        checked_total(&stored, "mass")
    }

    /// Arithmetic mean of all elements, in the kernel field.
    fn mean(&self) -> Result<T::Field> {
        require_nonempty::<T, Self>(self, "mean")?;
        let mut sum = <T::Field as Zero>::zero();
        self.for_each_stored(&mut |_, _, v| sum = sum + v.to_field());
        let count = <T::Field as LinalgScalar>::from_real(real_from_f64(self.len() as f64));
        Ok(sum / count)
    }

    /// Smallest element, counting unstored entries as zero.
    fn min_element(&self) -> Result<T>
    where
        T: PartialOrd,
    {
        extreme::<T, Self>(self, "minimum", |candidate, best| candidate < best)
    }

    /// Largest element, counting unstored entries as zero.
    fn max_element(&self) -> Result<T>
    where
        T: PartialOrd,
    {
        extreme::<T, Self>(self, "maximum", |candidate, best| candidate > best)
    }

    /// Spectral norm with the default [`KernelConfig`].
    fn norm_operator(&self) -> Result<Real<T>> {
        self.norm_operator_with(&KernelConfig::default())
    }

    /// Spectral norm: `sqrt(max λ(AᴴA))`, via the symmetric eigen iteration.
    fn norm_operator_with(&self, config: &KernelConfig) -> Result<Real<T>> {
        require_nonempty::<T, Self>(self, "operator norm")?;
        gram_spectral_norm(&self.to_dense().promote(), config.max_iterations)
    }

    /// Whether the Frobenius norm of `self - other` is at most `tol`.
    ///
    /// Matrices of different shapes are never equal.
    fn approx_eq(&self, other: &dyn MatrixLayout<T>, tol: Real<T>) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        let mut acc = <Real<T> as Zero>::zero();
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                let (Ok(a), Ok(b)) = (self.get(i, j), other.get(i, j)) else {
                    return false;
                };
                acc = acc.hypot((a.to_field() - b.to_field()).modulus());
            }
        }
        acc <= tol
    }

    /// [`approx_eq`](Self::approx_eq) with [`DEFAULT_TOLERANCE`].
    fn is_close(&self, other: &dyn MatrixLayout<T>) -> bool {
        self.approx_eq(other, real_from_f64(DEFAULT_TOLERANCE))
    }
}

/// Narrow a kernel field value, or `Overflow` when it does not fit `T`.
pub(crate) fn narrow<T: Element>(x: T::Field, operation: &'static str) -> Result<T> {
    T::checked_from_field(x).ok_or(MatrixError::Overflow { operation })
}

/// Sum in the element domain. If a partial sum overflows, the total is
/// recomputed in the kernel field, so only a total that really does not fit
/// is an error.
pub(crate) fn checked_total<T: Element>(values: &[T], operation: &'static str) -> Result<T> {
    let mut acc = T::zero();
    for &v in values {
        match acc.checked_sum(v) {
            Some(s) => acc = s,
            None => {
                let wide = values
                    .iter()
                    .fold(<T::Field as Zero>::zero(), |a, &v| a + v.to_field());
                return narrow(wide, operation);
            }
        }
    }
    Ok(acc)
}

fn extreme<T: Element + PartialOrd, M: MatrixLayout<T> + ?Sized>(
    m: &M,
    operation: &'static str,
    better: fn(T, T) -> bool,
) -> Result<T> {
    require_nonempty::<T, M>(m, operation)?;
    let mut stored = 0usize;
    let mut best: Option<T> = None;
    m.for_each_stored(&mut |_, _, v| {
        stored += 1;
        best = match best {
            Some(b) if !better(v, b) => Some(b),
            _ => Some(v),
        };
    });
    let mut out = best.unwrap_or_else(T::zero);
    if stored < m.len() && better(T::zero(), out) {
        out = T::zero();
    }
    Ok(out)
}

/// `ShapeMismatch` unless square, `UndefinedOnEmpty` when square and empty.
pub(crate) fn require_square<T: Element, M: MatrixLayout<T> + ?Sized>(
    m: &M,
    operation: &'static str,
) -> Result<()> {
    if !m.is_square() {
        return Err(MatrixError::ShapeMismatch {
            expected: (m.nrows(), m.nrows()),
            got: m.shape(),
        });
    }
    require_nonempty::<T, M>(m, operation)
}

pub(crate) fn require_nonempty<T: Element, M: MatrixLayout<T> + ?Sized>(
    m: &M,
    operation: &'static str,
) -> Result<()> {
    if m.is_empty() {
        Err(MatrixError::UndefinedOnEmpty { operation })
    } else {
        Ok(())
    }
}

/// `ShapeMismatch` unless `got == expected`.
pub(crate) fn require_shape(expected: (usize, usize), got: (usize, usize)) -> Result<()> {
    if expected == got {
        Ok(())
    } else {
        Err(MatrixError::ShapeMismatch { expected, got })
    }
}

/// Rows of space-separated elements, one line per row.
pub(crate) fn fmt_rows<T: core::fmt::Display>(
    f: &mut core::fmt::Formatter<'_>,
    nrows: usize,
    ncols: usize,
    at: impl Fn(usize, usize) -> T,
) -> core::fmt::Result {
    for i in 0..nrows {
        for j in 0..ncols {
            if j > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", at(i, j))?;
        }
        writeln!(f)?;
    }
    Ok(())
}

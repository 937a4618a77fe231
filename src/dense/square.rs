use num_traits::{Float, One, Zero};

use crate::error::{MatrixError, Result};
use crate::layout::{narrow, require_square};
use crate::traits::{Element, LinalgScalar, Real, Scalar};

use super::{DenseLu, DenseMatrix};

impl<T: Scalar> DenseMatrix<T> {
    /// Swap two rows in place.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let mut m = DenseMatrix::from_rows(2, 2, &[1, 2, 3, 4]);
    /// m.swap_rows(0, 1);
    /// assert_eq!(m[(0, 0)], 3);
    /// assert_eq!(m[(1, 1)], 2);
    /// ```
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            for j in 0..self.ncols {
                self.data.swap(j * self.nrows + a, j * self.nrows + b);
            }
        }
    }

    /// Check if the matrix is symmetric (`A == A^T`), exactly.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let sym = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 3.0]);
    /// assert!(sym.is_symmetric());
    /// ```
    pub fn is_symmetric(&self) -> bool {
        if self.nrows != self.ncols {
            return false;
        }
        let n = self.nrows;
        for i in 0..n {
            for j in (i + 1)..n {
                if self[(i, j)] != self[(j, i)] {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: Element> DenseMatrix<T> {
    /// Determinant without going through the trait default.
    ///
    /// Sizes 1 and 2 are evaluated directly in the element domain (`ad - bc`);
    /// larger matrices, and 2x2 integer matrices whose products overflow, are
    /// factored in the kernel field. A zero pivot means the determinant is
    /// exactly zero. An integer determinant outside the element range is
    /// [`MatrixError::Overflow`].
    pub(crate) fn det_direct(&self) -> Result<T> {
        require_square::<T, Self>(self, "determinant")?;
        match self.nrows {
            1 => Ok(self[(0, 0)]),
            2 => match self.det_two_by_two() {
                Some(d) => Ok(d),
                None => self.det_factored(),
            },
            _ => self.det_factored(),
        }
    }

    fn det_two_by_two(&self) -> Option<T> {
        let ad = self[(0, 0)].checked_product(self[(1, 1)])?;
        let bc = self[(0, 1)].checked_product(self[(1, 0)])?;
        ad.checked_difference(bc)
    }

    fn det_factored(&self) -> Result<T> {
        match DenseLu::new(&self.promote()) {
            Ok(lu) => narrow(lu.det(), "determinant"),
            Err(MatrixError::Singular) => Ok(T::zero()),
            Err(e) => Err(e),
        }
    }

    /// Check if the matrix equals its Hermitian adjoint, exactly.
    ///
    /// Same as [`is_symmetric`](Self::is_symmetric) outside the complex domain.
    pub fn is_hermitian(&self) -> bool {
        if self.nrows != self.ncols {
            return false;
        }
        let n = self.nrows;
        for i in 0..n {
            for j in i..n {
                if self[(i, j)] != self[(j, i)].conjugate() {
                    return false;
                }
            }
        }
        true
    }

    /// Whether `AᴴA` is within `tol` (Frobenius) of the identity.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let r = DenseMatrix::from_rows(2, 2, &[0.6_f64, -0.8, 0.8, 0.6]);
    /// assert!(r.is_unitary(1e-12));
    /// assert!(!DenseMatrix::from_rows(1, 1, &[2.0_f64]).is_unitary(1e-12));
    /// ```
    pub fn is_unitary(&self, tol: Real<T>) -> bool {
        if self.nrows != self.ncols {
            return false;
        }
        let gram = self.promote().gram();
        let mut acc = <Real<T> as Zero>::zero();
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                let expected = if i == j {
                    <T::Field as One>::one()
                } else {
                    <T::Field as Zero>::zero()
                };
                acc = acc.hypot((gram[(i, j)] - expected).modulus());
            }
        }
        acc <= tol
    }
}

impl<T: Scalar> DenseMatrix<T> {
    /// Product of the diagonal, for triangular factors.
    pub(crate) fn diagonal_product(&self) -> T {
        let n = self.nrows.min(self.ncols);
        (0..n).fold(T::one(), |acc, i| acc * self[(i, i)])
    }

    /// Zero every entry strictly above (`upper == true`) or below the diagonal.
    pub(crate) fn clear_triangle(&mut self, upper: bool) {
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                if (upper && j > i) || (!upper && i > j) {
                    self[(i, j)] = T::zero();
                }
            }
        }
    }

    /// Set the diagonal to one.
    pub(crate) fn set_unit_diagonal(&mut self) {
        let n = self.nrows.min(self.ncols);
        for i in 0..n {
            self[(i, i)] = T::one();
        }
    }
}

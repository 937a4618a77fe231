use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::{MatrixError, Result};
use crate::layout::require_shape;
use crate::traits::{Element, Scalar};

use super::DenseMatrix;

impl<T: Scalar> DenseMatrix<T> {
    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Result<Self> {
        require_shape((self.nrows, self.ncols), (rhs.nrows, rhs.ncols))?;
        Ok(DenseMatrix {
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            nrows: self.nrows,
            ncols: self.ncols,
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

    /// Matrix product `(M×N) * (N×P) → (M×P)`, or `ShapeMismatch`.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let a = DenseMatrix::from_rows(2, 3, &[1, 2, 3, 4, 5, 6]);
    /// let b = DenseMatrix::from_rows(3, 1, &[1, 0, -1]);
    /// assert_eq!(a.try_matmul(&b).unwrap(), DenseMatrix::from_rows(2, 1, &[-2, -2]));
    /// assert!(b.try_matmul(&b).is_err());
    /// ```
    pub fn try_matmul(&self, rhs: &Self) -> Result<Self> {
        if self.ncols != rhs.nrows {
            return Err(MatrixError::ShapeMismatch {
                expected: (self.ncols, rhs.ncols),
                got: (rhs.nrows, rhs.ncols),
            });
        }
        let (m, n, p) = (self.nrows, self.ncols, rhs.ncols);
        let mut out = DenseMatrix::zeros(m, p);
        for j in 0..p {
            for k in 0..n {
                let b_kj = rhs[(k, j)];
                if b_kj.is_zero() {
                    continue;
                }
                for i in 0..m {
                    out.data[j * m + i] = out.data[j * m + i] + self.data[k * m + i] * b_kj;
                }
            }
        }
        Ok(out)
    }

    /// Matrix-vector product `A x`.
    ///
    /// `x.len()` must equal `ncols`.
    pub fn mul_vec(&self, x: &[T]) -> Result<Vec<T>> {
        require_shape((self.ncols, 1), (x.len(), 1))?;
        let mut y = vec![T::zero(); self.nrows];
        for (j, &xj) in x.iter().enumerate() {
            for (i, yi) in y.iter_mut().enumerate() {
                *yi = *yi + self.data[j * self.nrows + i] * xj;
            }
        }
        Ok(y)
    }

    /// Multiply every element by `k`.
    pub fn scale(&self, k: T) -> Self {
        self.map(|x| x * k)
    }

    /// Transpose: (M×N) → (N×M).
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let a = DenseMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = a.transpose();
    /// assert_eq!(t.nrows(), 3);
    /// assert_eq!(t.ncols(), 2);
    /// assert_eq!(t[(1, 0)], 2.0);
    /// ```
    pub fn transpose(&self) -> Self {
        DenseMatrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }

    /// Block-diagonal direct sum `A ⊕ B`.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let a = DenseMatrix::from_rows(1, 1, &[1]);
    /// let b = DenseMatrix::from_rows(1, 2, &[2, 3]);
    /// let s = a.direct_sum(&b);
    /// assert_eq!(s, DenseMatrix::from_rows(2, 3, &[1, 0, 0, 0, 2, 3]));
    /// ```
    pub fn direct_sum(&self, rhs: &Self) -> Self {
        let mut out = DenseMatrix::zeros(self.nrows + rhs.nrows, self.ncols + rhs.ncols);
        for j in 0..self.ncols {
            for i in 0..self.nrows {
                out[(i, j)] = self[(i, j)];
            }
        }
        for j in 0..rhs.ncols {
            for i in 0..rhs.nrows {
                out[(self.nrows + i, self.ncols + j)] = rhs[(i, j)];
            }
        }
        out
    }

    /// Kronecker (tensor) product `A ⊗ B`.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let a = DenseMatrix::from_rows(1, 2, &[1, 2]);
    /// let b = DenseMatrix::from_rows(2, 1, &[1, 10]);
    /// let k = a.tensor_product(&b);
    /// assert_eq!(k, DenseMatrix::from_rows(2, 2, &[1, 2, 10, 20]));
    /// ```
    pub fn tensor_product(&self, rhs: &Self) -> Self {
        let (p, q) = (rhs.nrows, rhs.ncols);
        DenseMatrix::from_fn(self.nrows * p, self.ncols * q, |i, j| {
            self[(i / p, j / q)] * rhs[(i % p, j % q)]
        })
    }
}

impl<T: Element> DenseMatrix<T> {
    /// Element-wise complex conjugate (a copy for real and integer matrices).
    pub fn conjugate(&self) -> Self {
        self.map(Element::conjugate)
    }

    /// Hermitian adjoint `Aᴴ` (conjugate transpose).
    ///
    /// ```
    /// use matrica::{Complex, DenseMatrix};
    /// let a = DenseMatrix::from_rows(1, 2, &[Complex::new(1.0_f64, 2.0), Complex::new(0.0, -1.0)]);
    /// let h = a.adjoint();
    /// assert_eq!(h.nrows(), 2);
    /// assert_eq!(h[(0, 0)], Complex::new(1.0, -2.0));
    /// assert_eq!(h[(1, 0)], Complex::new(0.0, 1.0));
    /// ```
    pub fn adjoint(&self) -> Self {
        DenseMatrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)].conjugate())
    }

    /// Frobenius inner product `Σ a_ij · conj(b_ij)`, or `ShapeMismatch`.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let a = DenseMatrix::from_rows(2, 2, &[1, 2, 3, 4]);
    /// assert_eq!(a.scalar_product(&a).unwrap(), 30);
    /// ```
    pub fn scalar_product(&self, rhs: &Self) -> Result<T> {
        require_shape((self.nrows, self.ncols), (rhs.nrows, rhs.ncols))?;
        Ok(self
            .data
            .iter()
            .zip(rhs.data.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b.conjugate()))
    }
}

// ── Operator sugar ──────────────────────────────────────────────────
//
// Shape disagreement panics with the `MatrixError` message; the `try_*`
// methods are the fallible forms.

fn expect_shape<T>(r: Result<T>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

macro_rules! impl_binop {
    ($tr:ident, $method:ident, $try:ident) => {
        impl<T: Scalar> $tr<&DenseMatrix<T>> for &DenseMatrix<T> {
            type Output = DenseMatrix<T>;
            fn $method(self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
                expect_shape(self.$try(rhs))
            }
        }

        impl<T: Scalar> $tr<DenseMatrix<T>> for DenseMatrix<T> {
            type Output = DenseMatrix<T>;
            fn $method(self, rhs: DenseMatrix<T>) -> DenseMatrix<T> {
                expect_shape(self.$try(&rhs))
            }
        }

        impl<T: Scalar> $tr<&DenseMatrix<T>> for DenseMatrix<T> {
            type Output = DenseMatrix<T>;
            fn $method(self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
                expect_shape(self.$try(rhs))
            }
        }

        impl<T: Scalar> $tr<DenseMatrix<T>> for &DenseMatrix<T> {
            type Output = DenseMatrix<T>;
            fn $method(self, rhs: DenseMatrix<T>) -> DenseMatrix<T> {
                expect_shape(self.$try(&rhs))
            }
        }
    };
}

impl_binop!(Add, add, try_add);
impl_binop!(Sub, sub, try_sub);
impl_binop!(Mul, mul, try_matmul);

impl<T: Scalar> AddAssign<&DenseMatrix<T>> for DenseMatrix<T> {
    fn add_assign(&mut self, rhs: &DenseMatrix<T>) {
        *self = expect_shape(self.try_add(rhs));
    }
}

impl<T: Scalar> SubAssign<&DenseMatrix<T>> for DenseMatrix<T> {
    fn sub_assign(&mut self, rhs: &DenseMatrix<T>) {
        *self = expect_shape(self.try_sub(rhs));
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for DenseMatrix<T> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|x| -x)
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn neg(self) -> DenseMatrix<T> {
        self.map(|x| -x)
    }
}

// ── Scalar multiplication / division ────────────────────────────────

impl<T: Scalar> Mul<T> for DenseMatrix<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        self.scale(rhs)
    }
}

impl<T: Scalar> Mul<T> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn mul(self, rhs: T) -> DenseMatrix<T> {
        self.scale(rhs)
    }
}

impl<T: Scalar> MulAssign<T> for DenseMatrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        for x in self.data.iter_mut() {
            *x = *x * rhs;
        }
    }
}

impl<T: Scalar> Div<T> for DenseMatrix<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        self.map(|x| x / rhs)
    }
}

impl<T: Scalar> Div<T> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn div(self, rhs: T) -> DenseMatrix<T> {
        self.map(|x| x / rhs)
    }
}

impl<T: Scalar> DivAssign<T> for DenseMatrix<T> {
    fn div_assign(&mut self, rhs: T) {
        for x in self.data.iter_mut() {
            *x = *x / rhs;
        }
    }
}

macro_rules! impl_scalar_mul_dense {
    ($($t:ty),*) => {
        $(
            impl Mul<DenseMatrix<$t>> for $t {
                type Output = DenseMatrix<$t>;
                fn mul(self, rhs: DenseMatrix<$t>) -> DenseMatrix<$t> {
                    rhs * self
                }
            }

            impl Mul<&DenseMatrix<$t>> for $t {
                type Output = DenseMatrix<$t>;
                fn mul(self, rhs: &DenseMatrix<$t>) -> DenseMatrix<$t> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_mul_dense!(f32, f64, i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub() {
        let a = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = DenseMatrix::from_rows(2, 2, &[5.0, 6.0, 7.0, 8.0]);

        let c = &a + &b;
        assert_eq!(c[(0, 0)], 6.0);
        assert_eq!(c[(1, 1)], 12.0);

        let d = &b - &a;
        assert_eq!(d[(0, 0)], 4.0);
        assert_eq!(d[(1, 1)], 4.0);
    }

    #[test]
    fn try_add_shape_mismatch() {
        let a = DenseMatrix::<i64>::zeros(2, 2);
        let b = DenseMatrix::<i64>::zeros(2, 3);
        assert_eq!(
            a.try_add(&b),
            Err(MatrixError::ShapeMismatch {
                expected: (2, 2),
                got: (2, 3)
            })
        );
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn add_panics_on_mismatch() {
        let a = DenseMatrix::<f64>::zeros(2, 2);
        let b = DenseMatrix::<f64>::zeros(3, 2);
        let _ = &a + &b;
    }

    #[test]
    fn add_assign() {
        let mut a = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = DenseMatrix::from_rows(2, 2, &[5.0, 6.0, 7.0, 8.0]);
        a += &b;
        assert_eq!(a[(0, 0)], 6.0);
        a -= &b;
        assert_eq!(a[(0, 0)], 1.0);
    }

    #[test]
    fn neg() {
        let a = DenseMatrix::from_rows(2, 2, &[1.0, -2.0, 3.0, -4.0]);
        let b = -a;
        assert_eq!(b[(0, 0)], -1.0);
        assert_eq!(b[(0, 1)], 2.0);
    }

    #[test]
    fn matrix_multiply() {
        let a = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = DenseMatrix::from_rows(2, 2, &[5.0, 6.0, 7.0, 8.0]);
        let c = &a * &b;
        assert_eq!(c[(0, 0)], 19.0);
        assert_eq!(c[(0, 1)], 22.0);
        assert_eq!(c[(1, 0)], 43.0);
        assert_eq!(c[(1, 1)], 50.0);
    }

    #[test]
    fn matrix_multiply_non_square() {
        let a = DenseMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = DenseMatrix::from_rows(3, 2, &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let c = &a * &b;
        assert_eq!(c.nrows(), 2);
        assert_eq!(c.ncols(), 2);
        assert_eq!(c[(0, 0)], 58.0);
        assert_eq!(c[(0, 1)], 64.0);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn multiply_dim_mismatch() {
        let a = DenseMatrix::<f64>::zeros(2, 3);
        let b = DenseMatrix::<f64>::zeros(2, 2);
        let _ = &a * &b;
    }

    #[test]
    fn mul_vec() {
        let a = DenseMatrix::from_rows(2, 3, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(a.mul_vec(&[1, 1, 1]).unwrap(), vec![6, 15]);
        assert!(matches!(a.mul_vec(&[1, 1]), Err(MatrixError::ShapeMismatch { .. })));
    }

    #[test]
    fn scalar_multiply() {
        let a = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = &a * 3.0;
        assert_eq!(b[(0, 0)], 3.0);
        assert_eq!(b[(1, 1)], 12.0);

        let c = 3.0 * &a;
        assert_eq!(c, b);
    }

    #[test]
    fn scalar_divide() {
        let a = DenseMatrix::from_rows(2, 2, &[2.0, 4.0, 6.0, 8.0]);
        let b = &a / 2.0;
        assert_eq!(b[(0, 0)], 1.0);
        assert_eq!(b[(1, 1)], 4.0);
    }

    #[test]
    fn mul_div_assign() {
        let mut a = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        a *= 2.0;
        assert_eq!(a[(0, 0)], 2.0);
        a /= 2.0;
        assert_eq!(a[(0, 0)], 1.0);
    }

    #[test]
    fn ref_variants() {
        let a = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = DenseMatrix::from_rows(2, 2, &[5.0, 6.0, 7.0, 8.0]);

        let sum1 = &a + &b;
        let sum2 = a.clone() + &b;
        let sum3 = &a + b.clone();
        let sum4 = a.clone() + b.clone();
        assert_eq!(sum1, sum2);
        assert_eq!(sum1, sum3);
        assert_eq!(sum1, sum4);
    }

    #[test]
    fn identity_multiply() {
        let a = DenseMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let id = DenseMatrix::<f64>::eye(2);
        assert_eq!(&a * &id, a);
        assert_eq!(&id * &a, a);
    }

    #[test]
    fn tensor_product_shape() {
        let a = DenseMatrix::<i64>::eye(2);
        let b = DenseMatrix::from_rows(2, 2, &[1, 2, 3, 4]);
        let k = a.tensor_product(&b);
        assert_eq!(k.nrows(), 4);
        assert_eq!(k[(2, 3)], 2);
        assert_eq!(k[(0, 3)], 0);
    }

    #[test]
    fn adjoint_of_real_is_transpose() {
        let a = DenseMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(a.adjoint(), a.transpose());
        assert_eq!(a.conjugate(), a);
    }
}

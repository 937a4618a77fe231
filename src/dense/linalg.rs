use alloc::vec;
use alloc::vec::Vec;

use num_traits::{Float, Zero};

use crate::config::KernelConfig;
use crate::error::Result;
use crate::layout::require_shape;
use crate::linalg::lu::{lu_in_place, lu_solve};
use crate::linalg::symmetric_eigen::{
    tridiagonal_qr_no_vecs, tridiagonal_qr_with_vecs, tridiagonalize,
};
use crate::traits::{Element, LinalgScalar, Real};

use super::DenseMatrix;

// ── DenseLu ─────────────────────────────────────────────────────────

/// LU decomposition with partial pivoting: `P·A = L·U`.
///
/// A fresh value per call; nothing is cached on the source matrix, so later
/// writes to it never leave stale factors behind.
///
/// # Example
///
/// ```
/// use matrica::DenseMatrix;
///
/// let a = DenseMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 5.0, 3.0]);
/// let lu = a.lu().unwrap();
///
/// let x = lu.solve(&[4.0, 11.0]).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
///
/// // Row 1 holds the larger pivot, so the rows were exchanged once.
/// assert_eq!(lu.permutation(), &[1, 0]);
/// assert_eq!(lu.sign(), -1);
/// ```
#[derive(Debug, Clone)]
pub struct DenseLu<F> {
    lu: DenseMatrix<F>,
    perm: Vec<usize>,
    even: bool,
}

impl<F: LinalgScalar> DenseLu<F> {
    /// Decompose a square matrix. Returns `Singular` on an exactly-zero pivot.
    pub fn new(a: &DenseMatrix<F>) -> Result<Self> {
        require_shape((a.nrows(), a.nrows()), (a.nrows(), a.ncols()))?;
        let mut lu = a.clone();
        let mut perm = vec![0usize; a.nrows()];
        let even = lu_in_place(&mut lu, &mut perm)?;
        Ok(Self { lu, perm, even })
    }

    /// Dimension of the factored matrix.
    #[inline]
    pub fn dim(&self) -> usize {
        self.lu.nrows()
    }

    /// Unit lower-triangular factor.
    pub fn l(&self) -> DenseMatrix<F> {
        let mut l = self.lu.clone();
        l.clear_triangle(true);
        l.set_unit_diagonal();
        l
    }

    /// Upper-triangular factor.
    pub fn u(&self) -> DenseMatrix<F> {
        let mut u = self.lu.clone();
        u.clear_triangle(false);
        u
    }

    /// Row permutation: row `i` of `P·A` is row `permutation()[i]` of `A`.
    #[inline]
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// Sign of the permutation, `+1` or `-1`.
    #[inline]
    pub fn sign(&self) -> i8 {
        if self.even {
            1
        } else {
            -1
        }
    }

    /// Apply the row permutation to `a`, giving `P·A`.
    pub fn permute(&self, a: &DenseMatrix<F>) -> Result<DenseMatrix<F>> {
        require_shape((self.dim(), a.ncols()), (a.nrows(), a.ncols()))?;
        Ok(DenseMatrix::from_fn(a.nrows(), a.ncols(), |i, j| {
            a[(self.perm[i], j)]
        }))
    }

    /// Solve `Ax = b` for x.
    pub fn solve(&self, b: &[F]) -> Result<Vec<F>> {
        require_shape((self.dim(), 1), (b.len(), 1))?;
        let mut x = vec![F::zero(); self.dim()];
        lu_solve(&self.lu, &self.perm, b, &mut x);
        Ok(x)
    }

    /// Compute the matrix inverse.
    pub fn inverse(&self) -> DenseMatrix<F> {
        let n = self.dim();
        let mut inv = DenseMatrix::zeros(n, n);
        let mut col_buf = vec![F::zero(); n];
        let mut e = vec![F::zero(); n];

        for col in 0..n {
            if col > 0 {
                e[col - 1] = F::zero();
            }
            e[col] = F::one();

            lu_solve(&self.lu, &self.perm, &e, &mut col_buf);

            for row in 0..n {
                inv[(row, col)] = col_buf[row];
            }
        }

        inv
    }

    /// Determinant: `sign · Π u_ii`.
    pub fn det(&self) -> F {
        let d = self.lu.diagonal_product();
        if self.even {
            d
        } else {
            F::zero() - d
        }
    }
}

// ── DenseSymmetricEigen ─────────────────────────────────────────────

/// Symmetric/Hermitian eigendecomposition.
///
/// Eigenvalues are sorted ascending. Eigenvectors are columns of Q.
///
/// # Example
///
/// ```
/// use matrica::{DenseMatrix, KernelConfig};
///
/// let a = DenseMatrix::from_rows(2, 2, &[2.0_f64, -1.0, -1.0, 2.0]);
/// let eig = a.eig_symmetric(&KernelConfig::default()).unwrap();
/// assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-10);
/// assert!((eig.eigenvalues()[1] - 3.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct DenseSymmetricEigen<F: LinalgScalar> {
    eigenvalues: Vec<F::Real>,
    eigenvectors: DenseMatrix<F>,
}

impl<F: LinalgScalar> DenseSymmetricEigen<F> {
    /// Decompose a symmetric (Hermitian) matrix.
    ///
    /// `max_iter` bounds the QR sweeps spent on each eigenvalue.
    pub fn new(a: &DenseMatrix<F>, max_iter: usize) -> Result<Self> {
        require_shape((a.nrows(), a.nrows()), (a.nrows(), a.ncols()))?;
        let n = a.nrows();

        if n == 0 {
            return Ok(Self {
                eigenvalues: Vec::new(),
                eigenvectors: DenseMatrix::zeros(0, 0),
            });
        }

        let mut diag = vec![<F::Real as Zero>::zero(); n];
        let mut off_diag = vec![<F::Real as Zero>::zero(); n];
        let mut q = DenseMatrix::<F>::zeros(n, n);

        tridiagonalize(a, &mut diag, &mut off_diag, &mut q);
        tridiagonal_qr_with_vecs::<F>(&mut diag, &mut off_diag[..n - 1], &mut q, max_iter)?;

        Ok(Self {
            eigenvalues: diag,
            eigenvectors: q,
        })
    }

    /// Compute eigenvalues only (no eigenvectors).
    pub fn eigenvalues_only(a: &DenseMatrix<F>, max_iter: usize) -> Result<Vec<F::Real>> {
        require_shape((a.nrows(), a.nrows()), (a.nrows(), a.ncols()))?;
        let n = a.nrows();

        if n == 0 {
            return Ok(Vec::new());
        }

        let mut diag = vec![<F::Real as Zero>::zero(); n];
        let mut off_diag = vec![<F::Real as Zero>::zero(); n];
        let mut q = DenseMatrix::<F>::zeros(n, n);

        tridiagonalize(a, &mut diag, &mut off_diag, &mut q);
        tridiagonal_qr_no_vecs(&mut diag, &mut off_diag[..n - 1], max_iter)?;

        Ok(diag)
    }

    /// The eigenvalues, sorted ascending.
    #[inline]
    pub fn eigenvalues(&self) -> &[F::Real] {
        &self.eigenvalues
    }

    /// The eigenvector matrix Q (columns are eigenvectors).
    #[inline]
    pub fn eigenvectors(&self) -> &DenseMatrix<F> {
        &self.eigenvectors
    }
}

impl<F: LinalgScalar> DenseMatrix<F> {
    /// `AᴴA`, Hermitian by construction.
    pub(crate) fn gram(&self) -> DenseMatrix<F> {
        let n = self.ncols();
        let mut g = DenseMatrix::zeros(n, n);
        for j in 0..n {
            for i in 0..=j {
                let mut s = F::zero();
                for k in 0..self.nrows() {
                    s = s + self[(k, i)].conj() * self[(k, j)];
                }
                g[(i, j)] = s;
                g[(j, i)] = s.conj();
            }
        }
        g
    }
}

/// Spectral norm of `a`: square root of the largest eigenvalue of `AᴴA`.
///
/// Rounding can leave tiny negative eigenvalues; they are clamped to zero.
pub(crate) fn gram_spectral_norm<F: LinalgScalar>(
    a: &DenseMatrix<F>,
    max_iter: usize,
) -> Result<F::Real> {
    let eigenvalues = DenseSymmetricEigen::eigenvalues_only(&a.gram(), max_iter)?;
    let top = eigenvalues
        .last()
        .copied()
        .unwrap_or_else(<F::Real as Zero>::zero);
    Ok(Float::max(top, <F::Real as Zero>::zero()).sqrt())
}

// ── Convenience methods ─────────────────────────────────────────────

impl<T: Element> DenseMatrix<T> {
    /// LU decomposition in the kernel field.
    pub fn lu(&self) -> Result<DenseLu<T::Field>> {
        DenseLu::new(&self.promote())
    }

    /// Solve `Ax = b` via LU decomposition.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let a = DenseMatrix::from_rows(2, 2, &[2_i64, 1, 5, 3]);
    /// let x = a.solve(&[4, 11]).unwrap();
    /// assert!((x[0] - 1.0).abs() < 1e-12);
    /// assert!((x[1] - 2.0).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &[T]) -> Result<Vec<T::Field>> {
        let b: Vec<T::Field> = b.iter().map(|&x| x.to_field()).collect();
        self.lu()?.solve(&b)
    }

    /// Matrix inverse via LU decomposition.
    ///
    /// ```
    /// use matrica::{DenseMatrix, MatrixError};
    /// let a = DenseMatrix::from_rows(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]);
    /// let a_inv = a.inverse().unwrap();
    /// let id = &a * &a_inv;
    /// assert!((id[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!((id[(0, 1)]).abs() < 1e-12);
    ///
    /// let singular = DenseMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
    /// assert_eq!(singular.inverse().unwrap_err(), MatrixError::Singular);
    /// ```
    pub fn inverse(&self) -> Result<DenseMatrix<T::Field>> {
        Ok(self.lu()?.inverse())
    }

    /// Symmetric/Hermitian eigendecomposition.
    ///
    /// Only meaningful for symmetric (Hermitian) input; the lower triangle
    /// drives the reduction.
    pub fn eig_symmetric(&self, config: &KernelConfig) -> Result<DenseSymmetricEigen<T::Field>> {
        DenseSymmetricEigen::new(&self.promote(), config.max_iterations)
    }

    /// Eigenvalues of a symmetric/Hermitian matrix (no eigenvectors), ascending.
    ///
    /// ```
    /// use matrica::{DenseMatrix, KernelConfig, MatrixError};
    /// let a = DenseMatrix::from_rows(2, 2, &[5_i64, 2, 2, 2]);
    /// let vals = a.eigenvalues_symmetric(&KernelConfig::default()).unwrap();
    /// assert!((vals[0] - 1.0).abs() < 1e-10);
    /// assert!((vals[1] - 6.0).abs() < 1e-10);
    ///
    /// let strict = KernelConfig::default().with_max_iterations(0);
    /// assert_eq!(
    ///     a.eigenvalues_symmetric(&strict),
    ///     Err(MatrixError::MaxIterationsExceeded { iterations: 0 }),
    /// );
    /// ```
    pub fn eigenvalues_symmetric(&self, config: &KernelConfig) -> Result<Vec<Real<T>>> {
        DenseSymmetricEigen::eigenvalues_only(&self.promote(), config.max_iterations)
    }
}

#![cfg(feature = "complex")]

use matrica::{Complex, DenseMatrix, KernelConfig, MatrixLayout};

type C = Complex<f64>;

fn c(re: f64, im: f64) -> C {
    Complex::new(re, im)
}

const TOL: f64 = 1e-10;

fn assert_complex_near(a: C, b: C, tol: f64, msg: &str) {
    assert!(
        (a.re - b.re).abs() < tol && (a.im - b.im).abs() < tol,
        "{}: {:?} vs {:?}",
        msg,
        a,
        b
    );
}

fn hermitian() -> DenseMatrix<C> {
    DenseMatrix::from_rows(2, 2, &[c(2.0, 0.0), c(1.0, -1.0), c(1.0, 1.0), c(3.0, 0.0)])
}

// ── Determinant ──────────────────────────────────────────────────────

#[test]
fn complex_det_2x2() {
    let a = DenseMatrix::from_rows(2, 2, &[c(1.0, 1.0), c(2.0, 0.0), c(0.0, 1.0), c(1.0, -1.0)]);
    // (1+i)(1-i) - 2i = 2 - 2i
    assert_complex_near(a.det().unwrap(), c(2.0, -2.0), TOL, "det");
}

#[test]
fn complex_det_3x3_via_lu() {
    let a = DenseMatrix::from_rows(
        3,
        3,
        &[
            c(1.0, 1.0), c(0.0, 0.0), c(0.0, 0.0),
            c(2.0, 0.0), c(0.0, 1.0), c(0.0, 0.0),
            c(3.0, 0.0), c(1.0, 0.0), c(2.0, 0.0),
        ],
    );
    // lower triangular: (1+i) * i * 2 = -2 + 2i
    assert_complex_near(a.det().unwrap(), c(-2.0, 2.0), TOL, "det");
    let lu = a.lu().unwrap();
    assert_complex_near(lu.det(), c(-2.0, 2.0), TOL, "lu det");
}

#[test]
fn complex_solve() {
    let a = DenseMatrix::from_rows(2, 2, &[c(2.0, 1.0), c(1.0, -1.0), c(1.0, 0.0), c(3.0, 2.0)]);
    let b = [c(5.0, 3.0), c(7.0, 4.0)];
    let x = a.solve(&b).unwrap();
    let ax = a.mul_vec(&x).unwrap();
    for i in 0..2 {
        assert_complex_near(ax[i], b[i], TOL, "row");
    }
    let inv = a.inverse().unwrap();
    assert!((&a * &inv).is_close(&DenseMatrix::<C>::eye(2)));
}

// ── Hermitian structure ──────────────────────────────────────────────

#[test]
fn hermitian_eigenvalues_are_real() {
    let a = hermitian();
    assert!(a.is_hermitian());
    assert!(!a.is_symmetric());
    // trace 5, det 4
    let w = a.eigenvalues_symmetric(&KernelConfig::default()).unwrap();
    assert!((w[0] - 1.0).abs() < TOL);
    assert!((w[1] - 4.0).abs() < TOL);
}

#[test]
fn hermitian_eigenvectors_reconstruct() {
    let a = hermitian();
    let eig = a.eig_symmetric(&KernelConfig::default()).unwrap();
    let v = eig.eigenvectors();
    for (k, &lambda) in eig.eigenvalues().iter().enumerate() {
        let col = [v[(0, k)], v[(1, k)]];
        let av = a.mul_vec(&col).unwrap();
        for i in 0..2 {
            assert_complex_near(av[i], col[i] * lambda, 1e-9, "A v = λ v");
        }
    }
    assert!(v.is_unitary(1e-9));
}

#[test]
fn adjoint_and_conjugate() {
    let a = DenseMatrix::from_rows(1, 2, &[c(1.0, 2.0), c(0.0, -1.0)]);
    let h = a.adjoint();
    assert_eq!(h.nrows(), 2);
    assert_eq!(h[(0, 0)], c(1.0, -2.0));
    assert_eq!(h[(1, 0)], c(0.0, 1.0));
    assert_eq!(a.conjugate().transpose(), h);
}

#[test]
fn unitary_matrix() {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    let u = DenseMatrix::from_rows(2, 2, &[c(s, 0.0), c(0.0, s), c(0.0, s), c(s, 0.0)]);
    assert!(u.is_unitary(1e-12));
    assert!(!hermitian().is_unitary(1e-6));
    assert_complex_near(u.det().unwrap(), c(1.0, 0.0), TOL, "det");
}

#[test]
fn scalar_product_conjugates_rhs() {
    let a = DenseMatrix::from_rows(1, 2, &[c(1.0, 1.0), c(2.0, 0.0)]);
    let b = DenseMatrix::from_rows(1, 2, &[c(0.0, 1.0), c(1.0, 1.0)]);
    // (1+i)(-i) + 2(1-i) = 1 - i + 2 - 2i
    assert_complex_near(a.scalar_product(&b).unwrap(), c(3.0, -3.0), TOL, "scalar product");
}

// ── Norms ────────────────────────────────────────────────────────────

#[test]
fn complex_norms_are_real() {
    let a = DenseMatrix::from_rows(2, 2, &[c(3.0, 4.0), c(0.0, 0.0), c(1.0, 0.0), c(0.0, -1.0)]);
    assert!((a.norm_inf().unwrap() - 5.0).abs() < TOL);
    assert!((a.norm_frobenius().unwrap() - 27.0_f64.sqrt()).abs() < TOL);
}

#[test]
fn hermitian_operator_norm_is_top_eigenvalue() {
    assert!((hermitian().norm_operator().unwrap() - 4.0).abs() < TOL);
}

#[test]
fn nilpotent_operator_norm() {
    let a = DenseMatrix::from_rows(2, 2, &[c(0.0, 0.0), c(0.0, 2.0), c(0.0, 0.0), c(0.0, 0.0)]);
    assert!((a.norm_operator().unwrap() - 2.0).abs() < TOL);
    assert_complex_near(a.det().unwrap(), c(0.0, 0.0), TOL, "det");
}

// ── Domain conversion ────────────────────────────────────────────────

#[test]
fn planes_round_trip() {
    let a = hermitian();
    let back = DenseMatrix::from_parts(&a.real(), &a.imag()).unwrap();
    assert_eq!(back, a);
    let r: DenseMatrix<f64> = a.cast();
    assert_eq!(r, a.real());
    let z: DenseMatrix<C> = DenseMatrix::from_rows(1, 2, &[1_i64, -2]).cast();
    assert_eq!(z, DenseMatrix::from_rows(1, 2, &[c(1.0, 0.0), c(-2.0, 0.0)]));
}

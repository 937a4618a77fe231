//! # matrica
//!
//! Matrices over integer, real and complex scalars in four storage layouts,
//! sharing one numeric kernel: determinant, trace, infinity / Frobenius /
//! operator norms, LU decomposition and a bounded symmetric eigenvalue
//! iteration. no-std compatible (needs `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use matrica::{DenseMatrix, DiagonalMatrix, MatrixLayout};
//!
//! let a = DenseMatrix::from_rows(2, 2, &[4_i64, 3, 6, 3]);
//! assert_eq!(a.det().unwrap(), -6);
//! assert_eq!(a.trace().unwrap(), 7);
//! assert_eq!(a.norm_inf().unwrap(), 9.0);
//!
//! let x = a.solve(&[10, 12]).unwrap(); // integer systems solve in f64
//! assert!((x[0] - 1.0).abs() < 1e-12 && (x[1] - 2.0).abs() < 1e-12);
//!
//! let id = DiagonalMatrix::<f64>::identity(5);
//! assert_eq!(id.norm_operator().unwrap(), 1.0);
//! ```
//!
//! ## Modules
//!
//! - [`layout`]: [`MatrixLayout`], the checked element-access contract every
//!   layout implements. Determinant, trace and norms come with generic
//!   defaults; structured layouts override them with O(n) formulas. The trait
//!   is object safe, so `&dyn MatrixLayout<T>` compares across layouts.
//!
//! - [`dense`]: [`DenseMatrix<T>`], column-major `Vec<T>` storage with
//!   arithmetic operators, checked row / column / block access,
//!   [`DenseLu`] and [`DenseSymmetricEigen`].
//!
//! - [`diagonal`], [`tridiagonal`]: [`DiagonalMatrix<T>`] and
//!   [`TridiagonalMatrix<T>`]. Writes that would break the structure fail
//!   with [`MatrixError::InvalidOperation`].
//!
//! - [`sparse`]: [`SparseMatrix<T>`] (compressed sparse row) and the
//!   coordinate-list [`SparseBuilder<T>`].
//!
//! - [`linalg`]: in-place kernels on [`traits::MatrixMut`]: LU with partial
//!   pivoting, Householder tridiagonalization and implicit-shift QR.
//!
//! - [`traits`]: element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`Element`]: integer, real or complex domain, with the field the kernel runs in
//!   - [`LinalgScalar`]: real floats and complex numbers, the kernel field
//!   - [`CastElement`]: explicit conversions between domains
//!
//! - [`error`], [`config`]: [`MatrixError`] and [`KernelConfig`].
//!
//! ## Scalar domains
//!
//! Integer matrices (`i32`, `i64`) keep determinant, trace and arithmetic in
//! the integer domain where the formula is exact, and promote to `f64` for
//! LU, inverses, solves and eigenvalues. Norms are always real. An integer
//! determinant or trace that does not fit the element type is
//! [`MatrixError::Overflow`] in every layout.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | `std::error::Error` for [`MatrixError`], [`KernelConfig::from_env`], hardware FPU |
//! | `complex` | yes      | `Complex<f32>` / `Complex<f64>` elements via `num-complex` |
//! | `libm`    | baseline | Pure-Rust software float fallback |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod config;
pub mod dense;
pub mod diagonal;
pub mod error;
pub mod layout;
pub mod linalg;
pub mod sparse;
pub mod traits;
pub mod tridiagonal;

pub use config::{KernelConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
pub use dense::{
    DenseLu, DenseMatrix, DenseMatrixf32, DenseMatrixf64, DenseMatrixi32, DenseMatrixi64,
    DenseSymmetricEigen,
};
#[cfg(feature = "complex")]
pub use dense::{DenseMatrixz32, DenseMatrixz64};
pub use diagonal::DiagonalMatrix;
pub use error::MatrixError;
pub use layout::MatrixLayout;
pub use sparse::{SparseBuilder, SparseMatrix};
pub use traits::{CastElement, Element, FloatScalar, LinalgScalar, Real, Scalar};
pub use tridiagonal::TridiagonalMatrix;

#[cfg(feature = "complex")]
pub use num_complex::Complex;

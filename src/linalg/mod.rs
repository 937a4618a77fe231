//! In-place numeric kernels shared by every layout.
//!
//! These free functions work on anything implementing [`MatrixMut`](crate::traits::MatrixMut)
//! and never allocate the matrix they operate on. The layout types wrap them
//! in checked, allocating APIs (`DenseMatrix::lu`, `MatrixLayout::det`, ...).

pub mod lu;
pub mod symmetric_eigen;

pub use lu::{lu_in_place, lu_solve};
pub use symmetric_eigen::{tridiagonal_qr_no_vecs, tridiagonal_qr_with_vecs, tridiagonalize};

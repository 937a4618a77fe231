use alloc::vec;
use alloc::vec::Vec;

use num_traits::{Float, One, Zero};

use crate::error::MatrixError;
use crate::traits::{LinalgScalar, MatrixMut, MatrixRef};

/// Householder tridiagonalization: reduce a symmetric (Hermitian) matrix to
/// tridiagonal form via similarity transforms.
///
/// On return:
/// - `diag[0..n]` contains the diagonal of the tridiagonal matrix
/// - `off_diag[0..n-1]` contains the sub-diagonal (off_diag[i] = T_{i+1,i}),
///   made real and nonnegative by a diagonal unitary similarity
/// - `q` accumulates the orthogonal/unitary transform Q such that Q^H A Q = T
///
/// Only the lower triangle of `a` is trusted to be consistent with the upper
/// one; `a` itself is not modified.
pub fn tridiagonalize<T: LinalgScalar>(
    a: &impl MatrixRef<T>,
    diag: &mut [T::Real],
    off_diag: &mut [T::Real],
    q: &mut impl MatrixMut<T>,
) {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "tridiagonalize requires a square matrix");
    assert!(diag.len() >= n);
    assert!(off_diag.len() + 1 >= n);

    // Working copy, flat row-major
    let mut w: Vec<T> = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            w.push(*a.get(i, j));
        }
    }

    for i in 0..n {
        for j in 0..n {
            *q.get_mut(i, j) = if i == j { T::one() } else { T::zero() };
        }
    }

    let two = <T::Real as One>::one() + <T::Real as One>::one();
    // Sub-diagonal before phase normalization; complex for Hermitian input
    let mut sub = vec![T::zero(); n.saturating_sub(1)];

    for k in 0..n.saturating_sub(2) {
        // Householder vector from w[k+1:n, k]
        let mut norm_sq = <T::Real as Zero>::zero();
        for i in (k + 1)..n {
            let v = w[i * n + k];
            norm_sq = norm_sq + (v * v.conj()).re();
        }

        if norm_sq <= T::lepsilon() * T::lepsilon() {
            continue;
        }

        let norm = norm_sq.lsqrt();
        let wk1k = w[(k + 1) * n + k];
        let alpha = wk1k.modulus();

        let sigma = if alpha < T::lepsilon() {
            T::from_real(norm)
        } else {
            T::from_real(norm) * (wk1k / T::from_real(alpha))
        };

        let v0 = wk1k + sigma;
        let sub_n = n - k - 1;
        let v_at = |w: &[T], i: usize| if i == 0 { v0 } else { w[(k + 1 + i) * n + k] };

        let mut v_norm_sq = <T::Real as Zero>::zero();
        for i in 0..sub_n {
            let vi = v_at(&w, i);
            v_norm_sq = v_norm_sq + (vi * vi.conj()).re();
        }

        let tau_real = two / v_norm_sq;
        let tau = T::from_real(tau_real);

        // p = tau * A_sub * v, where A_sub = w[k+1:n, k+1:n]
        let mut p = vec![T::zero(); sub_n];
        for (i, p_i) in p.iter_mut().enumerate() {
            let row = k + 1 + i;
            let mut dot = T::zero();
            for jj in 0..sub_n {
                dot = dot + w[row * n + k + 1 + jj] * v_at(&w, jj);
            }
            *p_i = tau * dot;
        }

        // q_vec = p - (tau/2)(v^H p) v
        let mut vhp = T::zero();
        for (i, &p_i) in p.iter().enumerate() {
            vhp = vhp + v_at(&w, i).conj() * p_i;
        }
        let half_tau_vhp = T::from_real(tau_real / two) * vhp;
        let q_vec: Vec<T> = p
            .iter()
            .enumerate()
            .map(|(i, &p_i)| p_i - half_tau_vhp * v_at(&w, i))
            .collect();

        // Rank-2 update: A_sub -= v q_vec^H + q_vec v^H
        let v: Vec<T> = (0..sub_n).map(|i| v_at(&w, i)).collect();
        for i in 0..sub_n {
            for j in 0..sub_n {
                let idx = (k + 1 + i) * n + k + 1 + j;
                w[idx] = w[idx] - v[i] * q_vec[j].conj() - q_vec[i] * v[j].conj();
            }
        }

        sub[k] = T::zero() - sigma;

        // Q_new = Q * (I - tau v v^H)
        for row in 0..n {
            let mut s = T::zero();
            for (m, &vm) in v.iter().enumerate() {
                s = s + *q.get(row, k + 1 + m) * vm;
            }
            s = tau * s;
            for (j, &vj) in v.iter().enumerate() {
                let cur = *q.get(row, k + 1 + j);
                *q.get_mut(row, k + 1 + j) = cur - s * vj.conj();
            }
        }
    }

    for i in 0..n {
        diag[i] = w[i * n + i].re();
    }
    if n >= 2 {
        sub[n - 2] = w[(n - 1) * n + (n - 2)];
    }

    // D = diag(d_0, .., d_{n-1}) with d_{k+1} = d_k * e_k / |e_k| makes
    // D^H T D real with a nonnegative sub-diagonal; Q absorbs D.
    let mut phase = T::one();
    for (k, &e) in sub.iter().enumerate() {
        let m = e.modulus();
        off_diag[k] = m;
        if m > <T::Real as Zero>::zero() {
            phase = phase * (e / T::from_real(m));
        }
        if phase != T::one() {
            for row in 0..n {
                let cur = *q.get(row, k + 1);
                *q.get_mut(row, k + 1) = cur * phase;
            }
        }
    }
}

/// Implicit QR iteration with Wilkinson shift on a symmetric tridiagonal
/// matrix, accumulating the Givens rotations into `q`.
///
/// - `diag[0..n]`: diagonal entries (overwritten with eigenvalues, sorted ascending)
/// - `off_diag[0..n-1]`: sub-diagonal entries (destroyed)
/// - `max_iter`: QR sweeps allowed per eigenvalue; the count restarts every
///   time an eigenvalue deflates
pub fn tridiagonal_qr_with_vecs<T: LinalgScalar>(
    diag: &mut [T::Real],
    off_diag: &mut [T::Real],
    q: &mut impl MatrixMut<T>,
    max_iter: usize,
) -> Result<(), MatrixError> {
    tridiagonal_qr::<T::Real>(diag, off_diag, max_iter, |k, c, s| {
        // Q_new = Q * G^T, G^T = [[c, -s], [s, c]]
        for i in 0..q.nrows() {
            let qik = *q.get(i, k);
            let qik1 = *q.get(i, k + 1);
            *q.get_mut(i, k) = T::from_real(c) * qik + T::from_real(s) * qik1;
            *q.get_mut(i, k + 1) = T::from_real(c) * qik1 - T::from_real(s) * qik;
        }
    })?;

    sort_eigen_with_vecs::<T>(diag, q);
    Ok(())
}

/// Implicit QR iteration without eigenvector accumulation (eigenvalues only).
pub fn tridiagonal_qr_no_vecs<R: Float>(
    diag: &mut [R],
    off_diag: &mut [R],
    max_iter: usize,
) -> Result<(), MatrixError> {
    tridiagonal_qr::<R>(diag, off_diag, max_iter, |_, _, _| {})?;
    diag.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));
    Ok(())
}

fn tridiagonal_qr<R: Float>(
    diag: &mut [R],
    off_diag: &mut [R],
    max_iter: usize,
    mut rotate: impl FnMut(usize, R, R),
) -> Result<(), MatrixError> {
    let n = diag.len();
    if n <= 1 {
        return Ok(());
    }

    let eps = R::epsilon();
    let two = R::one() + R::one();
    let mut iter = 0usize;
    let mut hi = n - 1;

    while hi > 0 {
        let mut lo = hi;
        while lo > 0 {
            let threshold = eps * (diag[lo - 1].abs() + diag[lo].abs());
            if off_diag[lo - 1].abs() <= threshold {
                off_diag[lo - 1] = R::zero();
                break;
            }
            lo -= 1;
        }

        if lo == hi {
            tracing::trace!(index = hi, sweeps = iter, "eigenvalue deflated");
            hi -= 1;
            iter = 0;
            continue;
        }

        iter += 1;
        if iter > max_iter {
            tracing::debug!(
                index = hi,
                max_iterations = max_iter,
                "symmetric QR iteration did not converge"
            );
            return Err(MatrixError::MaxIterationsExceeded {
                iterations: max_iter,
            });
        }

        // Wilkinson shift
        let d = (diag[hi - 1] - diag[hi]) / two;
        let e = off_diag[hi - 1];
        let r = (d * d + e * e).sqrt();
        let shift = diag[hi] - e * e / (d + if d >= R::zero() { r } else { -r });

        let mut x = diag[lo] - shift;
        let mut z = off_diag[lo];

        for k in lo..hi {
            let (c, s) = givens(x, z);

            if k > lo {
                off_diag[k - 1] = c * x + s * z;
            }

            // T' = G T G^T
            let d_k = diag[k];
            let d_k1 = diag[k + 1];
            let e_k = off_diag[k];

            diag[k] = c * c * d_k + two * c * s * e_k + s * s * d_k1;
            diag[k + 1] = s * s * d_k - two * c * s * e_k + c * c * d_k1;
            off_diag[k] = c * s * (d_k1 - d_k) + (c * c - s * s) * e_k;

            if k + 1 < hi {
                // Chase the bulge at (k, k+2)
                let e_next = off_diag[k + 1];
                x = off_diag[k];
                z = s * e_next;
                off_diag[k + 1] = c * e_next;
            }

            rotate(k, c, s);
        }
    }

    Ok(())
}

/// Givens rotation: compute (c, s) such that [c, s; -s, c] * [a; b] = [r; 0].
#[inline]
pub(crate) fn givens<R: Float>(a: R, b: R) -> (R, R) {
    if b == R::zero() {
        (R::one(), R::zero())
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = R::one() / (R::one() + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = R::one() / (R::one() + t * t).sqrt();
        (c, c * t)
    }
}

/// Sort eigenvalues ascending and permute eigenvector columns to match.
fn sort_eigen_with_vecs<T: LinalgScalar>(diag: &mut [T::Real], q: &mut impl MatrixMut<T>) {
    let n = diag.len();
    for i in 0..n {
        let mut min_idx = i;
        for j in (i + 1)..n {
            if diag[j] < diag[min_idx] {
                min_idx = j;
            }
        }
        if min_idx != i {
            diag.swap(i, min_idx);
            for row in 0..q.nrows() {
                let tmp = *q.get(row, i);
                *q.get_mut(row, i) = *q.get(row, min_idx);
                *q.get_mut(row, min_idx) = tmp;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn givens_zeroes_second_component() {
        let (c, s) = givens(3.0_f64, 4.0);
        assert!((c * c + s * s - 1.0).abs() < 1e-15);
        assert!((-s * 3.0 + c * 4.0).abs() < 1e-15);
    }

    #[test]
    fn tridiagonal_qr_2x2() {
        // [[2, 1], [1, 2]] has eigenvalues 1 and 3
        let mut d = [2.0_f64, 2.0];
        let mut e = [1.0_f64];
        tridiagonal_qr_no_vecs(&mut d, &mut e, 50).unwrap();
        assert!((d[0] - 1.0).abs() < 1e-12);
        assert!((d[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn already_diagonal_needs_no_sweeps() {
        let mut d = [5.0_f64, -1.0, 2.0];
        let mut e = [0.0_f64, 0.0];
        tridiagonal_qr_no_vecs(&mut d, &mut e, 0).unwrap();
        assert_eq!(d, [-1.0, 2.0, 5.0]);
    }

    #[test]
    fn zero_budget_fails() {
        let mut d = [2.0_f64, 2.0];
        let mut e = [1.0_f64];
        assert_eq!(
            tridiagonal_qr_no_vecs(&mut d, &mut e, 0),
            Err(MatrixError::MaxIterationsExceeded { iterations: 0 })
        );
    }
}

use num_traits::Zero;

use crate::error::MatrixError;
use crate::traits::{LinalgScalar, MatrixMut, MatrixRef};

/// Perform LU decomposition with partial pivoting, in place.
///
/// On return, `a` contains both L and U packed together:
/// - Upper triangle (including diagonal): U
/// - Lower triangle (excluding diagonal): L (diagonal of L is implicitly 1)
///
/// `perm[i]` is the original row that ended up in row `i`, so that
/// `P·A = L·U` with `(P·A)[i] = A[perm[i]]`.
/// Returns `true` if the number of row swaps was even.
///
/// The pivot for each column is the entry of largest modulus on or below the
/// diagonal; ties go to the lowest row. An exactly-zero pivot column returns
/// [`MatrixError::Singular`] and leaves `a` partially eliminated.
pub fn lu_in_place<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    perm: &mut [usize],
) -> Result<bool, MatrixError> {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "LU decomposition requires a square matrix");
    assert_eq!(n, perm.len(), "permutation slice length must match matrix size");

    for (i, p) in perm.iter_mut().enumerate() {
        *p = i;
    }

    let mut even = true;

    for col in 0..n {
        let mut max_row = col;
        let mut max_val = a.get(col, col).modulus();
        for row in (col + 1)..n {
            let val = a.get(row, col).modulus();
            if val > max_val {
                max_val = val;
                max_row = row;
            }
        }

        if max_val.is_zero() {
            tracing::debug!(column = col, size = n, "zero pivot in LU elimination");
            return Err(MatrixError::Singular);
        }

        if max_row != col {
            perm.swap(col, max_row);
            for j in 0..n {
                let tmp = *a.get(col, j);
                *a.get_mut(col, j) = *a.get(max_row, j);
                *a.get_mut(max_row, j) = tmp;
            }
            even = !even;
        }

        // Store multipliers in place of the eliminated entries, then apply the
        // rank-1 update to the trailing block.
        let inv_pivot = T::one() / *a.get(col, col);
        for row in (col + 1)..n {
            let m = *a.get(row, col) * inv_pivot;
            *a.get_mut(row, col) = m;
        }
        for j in (col + 1)..n {
            let a_col_j = *a.get(col, j);
            if a_col_j.is_zero() {
                continue;
            }
            for row in (col + 1)..n {
                let l = *a.get(row, col);
                *a.get_mut(row, j) = *a.get(row, j) - l * a_col_j;
            }
        }
    }

    Ok(even)
}

/// Solve Ax = b given the packed LU decomposition and permutation.
///
/// `lu` is the packed L/U matrix from `lu_in_place`.
/// `perm` is the row permutation from `lu_in_place`.
/// `b` (input) and `x` (output) are separate slices of length n.
pub fn lu_solve<T: LinalgScalar>(lu: &impl MatrixRef<T>, perm: &[usize], b: &[T], x: &mut [T]) {
    let n = lu.nrows();

    // Forward substitution: solve Ly = Pb
    for i in 0..n {
        let mut sum = b[perm[i]];
        for j in 0..i {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum;
    }

    // Back substitution: solve Ux = y
    for i in (0..n).rev() {
        let mut sum = x[i];
        for j in (i + 1)..n {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum / *lu.get(i, i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DenseMatrix;
    use alloc::vec;

    #[test]
    fn packs_factors() {
        let mut a = DenseMatrix::from_rows(2, 2, &[4.0_f64, 3.0, 6.0, 3.0]);
        let mut perm = [0usize; 2];
        let even = lu_in_place(&mut a, &mut perm).unwrap();
        // Row 1 has the larger pivot candidate (6 > 4)
        assert_eq!(perm, [1, 0]);
        assert!(!even);
        assert_eq!(a[(0, 0)], 6.0);
        assert_eq!(a[(0, 1)], 3.0);
        assert!((a[(1, 0)] - 4.0 / 6.0).abs() < 1e-15);
        assert!((a[(1, 1)] - 1.0).abs() < 1e-15);
    }

    #[test]
    fn ties_pick_lowest_row() {
        let mut a = DenseMatrix::from_rows(3, 3, &[2.0_f64, 1.0, 0.0, -2.0, 3.0, 1.0, 2.0, 0.0, 5.0]);
        let mut perm = [0usize; 3];
        lu_in_place(&mut a, &mut perm).unwrap();
        assert_eq!(perm[0], 0);
    }

    #[test]
    fn zero_column_is_singular() {
        let mut a = DenseMatrix::from_rows(3, 3, &[0.0_f64, 1.0, 2.0, 0.0, 3.0, 4.0, 0.0, 5.0, 6.0]);
        let mut perm = [0usize; 3];
        assert_eq!(lu_in_place(&mut a, &mut perm), Err(MatrixError::Singular));
    }

    #[test]
    fn solve_3x3() {
        let mut a = DenseMatrix::from_rows(
            3,
            3,
            &[2.0_f64, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0],
        );
        let mut perm = [0usize; 3];
        lu_in_place(&mut a, &mut perm).unwrap();
        let mut x = vec![0.0; 3];
        lu_solve(&a, &perm, &[8.0, -11.0, -3.0], &mut x);
        assert!((x[0] - 2.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
        assert!((x[2] + 1.0).abs() < 1e-12);
    }
}

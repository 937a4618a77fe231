/// Errors from matrix construction, element access and the numeric kernel.
///
/// Every condition is local and synchronous: the kernel never retries, and a
/// failed call produces no partial result.
///
/// ```
/// use matrica::{DenseMatrix, MatrixError, MatrixLayout};
///
/// let empty = DenseMatrix::<f64>::zeros(0, 0);
/// assert_eq!(
///     empty.det().unwrap_err(),
///     MatrixError::UndefinedOnEmpty { operation: "determinant" },
/// );
///
/// let m = DenseMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// assert!(matches!(m.get(2, 0), Err(MatrixError::OutOfBounds { .. })));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Index outside `[0, nrows) x [0, ncols)`.
    OutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },
    /// Operand dimensions are incompatible for the requested operation.
    ShapeMismatch {
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Got `(rows, cols)`.
        got: (usize, usize),
    },
    /// Determinant, trace or norm requested on a matrix with no elements.
    UndefinedOnEmpty { operation: &'static str },
    /// Structural violation of a constrained layout.
    InvalidOperation { reason: &'static str },
    /// An LU pivot is exactly zero.
    Singular,
    /// Eigenvalue iteration did not converge within the iteration budget.
    MaxIterationsExceeded { iterations: usize },
    /// An integer result does not fit the element type.
    Overflow { operation: &'static str },
}

impl core::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatrixError::OutOfBounds {
                row,
                col,
                nrows,
                ncols,
            } => write!(
                f,
                "element ({}, {}) out of bounds for {}x{} matrix",
                row, col, nrows, ncols
            ),
            MatrixError::ShapeMismatch { expected, got } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, got.0, got.1
            ),
            MatrixError::UndefinedOnEmpty { operation } => {
                write!(f, "the {} of a zero dimension matrix is undefined", operation)
            }
            MatrixError::InvalidOperation { reason } => write!(f, "invalid operation: {}", reason),
            MatrixError::Singular => write!(f, "matrix is singular"),
            MatrixError::MaxIterationsExceeded { iterations } => write!(
                f,
                "eigenvalue iteration did not converge within {} iterations",
                iterations
            ),
            MatrixError::Overflow { operation } => {
                write!(f, "the {} overflows the element type", operation)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatrixError {}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, MatrixError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_out_of_bounds() {
        let e = MatrixError::OutOfBounds {
            row: 3,
            col: 1,
            nrows: 2,
            ncols: 2,
        };
        assert_eq!(e.to_string(), "element (3, 1) out of bounds for 2x2 matrix");
    }

    #[test]
    fn display_shape_mismatch() {
        let e = MatrixError::ShapeMismatch {
            expected: (2, 2),
            got: (2, 3),
        };
        assert_eq!(e.to_string(), "dimension mismatch: expected 2x2, got 2x3");
    }

    #[test]
    fn display_empty() {
        let e = MatrixError::UndefinedOnEmpty { operation: "trace" };
        assert_eq!(e.to_string(), "the trace of a zero dimension matrix is undefined");
    }

    #[test]
    fn display_overflow() {
        let e = MatrixError::Overflow { operation: "determinant" };
        assert_eq!(e.to_string(), "the determinant overflows the element type");
    }
}

use crate::traits::{CastElement, Element, Real};

#[cfg(feature = "complex")]
use crate::error::Result;
#[cfg(feature = "complex")]
use crate::layout::require_shape;
#[cfg(feature = "complex")]
use crate::traits::FloatScalar;
#[cfg(feature = "complex")]
use num_complex::Complex;

use super::DenseMatrix;

impl<T: Copy> DenseMatrix<T> {
    /// Apply `f` to every element.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let m = DenseMatrix::from_rows(1, 3, &[1, -2, 3]);
    /// let sq = m.map(|x| x * x);
    /// assert_eq!(sq[(0, 1)], 4);
    /// ```
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> DenseMatrix<U> {
        DenseMatrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl<T: Element> DenseMatrix<T> {
    /// Copy into the kernel field (`f64` for integer matrices).
    pub fn promote(&self) -> DenseMatrix<T::Field> {
        self.map(T::to_field)
    }

    /// Entry-wise magnitude, as reals.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let m = DenseMatrix::from_rows(1, 2, &[-3_i64, 2]);
    /// assert_eq!(m.abs(), DenseMatrix::from_rows(1, 2, &[3.0, 2.0]));
    /// ```
    pub fn abs(&self) -> DenseMatrix<Real<T>> {
        self.map(T::magnitude)
    }

    /// Convert to another scalar domain.
    ///
    /// Real to integer rounds half away from zero; complex to real keeps the
    /// real part.
    ///
    /// ```
    /// use matrica::DenseMatrix;
    /// let m = DenseMatrix::from_rows(1, 3, &[0.5_f64, -1.5, 2.4]);
    /// let r: DenseMatrix<i64> = m.cast();
    /// assert_eq!(r, DenseMatrix::from_rows(1, 3, &[1, -2, 2]));
    /// ```
    pub fn cast<U>(&self) -> DenseMatrix<U>
    where
        T: CastElement<U>,
    {
        self.map(<T as CastElement<U>>::cast_element)
    }
}

#[cfg(feature = "complex")]
impl<R: FloatScalar> DenseMatrix<Complex<R>> {
    /// Build a complex matrix from real and imaginary planes of equal shape.
    ///
    /// ```
    /// use matrica::{Complex, DenseMatrix};
    /// let re = DenseMatrix::from_rows(1, 2, &[1.0_f64, 2.0]);
    /// let im = DenseMatrix::from_rows(1, 2, &[0.0_f64, -1.0]);
    /// let z = DenseMatrix::from_parts(&re, &im).unwrap();
    /// assert_eq!(z[(0, 1)], Complex::new(2.0, -1.0));
    /// assert_eq!(z.imag(), im);
    /// ```
    pub fn from_parts(re: &DenseMatrix<R>, im: &DenseMatrix<R>) -> Result<Self> {
        require_shape((re.nrows, re.ncols), (im.nrows, im.ncols))?;
        Ok(DenseMatrix {
            data: re
                .data
                .iter()
                .zip(im.data.iter())
                .map(|(&a, &b)| Complex::new(a, b))
                .collect(),
            nrows: re.nrows,
            ncols: re.ncols,
        })
    }

    /// Real plane.
    pub fn real(&self) -> DenseMatrix<R> {
        self.map(|z| z.re)
    }

    /// Imaginary plane.
    pub fn imag(&self) -> DenseMatrix<R> {
        self.map(|z| z.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_promotes_to_f64() {
        let m = DenseMatrix::from_rows(2, 1, &[3_i32, -7]);
        let f: DenseMatrix<f64> = m.promote();
        assert_eq!(f, DenseMatrix::from_rows(2, 1, &[3.0, -7.0]));
    }

    #[test]
    fn cast_identity_and_widening() {
        let m = DenseMatrix::from_rows(1, 2, &[1_i32, 2]);
        assert_eq!(m.cast::<i32>(), m);
        assert_eq!(m.cast::<f32>(), DenseMatrix::from_rows(1, 2, &[1.0_f32, 2.0]));
    }

    #[cfg(feature = "complex")]
    #[test]
    fn complex_abs_is_modulus() {
        let z = DenseMatrix::from_rows(1, 2, &[Complex::new(3.0_f64, -4.0), Complex::new(0.0, 2.0)]);
        assert_eq!(z.abs(), DenseMatrix::from_rows(1, 2, &[5.0, 2.0]));
    }

    #[cfg(feature = "complex")]
    #[test]
    fn complex_to_real_drops_imaginary() {
        let z = DenseMatrix::from_rows(1, 2, &[Complex::new(1.0_f64, 5.0), Complex::new(-2.0, 1.0)]);
        let r: DenseMatrix<f64> = z.cast();
        assert_eq!(r, z.real());
        assert_eq!(r, DenseMatrix::from_rows(1, 2, &[1.0, -2.0]));
    }

    #[cfg(feature = "complex")]
    #[test]
    fn from_parts_shape_mismatch() {
        let re = DenseMatrix::<f64>::zeros(2, 2);
        let im = DenseMatrix::<f64>::zeros(2, 1);
        assert!(DenseMatrix::from_parts(&re, &im).is_err());
    }
}

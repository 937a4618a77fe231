use core::fmt::Debug;
use num_traits::{Float, Num, NumCast, One, Zero};

#[cfg(feature = "complex")]
use num_complex::Complex;

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, all integer types, and `Complex<T>`.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Implies `LinalgScalar<Real = Self>` since real floats are their own real type.
pub trait FloatScalar: Scalar + Float + LinalgScalar<Real = Self> {}

impl<T: Scalar + Float + LinalgScalar<Real = T>> FloatScalar for T {}

/// Trait for scalars the numeric kernel can run in.
///
/// Covers both real floats (`f32`, `f64`) and complex numbers (`Complex<f32>`,
/// `Complex<f64>`). LU elimination, tridiagonalization and the eigen iteration
/// are written once against this trait.
pub trait LinalgScalar: Scalar {
    /// The real component type (`Self` for reals, `T` for `Complex<T>`).
    type Real: FloatScalar;

    /// Absolute value / modulus: `|z|` for complex, `.abs()` for real.
    fn modulus(self) -> Self::Real;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> Self::Real;

    /// Imaginary part (zero for reals).
    fn im(self) -> Self::Real;

    /// Square root.
    fn lsqrt(self) -> Self;

    /// Machine epsilon of the underlying real type.
    fn lepsilon() -> Self::Real;

    /// Promote a real value into `Self`.
    fn from_real(r: Self::Real) -> Self;
}

macro_rules! impl_linalg_scalar_real {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for $t {
                type Real = $t;

                #[inline] fn modulus(self) -> $t { Float::abs(self) }
                #[inline] fn conj(self) -> $t { self }
                #[inline] fn re(self) -> $t { self }
                #[inline] fn im(self) -> $t { 0.0 }
                #[inline] fn lsqrt(self) -> $t { Float::sqrt(self) }
                #[inline] fn lepsilon() -> $t { <$t as Float>::epsilon() }
                #[inline] fn from_real(r: $t) -> $t { r }
            }
        )*
    };
}

impl_linalg_scalar_real!(f32, f64);

#[cfg(feature = "complex")]
impl<T: FloatScalar> LinalgScalar for Complex<T> {
    type Real = T;

    #[inline]
    fn modulus(self) -> T {
        self.norm()
    }

    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    #[inline]
    fn re(self) -> T {
        self.re
    }

    #[inline]
    fn im(self) -> T {
        self.im
    }

    #[inline]
    fn lsqrt(self) -> Self {
        self.sqrt()
    }

    #[inline]
    fn lepsilon() -> T {
        T::epsilon()
    }

    #[inline]
    fn from_real(r: T) -> Self {
        Complex::new(r, T::zero())
    }
}

/// Scalar domain adapter: integer, real or complex matrix elements.
///
/// Every element type names the kernel field it is promoted into for
/// LU elimination and eigenvalue work (`f64` for integers, itself otherwise),
/// and how a field value is narrowed back.
pub trait Element: Scalar {
    /// Field the numeric kernel runs in for this element type.
    type Field: LinalgScalar;

    /// Promote into the kernel field.
    fn to_field(self) -> Self::Field;

    /// Narrow a kernel field value back to the element type.
    ///
    /// Integers round half away from zero and saturate at their range.
    fn from_field(x: Self::Field) -> Self;

    /// Absolute value / modulus, as a real.
    #[inline]
    fn magnitude(self) -> Real<Self> {
        self.to_field().modulus()
    }

    /// Complex conjugate; the identity outside the complex domain.
    #[inline]
    fn conjugate(self) -> Self {
        self
    }

    /// `self + rhs`, or `None` when the sum leaves the element's range.
    ///
    /// Floating-point and complex elements never report overflow.
    #[inline]
    fn checked_sum(self, rhs: Self) -> Option<Self> {
        Some(self + rhs)
    }

    /// `self - rhs`, or `None` when the difference leaves the element's range.
    #[inline]
    fn checked_difference(self, rhs: Self) -> Option<Self> {
        Some(self - rhs)
    }

    /// `self * rhs`, or `None` when the product leaves the element's range.
    #[inline]
    fn checked_product(self, rhs: Self) -> Option<Self> {
        Some(self * rhs)
    }

    /// Like [`from_field`](Self::from_field), but `None` instead of
    /// saturating when the rounded value does not fit.
    #[inline]
    fn checked_from_field(x: Self::Field) -> Option<Self> {
        Some(Self::from_field(x))
    }
}

/// Real type that norms of a `T` matrix are reported in.
pub type Real<T> = <<T as Element>::Field as LinalgScalar>::Real;

macro_rules! impl_element_float {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                type Field = $t;

                #[inline] fn to_field(self) -> $t { self }
                #[inline] fn from_field(x: $t) -> $t { x }
            }
        )*
    };
}

impl_element_float!(f32, f64);

macro_rules! impl_element_int {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                type Field = f64;

                #[inline] fn to_field(self) -> f64 { self as f64 }
                #[inline] fn from_field(x: f64) -> $t { Float::round(x) as $t }

                #[inline]
                fn checked_sum(self, rhs: $t) -> Option<$t> {
                    <$t>::checked_add(self, rhs)
                }

                #[inline]
                fn checked_difference(self, rhs: $t) -> Option<$t> {
                    <$t>::checked_sub(self, rhs)
                }

                #[inline]
                fn checked_product(self, rhs: $t) -> Option<$t> {
                    <$t>::checked_mul(self, rhs)
                }

                // MIN is a power of two, so both bounds are exact in f64.
                #[inline]
                fn checked_from_field(x: f64) -> Option<$t> {
                    let r = Float::round(x);
                    let lo = <$t>::MIN as f64;
                    (r >= lo && r < -lo).then(|| r as $t)
                }
            }
        )*
    };
}

impl_element_int!(i32, i64);

#[cfg(feature = "complex")]
impl<T: FloatScalar> Element for Complex<T> {
    type Field = Complex<T>;

    #[inline]
    fn to_field(self) -> Self {
        self
    }

    #[inline]
    fn from_field(x: Self) -> Self {
        x
    }

    #[inline]
    fn conjugate(self) -> Self {
        Complex::conj(&self)
    }
}

/// Explicit, possibly lossy conversion between scalar domains.
///
/// - integer → real / complex: exact promotion
/// - real → integer: rounds half away from zero, saturating
/// - complex → real: keeps the real part, drops the imaginary part
/// - complex → integer: rounds the real part
pub trait CastElement<U> {
    fn cast_element(self) -> U;
}

impl<T: Scalar> CastElement<T> for T {
    #[inline]
    fn cast_element(self) -> T {
        self
    }
}

macro_rules! impl_cast_as {
    ($($from:ty => $($to:ty),+);* $(;)?) => {
        $($(
            impl CastElement<$to> for $from {
                #[inline]
                fn cast_element(self) -> $to {
                    self as $to
                }
            }
        )+)*
    };
}

impl_cast_as! {
    i32 => i64, f32, f64;
    i64 => f32, f64;
    f32 => f64;
    f64 => f32;
}

impl CastElement<i32> for i64 {
    #[inline]
    fn cast_element(self) -> i32 {
        self.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

macro_rules! impl_cast_round {
    ($($from:ty => $($to:ty),+);* $(;)?) => {
        $($(
            impl CastElement<$to> for $from {
                #[inline]
                fn cast_element(self) -> $to {
                    Float::round(self) as $to
                }
            }
        )+)*
    };
}

impl_cast_round! {
    f32 => i32, i64;
    f64 => i32, i64;
}

#[cfg(feature = "complex")]
macro_rules! impl_cast_into_complex {
    ($($from:ty),*) => {
        $(
            impl CastElement<Complex<f32>> for $from {
                #[inline]
                fn cast_element(self) -> Complex<f32> {
                    Complex::new(CastElement::<f32>::cast_element(self), 0.0)
                }
            }

            impl CastElement<Complex<f64>> for $from {
                #[inline]
                fn cast_element(self) -> Complex<f64> {
                    Complex::new(CastElement::<f64>::cast_element(self), 0.0)
                }
            }
        )*
    };
}

#[cfg(feature = "complex")]
impl_cast_into_complex!(i32, i64, f32, f64);

#[cfg(feature = "complex")]
macro_rules! impl_cast_from_complex {
    ($($re:ty => $($to:ty),+);* $(;)?) => {
        $($(
            impl CastElement<$to> for Complex<$re> {
                #[inline]
                fn cast_element(self) -> $to {
                    CastElement::<$to>::cast_element(self.re)
                }
            }
        )+)*
    };
}

#[cfg(feature = "complex")]
impl_cast_from_complex! {
    f32 => f32, f64, i32, i64;
    f64 => f32, f64, i32, i64;
}

#[cfg(feature = "complex")]
impl CastElement<Complex<f64>> for Complex<f32> {
    #[inline]
    fn cast_element(self) -> Complex<f64> {
        Complex::new(self.re as f64, self.im as f64)
    }
}

#[cfg(feature = "complex")]
impl CastElement<Complex<f32>> for Complex<f64> {
    #[inline]
    fn cast_element(self) -> Complex<f32> {
        Complex::new(self.re as f32, self.im as f32)
    }
}

/// Convert an `f64` constant into a kernel real.
///
/// Exact for `f64`; `f32` rounds to nearest, so the cast cannot fail.
#[inline]
pub(crate) fn real_from_f64<R: FloatScalar>(x: f64) -> R {
    <R as NumCast>::from(x).unwrap_or_else(R::zero)
}

/// Read-only, unchecked access to a matrix-like type.
///
/// The in-place kernels (`lu_in_place`, `tridiagonalize`) are written against
/// this trait. Indices are trusted; out-of-range access panics.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable, unchecked access to a matrix-like type.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;
}

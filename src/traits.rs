use core::fmt::Debug;
use core::ops::Neg;

use num_complex::Complex64;
use num_traits::{Float, Num, One, Zero};

/// Element type of the dense linear algebra kernels.
///
/// Implemented for `f64` and [`Complex64`], the two storage modes of an
/// [`Array`](crate::Array). Kernels written against this trait run the same
/// code for the real and complex paths; for reals `conj` is the identity
/// and `modulus` is `abs`.
pub trait LinalgScalar: Copy + PartialEq + Debug + Zero + One + Num + Neg<Output = Self> {
    /// Absolute value / modulus: `|z|` for complex, `.abs()` for real.
    fn modulus(self) -> f64;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> f64;

    /// Promote a real value into `Self`.
    fn from_real(r: f64) -> Self;

    /// `|x|^2` without the square root.
    #[inline]
    fn norm_sqr(self) -> f64 {
        (self * self.conj()).re()
    }
}

impl LinalgScalar for f64 {
    #[inline]
    fn modulus(self) -> f64 {
        Float::abs(self)
    }
    #[inline]
    fn conj(self) -> f64 {
        self
    }
    #[inline]
    fn re(self) -> f64 {
        self
    }
    #[inline]
    fn from_real(r: f64) -> f64 {
        r
    }
}

impl LinalgScalar for Complex64 {
    #[inline]
    fn modulus(self) -> f64 {
        crate::complex::cabs(self.re, self.im)
    }

    #[inline]
    fn conj(self) -> Self {
        Complex64::conj(&self)
    }

    #[inline]
    fn re(self) -> f64 {
        self.re
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        Complex64::new(r, 0.0)
    }

    #[inline]
    fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }
}

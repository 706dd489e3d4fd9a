use num_complex::Complex64;
use num_traits::Float;

use super::Operator;
use crate::complex::{cdiv, cmul, cpow};

/// `a + b`
#[derive(Debug, Clone, Copy, Default)]
pub struct Adder;

impl Operator for Adder {
    #[inline]
    fn apply_real(&self, a: f64, b: f64) -> f64 {
        a + b
    }

    #[inline]
    fn apply_complex(&self, a: Complex64, b: Complex64) -> Complex64 {
        a + b
    }
}

/// `a - b`
#[derive(Debug, Clone, Copy, Default)]
pub struct Subtractor;

impl Operator for Subtractor {
    #[inline]
    fn apply_real(&self, a: f64, b: f64) -> f64 {
        a - b
    }

    #[inline]
    fn apply_complex(&self, a: Complex64, b: Complex64) -> Complex64 {
        a - b
    }
}

/// `a .* b`
#[derive(Debug, Clone, Copy, Default)]
pub struct Multiplier;

impl Operator for Multiplier {
    #[inline]
    fn apply_real(&self, a: f64, b: f64) -> f64 {
        a * b
    }

    #[inline]
    fn apply_complex(&self, a: Complex64, b: Complex64) -> Complex64 {
        cmul(a, b)
    }
}

/// `a ./ b`
#[derive(Debug, Clone, Copy, Default)]
pub struct RightDivider;

impl Operator for RightDivider {
    #[inline]
    fn apply_real(&self, a: f64, b: f64) -> f64 {
        a / b
    }

    #[inline]
    fn apply_complex(&self, a: Complex64, b: Complex64) -> Complex64 {
        cdiv(a, b)
    }
}

/// `a .\ b`, i.e. `b ./ a`
#[derive(Debug, Clone, Copy, Default)]
pub struct LeftDivider;

impl Operator for LeftDivider {
    #[inline]
    fn apply_real(&self, a: f64, b: f64) -> f64 {
        b / a
    }

    #[inline]
    fn apply_complex(&self, a: Complex64, b: Complex64) -> Complex64 {
        cdiv(b, a)
    }
}

/// `a .^ b`
///
/// A negative base with a non-integer exponent has a complex result, so
/// any such pair moves the whole operation to the complex path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Power;

impl Operator for Power {
    #[inline]
    fn apply_real(&self, a: f64, b: f64) -> f64 {
        Float::powf(a, b)
    }

    #[inline]
    fn apply_complex(&self, a: Complex64, b: Complex64) -> Complex64 {
        cpow(a, b)
    }

    #[inline]
    fn requires_complex(&self, a: f64, b: f64) -> bool {
        a < 0.0 && b.is_finite() && b != Float::trunc(b)
    }
}

//! Robust complex arithmetic primitives.
//!
//! The `*` and `/` operators of [`Complex`] use the textbook formulas, which
//! leak `NaN` out of `0 * Inf` products and overflow in intermediate
//! `|b|^2` terms. The functions here special-case the pure-real and
//! pure-imaginary operands first and fall back to Smith's algorithm for the
//! general division, matching what the array operators need.
//!
//! ```
//! use matrt::complex::{cdiv, cmul};
//! use num_complex::Complex64;
//!
//! let a = Complex64::new(1.0, 2.0);
//! let b = Complex64::new(3.0, -4.0);
//! let q = cdiv(cmul(a, b), b);
//! assert!((q - a).norm() < 1e-14);
//!
//! // A real infinity times a pure real stays finite in the imaginary part.
//! let p = cmul(Complex64::new(f64::INFINITY, 0.0), Complex64::new(2.0, 0.0));
//! assert_eq!(p.im, 0.0);
//! ```

use num_complex::Complex;
use num_traits::Float;

/// Complex product with the zero-imaginary cases split out.
///
/// Pure real and pure imaginary operands never touch the other operand's
/// zero component, so `Inf * 0` terms do not appear.
#[inline]
pub fn cmul<T: Float>(a: Complex<T>, b: Complex<T>) -> Complex<T> {
    let (ar, ai, br, bi) = (a.re, a.im, b.re, b.im);
    let zero = T::zero();
    if ai == zero && bi == zero {
        Complex::new(ar * br, zero)
    } else if ai == zero && br == zero {
        Complex::new(zero, ar * bi)
    } else if ar == zero && bi == zero {
        Complex::new(zero, ai * br)
    } else if ai == zero {
        Complex::new(ar * br, ar * bi)
    } else if bi == zero {
        Complex::new(br * ar, br * ai)
    } else {
        Complex::new(ar * br - ai * bi, ar * bi + ai * br)
    }
}

/// Complex quotient `a / b` via Smith's algorithm.
///
/// Division by zero follows IEEE semantics per component and never fails.
pub fn cdiv<T: Float>(a: Complex<T>, b: Complex<T>) -> Complex<T> {
    let (ar, ai, br, bi) = (a.re, a.im, b.re, b.im);
    let zero = T::zero();
    let one = T::one();

    if ai == zero && bi == zero {
        return Complex::new(ar / br, zero);
    }
    if bi == zero {
        return Complex::new(ar / br, ai / br);
    }
    if ai == zero && br == zero {
        // a / (i bi) = -i a / bi
        return Complex::new(zero, -ar / bi);
    }
    if ar == zero && br == zero {
        return Complex::new(ai / bi, zero);
    }
    if ar == br && ai == bi {
        return Complex::new(one, zero);
    }

    let abr = br.abs();
    let abi = bi.abs();
    if abr <= abi {
        let ratio = br / bi;
        let den = bi * (one + ratio * ratio);
        Complex::new((ar * ratio + ai) / den, (ai * ratio - ar) / den)
    } else {
        let ratio = bi / br;
        let den = br * (one + ratio * ratio);
        Complex::new((ar + ai * ratio) / den, (ai - ar * ratio) / den)
    }
}

/// Modulus `sqrt(re^2 + im^2)` without intermediate overflow.
pub fn cabs<T: Float>(re: T, im: T) -> T {
    let mut big = re.abs();
    let mut small = im.abs();
    if small > big {
        core::mem::swap(&mut big, &mut small);
    }
    if big + small == big {
        return big;
    }
    let t = small / big;
    big * (T::one() + t * t).sqrt()
}

/// Real base, real exponent. Negative bases produce a complex result.
fn pow_real_real<T: Float>(ar: T, br: T) -> Complex<T> {
    let zero = T::zero();
    let mag = ar.abs();
    if mag == zero {
        return Complex::new(zero, zero);
    }
    let x = (mag.ln() * br).exp();
    if ar > zero {
        return Complex::new(x, zero);
    }
    let pi = T::from(core::f64::consts::PI).unwrap_or_else(T::zero);
    let y = pi * br;
    // y = br * pi: cos vanishes for odd 2*br, sin vanishes for even 2*br
    let two = T::one() + T::one();
    let n = (br * two).round();
    if br * two == n {
        let odd = (n / two).fract() != zero;
        return if odd {
            Complex::new(zero, x * y.sin())
        } else {
            Complex::new(x * y.cos(), zero)
        };
    }
    Complex::new(x * y.cos(), x * y.sin())
}

/// Purely imaginary base `i*ai`, real exponent.
fn pow_imag_real<T: Float>(ai: T, br: T) -> Complex<T> {
    let zero = T::zero();
    let mag = ai.abs();
    if mag == zero {
        return Complex::new(zero, zero);
    }
    let half_pi = T::from(core::f64::consts::FRAC_PI_2).unwrap_or_else(T::zero);
    let logr = mag.ln();
    let logi = if ai > zero { half_pi } else { -half_pi };
    let x = (logr * br).exp();
    let y = logi * br;
    // y = br * pi/2: cos vanishes for odd br, sin for even br
    let n = br.round();
    if br == n {
        let two = T::one() + T::one();
        let odd = (n / two).fract() != zero;
        return if odd {
            Complex::new(zero, x * y.sin())
        } else {
            Complex::new(x * y.cos(), zero)
        };
    }
    Complex::new(x * y.cos(), x * y.sin())
}

/// Complex power `a ^ b` on the principal branch. A zero exponent gives 1
/// for every base, `0^0` included.
///
/// ```
/// use matrt::complex::cpow;
/// use num_complex::Complex64;
///
/// // (-4)^0.5 = 2i, exactly
/// let r = cpow(Complex64::new(-4.0, 0.0), Complex64::new(0.5, 0.0));
/// assert_eq!(r.re, 0.0);
/// assert!((r.im - 2.0).abs() < 1e-12);
/// ```
pub fn cpow<T: Float>(a: Complex<T>, b: Complex<T>) -> Complex<T> {
    let zero = T::zero();
    if b.re == zero && b.im == zero {
        return Complex::new(T::one(), zero);
    }
    if a.im == zero && b.im == zero {
        return pow_real_real(a.re, b.re);
    }
    if a.re == zero && b.im == zero {
        return pow_imag_real(a.im, b.re);
    }
    let mag = cabs(a.re, a.im);
    if mag == zero {
        return Complex::new(zero, zero);
    }
    let logr = mag.ln();
    let logi = a.im.atan2(a.re);
    let x = (logr * b.re - logi * b.im).exp();
    let y = logr * b.im + logi * b.re;
    Complex::new(x * y.cos(), x * y.sin())
}

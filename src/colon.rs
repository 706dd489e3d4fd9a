//! Range (colon) generator for `start:step:stop` expressions.
//!
//! The element count is bracketed by two floor-division estimates of
//! `(stop - start) / step`, each nudged by one ULP in opposite directions.
//! When both estimates agree on the count, elements are produced from both
//! ends toward the middle, which keeps accumulated rounding at O(1) ULPs
//! and makes the last element land exactly on `stop`.
//!
//! ```
//! use matrt::ColonGenerator;
//!
//! let r = ColonGenerator::new(0.0, 0.1, 1.0).unwrap();
//! assert_eq!(r.len(), 11);
//! let v: Vec<f64> = r.collect();
//! assert_eq!(v[10], 1.0);
//! ```

use num_traits::Float;

use crate::array::Array;
use crate::error::{Error, Result};

/// Next representable `f64` after `x` in the direction of `y`.
///
/// Returns `y` when `x == y` and `NaN` when either argument is `NaN`.
///
/// ```
/// use matrt::colon::next_after;
///
/// assert!(next_after(1.0, 2.0) > 1.0);
/// assert_eq!(next_after(1.0, 2.0) - 1.0, f64::EPSILON);
/// assert_eq!(next_after(0.0, 1.0), f64::from_bits(1));
/// ```
pub fn next_after(x: f64, y: f64) -> f64 {
    if x.is_nan() || y.is_nan() {
        return f64::NAN;
    }
    if x == y {
        return y;
    }
    if x == 0.0 {
        let tiny = f64::from_bits(1);
        return if y > 0.0 { tiny } else { -tiny };
    }
    let bits = x.to_bits();
    // Moving away from zero increments the magnitude bits
    let away = (y > x) == (x > 0.0);
    let next = if away { bits + 1 } else { bits - 1 };
    f64::from_bits(next)
}

/// Lazy, finite, forward-only sequence for a colon expression.
///
/// Use [`done`](ColonGenerator::done) / [`Iterator::next`] the way generated
/// loop code does, or collect the whole range.
#[derive(Debug, Clone)]
pub struct ColonGenerator {
    start: f64,
    step: f64,
    stop: f64,
    len: usize,
    ndx: usize,
    double_sided: bool,
}

impl ColonGenerator {
    /// Create the generator for `start:step:stop`.
    ///
    /// A zero step is a [`Error::DegenerateRange`]. Any non-finite input
    /// yields an empty range.
    pub fn new(start: f64, step: f64, stop: f64) -> Result<Self> {
        if step == 0.0 {
            return Err(Error::DegenerateRange);
        }
        let mut gen = Self {
            start,
            step,
            stop,
            len: 0,
            ndx: 0,
            double_sided: false,
        };
        if !start.is_finite() || !step.is_finite() || !stop.is_finite() {
            return Ok(gen);
        }

        let span = stop - start;
        let n_min = next_after(span, 0.0) / next_after(step, step + step);
        let n_max = next_after(span, span + step) / next_after(step, 0.0);
        let npts = Float::floor(n_max);
        gen.double_sided = n_min <= npts && npts <= n_max;
        let npts = npts + 1.0;
        gen.len = if npts > 0.0 { npts as usize } else { 0 };
        Ok(gen)
    }

    /// Shorthand for `start:stop` with unit step.
    pub fn unit(start: f64, stop: f64) -> Self {
        match Self::new(start, 1.0, stop) {
            Ok(gen) => gen,
            Err(_) => unreachable!("unit step is nonzero"),
        }
    }

    /// Total number of elements in the range.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the range has no elements at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `true` once every element has been produced.
    #[inline]
    pub fn done(&self) -> bool {
        self.ndx >= self.len
    }

    /// Element `ndx` (zero-based) of the range.
    fn value_at(&self, ndx: usize) -> f64 {
        if self.double_sided && 2 * ndx >= self.len {
            let from_end = (self.len - 1 - ndx) as f64;
            self.stop - from_end * self.step
        } else {
            self.start + ndx as f64 * self.step
        }
    }

    /// Materialize the remaining elements as a `1 x N` row vector.
    ///
    /// ```
    /// use matrt::ColonGenerator;
    ///
    /// let a = ColonGenerator::new(1.0, 2.0, 7.0).unwrap().to_array();
    /// assert_eq!(a.dims(), &[1, 4]);
    /// assert_eq!(a.real(), &[1.0, 3.0, 5.0, 7.0]);
    /// ```
    pub fn to_array(self) -> Array {
        let values: alloc::vec::Vec<f64> = self.collect();
        let n = values.len();
        Array::from_vec(&[1, n], values)
    }
}

impl Iterator for ColonGenerator {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done() {
            return None;
        }
        let p = self.value_at(self.ndx);
        self.ndx += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.len - self.ndx.min(self.len);
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for ColonGenerator {}

//! Elementwise operator engine.
//!
//! Each operator is a small strategy type implementing [`Operator`],
//! [`Comparator`] or [`LogicalOperator`]. The generic drivers
//! ([`bin_op`], [`cmp_op`], [`log_op`]) handle operand shapes, complex
//! promotion and result kinds, then call the strategy once per element, so
//! every operator gets its own monomorphized loop.
//!
//! # Broadcasting
//!
//! A scalar operand (one element) pairs with every element of the other
//! operand. Otherwise the dims must agree after padding the shorter list
//! with trailing 1s, or the call fails with
//! [`Error::ShapeMismatch`](crate::Error::ShapeMismatch).
//!
//! ```
//! use matrt::ops::{bin_op, Adder};
//! use matrt::{Array, Value};
//!
//! let a = Value::from(Array::from_vec(&[1, 3], vec![1.0, 2.0, 3.0]));
//! let c = bin_op(&a, &Value::Real(10.0), &Adder).unwrap();
//! assert_eq!(c, Value::from(Array::from_vec(&[1, 3], vec![11.0, 12.0, 13.0])));
//! ```

mod binop;
mod cmpop;
mod comparators;
mod operators;
mod unary;

pub use binop::bin_op;
pub use cmpop::{cmp_op, log_op};
pub use comparators::{
    And, Equals, GreaterEquals, GreaterThan, LessEquals, LessThan, NotEquals, Or, Xor,
};
pub use operators::{Adder, LeftDivider, Multiplier, Power, RightDivider, Subtractor};
pub use unary::{conj, not, uminus};

use alloc::vec::Vec;

use num_complex::Complex64;

use crate::array::{same_dims, ElementKind};
use crate::error::{Error, Result};
use crate::value::Value;

/// Binary arithmetic strategy.
pub trait Operator {
    /// Result for two real operands.
    fn apply_real(&self, a: f64, b: f64) -> f64;

    /// Result for two complex operands.
    fn apply_complex(&self, a: Complex64, b: Complex64) -> Complex64;

    /// Whether this real pair has a complex result, forcing the whole
    /// operation onto the complex path.
    #[inline]
    fn requires_complex(&self, _a: f64, _b: f64) -> bool {
        false
    }
}

/// Binary comparison strategy producing logicals.
pub trait Comparator {
    /// Compare two reals.
    fn cmp_real(&self, a: f64, b: f64) -> bool;

    /// Compare two complex numbers.
    fn cmp_complex(&self, a: Complex64, b: Complex64) -> bool;
}

/// Binary logical strategy.
pub trait LogicalOperator {
    /// Combine two truth values.
    fn apply(&self, a: bool, b: bool) -> bool;
}

/// Borrowed, storage-level view of one operand.
///
/// Scalars get a stride of 0 so that a single index expression serves both
/// the scalar and the array side of a broadcast.
pub(crate) struct Operand<'a> {
    pub dims: &'a [usize],
    pub real: &'a [f64],
    pub imag: Option<&'a [f64]>,
    pub kind: ElementKind,
}

impl<'a> Operand<'a> {
    pub fn new(v: &'a Value) -> Self {
        const SCALAR: &[usize] = &[1, 1];
        match v {
            Value::Real(x) => Operand {
                dims: SCALAR,
                real: core::slice::from_ref(x),
                imag: None,
                kind: ElementKind::Double,
            },
            Value::Logical(b) => Operand {
                dims: SCALAR,
                real: if *b { &[1.0] } else { &[0.0] },
                imag: None,
                kind: ElementKind::Logical,
            },
            Value::Complex(z) => Operand {
                dims: SCALAR,
                real: core::slice::from_ref(&z.re),
                imag: Some(core::slice::from_ref(&z.im)),
                kind: ElementKind::Double,
            },
            Value::Array(a) => Operand {
                dims: a.dims(),
                real: a.real(),
                imag: a.imag(),
                kind: a.kind(),
            },
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.real.len()
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.len() == 1
    }

    /// Index increment per output element.
    #[inline]
    pub fn stride(&self) -> usize {
        usize::from(!self.is_scalar())
    }

    #[inline]
    pub fn complex(&self, ndx: usize) -> Complex64 {
        Complex64::new(self.real[ndx], self.imag.map_or(0.0, |im| im[ndx]))
    }

    /// Whether any element has a nonzero imaginary part.
    pub fn has_imag(&self) -> bool {
        self.imag.is_some_and(|im| im.iter().any(|&x| x != 0.0))
    }
}

/// Output dims of an elementwise operation on `a` and `b`.
pub(crate) fn broadcast_dims(a: &Operand<'_>, b: &Operand<'_>) -> Result<Vec<usize>> {
    if a.is_scalar() {
        Ok(b.dims.to_vec())
    } else if b.is_scalar() || same_dims(a.dims, b.dims) {
        Ok(a.dims.to_vec())
    } else {
        Err(Error::shape(a.dims, b.dims))
    }
}

//! Dynamically typed runtime values.
//!
//! A [`Value`] is what generated code passes around: a bare real, logical
//! or complex scalar, or an N-dimensional [`Array`]. Scalars behave as
//! `1x1` arrays wherever shape matters.
//!
//! ```
//! use matrt::{Array, Value};
//! use num_complex::Complex64;
//!
//! let x = Value::from(2.0);
//! assert!(x.is_scalar());
//! assert_eq!(x.dims(), &[1, 1]);
//!
//! let z = Value::from(Complex64::new(1.0, 0.0));
//! assert_eq!(z.demote(), Value::Real(1.0));
//!
//! let a = Value::from(Array::zeros(&[2, 3]));
//! assert_eq!(a.len(), 6);
//! ```

use core::fmt;

use num_complex::Complex64;

use crate::array::{linear_index, out_of_range, Array, ElementKind};
use crate::error::{Error, Result};

const SCALAR_DIMS: &[usize] = &[1, 1];

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Double-precision real scalar.
    Real(f64),
    /// Logical scalar.
    Logical(bool),
    /// Complex scalar.
    Complex(Complex64),
    /// N-dimensional array.
    Array(Array),
}

impl Value {
    /// Shape; `[1, 1]` for the scalar variants.
    pub fn dims(&self) -> &[usize] {
        match self {
            Value::Array(a) => a.dims(),
            _ => SCALAR_DIMS,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(a) => a.len(),
            _ => 1,
        }
    }

    /// Whether the value has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the value holds exactly one element.
    pub fn is_scalar(&self) -> bool {
        self.len() == 1
    }

    /// Whether the value carries imaginary parts.
    pub fn is_complex(&self) -> bool {
        match self {
            Value::Complex(_) => true,
            Value::Array(a) => a.is_complex(),
            _ => false,
        }
    }

    /// Whether the value is logical.
    pub fn is_logical(&self) -> bool {
        self.kind() == ElementKind::Logical
    }

    /// Storage kind. Real and complex scalars are `Double`.
    pub fn kind(&self) -> ElementKind {
        match self {
            Value::Logical(_) => ElementKind::Logical,
            Value::Array(a) => a.kind(),
            _ => ElementKind::Double,
        }
    }

    /// The single element as a complex number, or `None` if the value is
    /// not a scalar.
    pub fn scalar(&self) -> Option<Complex64> {
        match self {
            Value::Real(x) => Some(Complex64::new(*x, 0.0)),
            Value::Logical(b) => Some(Complex64::new(if *b { 1.0 } else { 0.0 }, 0.0)),
            Value::Complex(z) => Some(*z),
            Value::Array(a) if a.is_scalar() => Some(a.element(0)),
            Value::Array(_) => None,
        }
    }

    /// Convert into an array, materializing scalars as `1x1` arrays.
    pub fn into_array(self) -> Array {
        match self {
            Value::Real(x) => Array::scalar(x),
            Value::Logical(b) => Array::from_bools(&[1, 1], &[b]),
            Value::Complex(z) => Array::complex_scalar(z),
            Value::Array(a) => a,
        }
    }

    /// Drop all-zero imaginary parts and unwrap `1x1` arrays into scalars.
    ///
    /// `Single` arrays stay arrays so their precision is not widened.
    pub fn demote(self) -> Value {
        match self {
            Value::Complex(z) if z.im == 0.0 => Value::Real(z.re),
            Value::Array(mut a) => {
                a.demote();
                if a.is_scalar() && a.is_matrix() && a.kind() != ElementKind::Single {
                    a.value_at(0)
                } else {
                    Value::Array(a)
                }
            }
            v => v,
        }
    }

    /// Read the element at 1-based `coords`.
    pub fn get(&self, coords: &[usize]) -> Result<Value> {
        match self {
            Value::Array(a) => a.get(coords),
            v => match linear_index(SCALAR_DIMS, coords)? {
                Some(_) => Ok(v.clone()),
                None => Err(out_of_range(SCALAR_DIMS, coords)),
            },
        }
    }

    /// Write the element at 1-based `coords`. A scalar becomes an array
    /// first, so `x(3) = 1` on a scalar `x` yields a `1x3` array. A failed
    /// write leaves a scalar untouched.
    pub fn set(&mut self, coords: &[usize], value: impl Into<Value>) -> Result<()> {
        if let Value::Array(a) = self {
            return a.set(coords, value);
        }
        let mut a = self.clone().into_array();
        a.set(coords, value)?;
        *self = Value::Array(a);
        Ok(())
    }

    /// Interpret this value as a 1-based index.
    ///
    /// The value must be a real, finite integer. Integers below 1 map to 0
    /// so that indexing reports them against the axis they address.
    ///
    /// ```
    /// use matrt::{Error, Value};
    ///
    /// assert_eq!(Value::Real(3.0).as_index().unwrap(), 3);
    /// assert_eq!(Value::Logical(true).as_index().unwrap(), 1);
    /// assert!(matches!(Value::Real(2.5).as_index(), Err(Error::InvalidIndex { .. })));
    /// ```
    pub fn as_index(&self) -> Result<usize> {
        let z = self
            .scalar()
            .ok_or(Error::Unsupported("non-scalar index values"))?;
        if z.im != 0.0 {
            return Err(Error::Complex("indices must be real"));
        }
        let x = z.re;
        if !x.is_finite() || x != num_traits::Float::trunc(x) {
            return Err(Error::InvalidIndex { value: x });
        }
        Ok(if x < 1.0 { 0 } else { x as usize })
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Logical(b)
    }
}

impl From<Complex64> for Value {
    fn from(z: Complex64) -> Self {
        Value::Complex(z)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Real(x) => write!(f, "{}", x),
            Value::Logical(b) => write!(f, "{}", u8::from(*b)),
            Value::Complex(z) => write!(f, "{}{:+}i", z.re, z.im),
            Value::Array(a) => write!(f, "{}", a),
        }
    }
}

use alloc::vec::Vec;

use super::{broadcast_dims, Comparator, LogicalOperator, Operand};
use crate::array::{elements, Array, ElementKind};
use crate::error::{Error, Result};
use crate::value::Value;

fn logical_result(dims: Vec<usize>, bits: Vec<f64>, scalar: bool) -> Value {
    if scalar {
        Value::Logical(bits[0] != 0.0)
    } else {
        Value::Array(Array::from_raw(dims, bits, None, ElementKind::Logical))
    }
}

/// Apply a comparison elementwise with scalar broadcasting.
///
/// The result is logical: a [`Value::Logical`] for two scalar operands,
/// a logical array otherwise. If either side is complex the comparison
/// runs on complex values.
///
/// ```
/// use matrt::ops::{cmp_op, LessThan};
/// use matrt::{Array, Value};
///
/// let a = Value::from(Array::from_vec(&[1, 3], vec![1.0, 5.0, 3.0]));
/// let r = cmp_op(&a, &Value::Real(3.0), &LessThan).unwrap();
/// assert_eq!(r, Value::from(Array::from_bools(&[1, 3], &[true, false, false])));
/// ```
pub fn cmp_op<C: Comparator>(a: &Value, b: &Value, op: &C) -> Result<Value> {
    let x = Operand::new(a);
    let y = Operand::new(b);
    let dims = broadcast_dims(&x, &y)?;
    let n = elements(&dims);
    let (sx, sy) = (x.stride(), y.stride());

    let bits: Vec<f64> = if x.imag.is_some() || y.imag.is_some() {
        (0..n)
            .map(|i| f64::from(u8::from(op.cmp_complex(x.complex(i * sx), y.complex(i * sy)))))
            .collect()
    } else {
        (0..n)
            .map(|i| f64::from(u8::from(op.cmp_real(x.real[i * sx], y.real[i * sy]))))
            .collect()
    };
    Ok(logical_result(dims, bits, x.is_scalar() && y.is_scalar()))
}

/// Check that an operand can be read as truth values.
///
/// Complex operands are accepted only when every imaginary part is zero.
pub(crate) fn check_logical(x: &Operand<'_>) -> Result<()> {
    if x.has_imag() {
        return Err(Error::Complex("cannot use complex values in logical operations"));
    }
    if x.real.iter().any(|v| v.is_nan()) {
        return Err(Error::Unsupported("NaN values cannot be converted to logicals"));
    }
    Ok(())
}

/// Apply a logical operator elementwise with scalar broadcasting.
///
/// Nonzero values are true. Complex operands with a nonzero imaginary part
/// are an [`Error::Complex`]; `NaN` operands are rejected as well.
///
/// ```
/// use matrt::ops::{log_op, Or};
/// use matrt::{Array, Value};
///
/// let a = Value::from(Array::from_vec(&[1, 3], vec![0.0, 2.0, 0.0]));
/// let r = log_op(&a, &Value::Logical(false), &Or).unwrap();
/// assert_eq!(r, Value::from(Array::from_bools(&[1, 3], &[false, true, false])));
/// ```
pub fn log_op<L: LogicalOperator>(a: &Value, b: &Value, op: &L) -> Result<Value> {
    let x = Operand::new(a);
    let y = Operand::new(b);
    check_logical(&x)?;
    check_logical(&y)?;
    let dims = broadcast_dims(&x, &y)?;
    let n = elements(&dims);
    let (sx, sy) = (x.stride(), y.stride());

    let bits: Vec<f64> = (0..n)
        .map(|i| {
            let p = x.real[i * sx] != 0.0;
            let q = y.real[i * sy] != 0.0;
            f64::from(u8::from(op.apply(p, q)))
        })
        .collect();
    Ok(logical_result(dims, bits, x.is_scalar() && y.is_scalar()))
}

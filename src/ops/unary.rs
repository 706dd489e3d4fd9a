use alloc::vec::Vec;

use super::cmpop::check_logical;
use super::Operand;
use crate::array::{Array, ElementKind};
use crate::error::Result;
use crate::value::Value;

/// Logical negation, `~a`.
///
/// Follows the same operand rules as [`log_op`](super::log_op).
///
/// ```
/// use matrt::ops::not;
/// use matrt::Value;
///
/// assert_eq!(not(&Value::Real(0.0)).unwrap(), Value::Logical(true));
/// ```
pub fn not(a: &Value) -> Result<Value> {
    let x = Operand::new(a);
    check_logical(&x)?;
    if let Value::Array(arr) = a {
        let bits: Vec<f64> = x.real.iter().map(|&v| if v == 0.0 { 1.0 } else { 0.0 }).collect();
        return Ok(Value::Array(Array::from_raw(
            arr.dims().to_vec(),
            bits,
            None,
            ElementKind::Logical,
        )));
    }
    Ok(Value::Logical(x.real[0] == 0.0))
}

/// Negation, `-a`. Logical inputs produce doubles; complexness and the
/// `Single` kind are preserved.
pub fn uminus(a: &Value) -> Result<Value> {
    Ok(match a {
        Value::Real(x) => Value::Real(-x),
        Value::Logical(b) => Value::Real(if *b { -1.0 } else { 0.0 }),
        Value::Complex(z) => Value::Complex(-z),
        Value::Array(arr) => {
            let kind = arr.kind().arithmetic(arr.kind());
            let real = arr.real().iter().map(|x| -x).collect();
            let imag = arr.imag().map(|im| im.iter().map(|x| -x).collect());
            Value::Array(Array::from_raw(arr.dims().to_vec(), real, imag, kind))
        }
    })
}

/// Complex conjugate. Real values are returned unchanged.
pub fn conj(a: &Value) -> Value {
    match a {
        Value::Complex(z) => Value::Complex(z.conj()),
        Value::Array(arr) if arr.is_complex() => {
            let imag = arr.imag().map(|im| im.iter().map(|x| -x).collect());
            Value::Array(Array::from_raw(
                arr.dims().to_vec(),
                arr.real().to_vec(),
                imag,
                arr.kind(),
            ))
        }
        v => v.clone(),
    }
}

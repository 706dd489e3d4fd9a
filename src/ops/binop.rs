use alloc::vec;
use alloc::vec::Vec;

use num_complex::Complex64;

use super::{broadcast_dims, Operand, Operator};
use crate::array::{elements, Array, ElementKind};
use crate::error::Result;
use crate::value::Value;

/// Apply an arithmetic operator elementwise with scalar broadcasting.
///
/// The computation is complex if either operand is complex, or if the
/// operator reports that some real pair needs it (see
/// [`Operator::requires_complex`]). Two scalar operands give a scalar
/// [`Value`], unless the result kind is `Single`. Results are never demoted
/// implicitly: `(1+2i) + (1-2i)` is a complex value with zero imaginary part.
///
/// ```
/// use matrt::ops::{bin_op, Power};
/// use matrt::Value;
///
/// let r = bin_op(&Value::Real(-8.0), &Value::Real(1.0 / 3.0), &Power).unwrap();
/// let z = r.scalar().unwrap();
/// assert!((z.re - 1.0).abs() < 1e-12);
/// assert!((z.im - 3f64.sqrt()).abs() < 1e-12);
/// ```
pub fn bin_op<O: Operator>(a: &Value, b: &Value, op: &O) -> Result<Value> {
    if let (Some(p), Some(q)) = (plain_scalar(a), plain_scalar(b)) {
        let complex = matches!(a, Value::Complex(_))
            || matches!(b, Value::Complex(_))
            || op.requires_complex(p.re, q.re);
        return Ok(if complex {
            Value::Complex(op.apply_complex(p, q))
        } else {
            Value::Real(op.apply_real(p.re, q.re))
        });
    }

    let x = Operand::new(a);
    let y = Operand::new(b);
    let dims = broadcast_dims(&x, &y)?;
    let kind = x.kind.arithmetic(y.kind);
    let n = elements(&dims);
    let (sx, sy) = (x.stride(), y.stride());

    let complex = x.imag.is_some()
        || y.imag.is_some()
        || (0..n).any(|i| op.requires_complex(x.real[i * sx], y.real[i * sy]));

    if complex {
        let mut re = vec![0.0; n];
        let mut im = vec![0.0; n];
        for i in 0..n {
            let z = op.apply_complex(x.complex(i * sx), y.complex(i * sy));
            re[i] = kind.store(z.re);
            im[i] = kind.store(z.im);
        }
        if n == 1 && kind == ElementKind::Double && x.is_scalar() && y.is_scalar() {
            return Ok(Value::Complex(Complex64::new(re[0], im[0])));
        }
        return Ok(Value::Array(Array::from_raw(dims, re, Some(im), kind)));
    }

    let real: Vec<f64> = (0..n)
        .map(|i| kind.store(op.apply_real(x.real[i * sx], y.real[i * sy])))
        .collect();
    if n == 1 && kind == ElementKind::Double && x.is_scalar() && y.is_scalar() {
        return Ok(Value::Real(real[0]));
    }
    Ok(Value::Array(Array::from_raw(dims, real, None, kind)))
}

/// A non-array operand. Arithmetic on two of these is always `Double`.
fn plain_scalar(v: &Value) -> Option<Complex64> {
    match *v {
        Value::Real(x) => Some(Complex64::new(x, 0.0)),
        Value::Logical(l) => Some(Complex64::new(if l { 1.0 } else { 0.0 }, 0.0)),
        Value::Complex(z) => Some(z),
        Value::Array(_) => None,
    }
}

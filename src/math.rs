//! Public operator API consumed by generated code.
//!
//! Every function takes `&Value` operands and returns a fresh
//! `Result<Value>`. Elementwise functions forward to the [`ops`](crate::ops)
//! engine with the matching strategy type. Matrix functions (`mtimes`,
//! `transpose`, `hermitian`, `mldivide`, `mrdivide`) go through a
//! [`LinalgBackend`]: the `*_with` forms take one explicitly, the plain forms
//! use [`DenseBackend`](crate::linalg::DenseBackend) and report solver
//! warnings through `tracing`.
//!
//! ```
//! use matrt::math::{mtimes, plus, transpose};
//! use matrt::{Array, Value};
//!
//! let a = Value::from(Array::from_vec(&[2, 2], vec![1.0, 3.0, 2.0, 4.0]));
//! let at = transpose(&a).unwrap();
//! let s = plus(&a, &at).unwrap();
//! assert_eq!(s, Value::from(Array::from_vec(&[2, 2], vec![2.0, 5.0, 5.0, 8.0])));
//!
//! // [1 2; 3 4] * [1 2; 3 4]' = [5 11; 11 25]
//! let p = mtimes(&a, &at).unwrap();
//! assert_eq!(p, Value::from(Array::from_vec(&[2, 2], vec![5.0, 11.0, 11.0, 25.0])));
//! ```

use alloc::borrow::Cow;

use crate::array::{Array, ElementKind};
use crate::error::Result;
use crate::linalg::LinalgBackend;
use crate::ops::{
    self, bin_op, cmp_op, log_op, Adder, And, Equals, GreaterEquals, GreaterThan, LeftDivider,
    LessEquals, LessThan, Multiplier, NotEquals, Or, Power, RightDivider, Subtractor, Xor,
};
use crate::value::Value;

// ── Elementwise arithmetic ──────────────────────────────────────────

/// `a + b`
pub fn plus(a: &Value, b: &Value) -> Result<Value> {
    bin_op(a, b, &Adder)
}

/// `a - b`
pub fn minus(a: &Value, b: &Value) -> Result<Value> {
    bin_op(a, b, &Subtractor)
}

/// `a .* b`
pub fn times(a: &Value, b: &Value) -> Result<Value> {
    bin_op(a, b, &Multiplier)
}

/// `a ./ b`
pub fn rdivide(a: &Value, b: &Value) -> Result<Value> {
    bin_op(a, b, &RightDivider)
}

/// `a .\ b`
pub fn ldivide(a: &Value, b: &Value) -> Result<Value> {
    bin_op(a, b, &LeftDivider)
}

/// `a .^ b`; complex whenever a negative base meets a fractional exponent.
pub fn power(a: &Value, b: &Value) -> Result<Value> {
    bin_op(a, b, &Power)
}

/// `-a`
pub fn uminus(a: &Value) -> Result<Value> {
    ops::uminus(a)
}

/// Complex conjugate; identity on real values.
pub fn conj(a: &Value) -> Result<Value> {
    Ok(ops::conj(a))
}

// ── Comparisons and logic ───────────────────────────────────────────

/// `a < b`
pub fn lt(a: &Value, b: &Value) -> Result<Value> {
    cmp_op(a, b, &LessThan)
}

/// `a <= b`
pub fn le(a: &Value, b: &Value) -> Result<Value> {
    cmp_op(a, b, &LessEquals)
}

/// `a > b`
pub fn gt(a: &Value, b: &Value) -> Result<Value> {
    cmp_op(a, b, &GreaterThan)
}

/// `a >= b`
pub fn ge(a: &Value, b: &Value) -> Result<Value> {
    cmp_op(a, b, &GreaterEquals)
}

/// `a == b`
pub fn eq(a: &Value, b: &Value) -> Result<Value> {
    cmp_op(a, b, &Equals)
}

/// `a ~= b`
pub fn ne(a: &Value, b: &Value) -> Result<Value> {
    cmp_op(a, b, &NotEquals)
}

/// `a & b`
pub fn and(a: &Value, b: &Value) -> Result<Value> {
    log_op(a, b, &And)
}

/// `a | b`
pub fn or(a: &Value, b: &Value) -> Result<Value> {
    log_op(a, b, &Or)
}

/// `xor(a, b)`
pub fn xor(a: &Value, b: &Value) -> Result<Value> {
    log_op(a, b, &Xor)
}

/// `~a`
pub fn not(a: &Value) -> Result<Value> {
    ops::not(a)
}

// ── Matrix operations ───────────────────────────────────────────────

fn as_array(v: &Value) -> Cow<'_, Array> {
    match v {
        Value::Array(a) => Cow::Borrowed(a),
        other => Cow::Owned(other.clone().into_array()),
    }
}

fn into_kind(a: Array, kind: ElementKind) -> Result<Value> {
    if a.kind() == kind {
        Ok(Value::Array(a))
    } else {
        a.to_kind(kind).map(Value::Array)
    }
}

fn is_unit(v: &Value) -> bool {
    v.dims().iter().all(|&d| d == 1)
}

/// Matrix product `a * b` on an explicit backend.
///
/// Falls back to [`times`] when either operand is a scalar. The result
/// kind is `Single` only when neither operand is `Double`.
pub fn mtimes_with<B: LinalgBackend + ?Sized>(backend: &B, a: &Value, b: &Value) -> Result<Value> {
    if a.is_scalar() || b.is_scalar() {
        return times(a, b);
    }
    let kind = a.kind().arithmetic(b.kind());
    let (x, y) = (as_array(a), as_array(b));
    let c = if a.is_complex() || b.is_complex() {
        backend.gemm_complex(&x, &y)?
    } else {
        backend.gemm_real(&x, &y)?
    };
    into_kind(c, kind)
}

/// Transpose `a.'` on an explicit backend. Scalars are returned as is; the
/// element kind is preserved.
pub fn transpose_with<B: LinalgBackend + ?Sized>(backend: &B, a: &Value) -> Result<Value> {
    if is_unit(a) {
        return Ok(a.clone());
    }
    let x = as_array(a);
    let t = if x.is_complex() {
        backend.transpose_complex(&x)?
    } else {
        backend.transpose_real(&x)?
    };
    into_kind(t, x.kind())
}

/// Conjugate transpose `a'` on an explicit backend. Same as
/// [`transpose_with`] for real values.
pub fn hermitian_with<B: LinalgBackend + ?Sized>(backend: &B, a: &Value) -> Result<Value> {
    if !a.is_complex() {
        return transpose_with(backend, a);
    }
    if is_unit(a) {
        return conj(a);
    }
    let x = as_array(a);
    let h = backend.hermitian_complex(&x)?;
    into_kind(h, x.kind())
}

/// Left division `a \ b` (solve `a x = b`) on an explicit backend.
///
/// Falls back to [`ldivide`] when either operand is a scalar. Solver
/// warnings are passed to `log`.
pub fn mldivide_with<B: LinalgBackend + ?Sized>(
    backend: &B,
    a: &Value,
    b: &Value,
    log: &mut dyn FnMut(&str),
) -> Result<Value> {
    if a.is_scalar() || b.is_scalar() {
        return ldivide(a, b);
    }
    let kind = a.kind().arithmetic(b.kind());
    let (x, y) = (as_array(a), as_array(b));
    let c = if a.is_complex() || b.is_complex() {
        backend.solve_complex(&x, &y, log)?
    } else {
        backend.solve_real(&x, &y, log)?
    };
    into_kind(c, kind)
}

/// Right division `a / b` (solve `x b = a`) on an explicit backend,
/// computed as `(b' \ a')'`.
///
/// Falls back to [`rdivide`] when either operand is a scalar.
pub fn mrdivide_with<B: LinalgBackend + ?Sized>(
    backend: &B,
    a: &Value,
    b: &Value,
    log: &mut dyn FnMut(&str),
) -> Result<Value> {
    if a.is_scalar() || b.is_scalar() {
        return rdivide(a, b);
    }
    let kind = a.kind().arithmetic(b.kind());
    let (x, y) = (as_array(a), as_array(b));
    let c = if a.is_complex() || b.is_complex() {
        let bh = backend.hermitian_complex(&y)?;
        let ah = backend.hermitian_complex(&x)?;
        backend.hermitian_complex(&backend.solve_complex(&bh, &ah, log)?)?
    } else {
        let bt = backend.transpose_real(&y)?;
        let at = backend.transpose_real(&x)?;
        backend.transpose_real(&backend.solve_real(&bt, &at, log)?)?
    };
    into_kind(c, kind)
}

#[cfg(feature = "linalg")]
mod dense {
    use tracing::warn;

    use super::*;
    use crate::linalg::DenseBackend;

    fn log_warning(msg: &str) {
        warn!(target: "matrt::linalg", "{}", msg);
    }

    /// Matrix product `a * b`.
    pub fn mtimes(a: &Value, b: &Value) -> Result<Value> {
        mtimes_with(&DenseBackend, a, b)
    }

    /// Transpose `a.'`.
    pub fn transpose(a: &Value) -> Result<Value> {
        transpose_with(&DenseBackend, a)
    }

    /// Conjugate transpose `a'`.
    pub fn hermitian(a: &Value) -> Result<Value> {
        hermitian_with(&DenseBackend, a)
    }

    /// Left division `a \ b`. Warnings are emitted at `WARN` level.
    pub fn mldivide(a: &Value, b: &Value) -> Result<Value> {
        mldivide_with(&DenseBackend, a, b, &mut log_warning)
    }

    /// Right division `a / b`. Warnings are emitted at `WARN` level.
    pub fn mrdivide(a: &Value, b: &Value) -> Result<Value> {
        mrdivide_with(&DenseBackend, a, b, &mut log_warning)
    }
}

#[cfg(feature = "linalg")]
pub use dense::{hermitian, mldivide, mrdivide, mtimes, transpose};

//! N-way concatenation along one axis.
//!
//! Column-major storage makes concatenation a page interleave: along axis
//! `k`, each input contributes a contiguous run of `dims[0] * ... * dims[k]`
//! elements to every output page, so the copy visits the inputs round-robin.
//!
//! ```
//! use matrt::concat::{horzcat, vertcat};
//! use matrt::{Array, Value};
//!
//! let a = Value::from(Array::from_vec(&[2, 1], vec![1.0, 2.0]));
//! let b = Value::from(Array::from_vec(&[2, 2], vec![3.0, 4.0, 5.0, 6.0]));
//! let h = horzcat(&[a, b]).unwrap();
//! assert_eq!(h.dims(), &[2, 3]);
//! assert_eq!(h.real(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//!
//! let v = vertcat(&[Value::Real(1.0), Value::Real(2.0)]).unwrap();
//! assert_eq!(v.dims(), &[2, 1]);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use tracing::trace;

use crate::array::{dim_at, elements, pad_dims, Array, ElementKind};
use crate::error::{Error, Result};
use crate::ops::Operand;
use crate::value::Value;

/// Concatenate `values` along zero-based `axis`.
///
/// Every input must match the first non-empty input on all axes except
/// `axis` (after padding with trailing 1s). Empty inputs are skipped, and
/// a single remaining input is returned as is. The result is complex if
/// any input is complex; its kind is the widest input kind.
pub fn ncat(values: &[Value], axis: usize) -> Result<Array> {
    let parts: Vec<Operand<'_>> = values
        .iter()
        .map(Operand::new)
        .filter(|op| op.len() > 0)
        .collect();

    match parts.len() {
        0 => {
            return Ok(values
                .first()
                .cloned()
                .map_or_else(|| Array::zeros(&[0, 0]), Value::into_array))
        }
        1 => {
            if let Some(v) = values.iter().find(|v| !v.is_empty()) {
                return Ok(v.clone().into_array());
            }
        }
        _ => {}
    }

    let rank = parts
        .iter()
        .map(|p| p.dims.len())
        .max()
        .unwrap_or(2)
        .max(axis + 1);
    let first = parts[0].dims;
    for p in &parts[1..] {
        let agrees = (0..rank).all(|ax| ax == axis || dim_at(p.dims, ax) == dim_at(first, ax));
        if !agrees {
            return Err(Error::shape(first, p.dims));
        }
    }

    let mut dims = pad_dims(first, rank);
    dims[axis] = parts.iter().map(|p| dim_at(p.dims, axis)).sum();
    let total = elements(&dims);

    let kind = parts
        .iter()
        .map(|p| p.kind)
        .fold(ElementKind::Logical, ElementKind::promote);
    let complex = parts.iter().any(|p| p.imag.is_some());
    trace!(count = parts.len(), axis, dims = ?dims, "concatenating");

    let page: Vec<usize> = parts
        .iter()
        .map(|p| (0..=axis).map(|ax| dim_at(p.dims, ax)).product())
        .collect();
    let mut offsets = vec![0usize; parts.len()];
    let mut real = vec![0.0; total];
    let mut imag = if complex { Some(vec![0.0; total]) } else { None };

    let mut out = 0;
    let mut k = 0;
    while out < total {
        let (src, len) = (offsets[k], page[k]);
        for (dst, &x) in real[out..out + len].iter_mut().zip(&parts[k].real[src..src + len]) {
            *dst = kind.store(x);
        }
        if let (Some(im), Some(part_im)) = (imag.as_mut(), parts[k].imag) {
            for (dst, &x) in im[out..out + len].iter_mut().zip(&part_im[src..src + len]) {
                *dst = kind.store(x);
            }
        }
        out += len;
        offsets[k] += len;
        k = (k + 1) % parts.len();
    }

    Ok(Array::from_raw(dims, real, imag, kind))
}

/// `[a, b, ...]`: concatenate along the second axis.
pub fn horzcat(values: &[Value]) -> Result<Array> {
    ncat(values, 1)
}

/// `[a; b; ...]`: concatenate along the first axis.
pub fn vertcat(values: &[Value]) -> Result<Array> {
    ncat(values, 0)
}

//! Dimension and index arithmetic.
//!
//! Dims are stored with at least two entries. Lists of different rank are
//! compared and indexed as though the shorter one were right-padded with
//! size-1 dimensions.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::{Error, Result};

/// Number of elements described by `dims`, saturating at `usize::MAX`.
#[inline]
pub fn elements(dims: &[usize]) -> usize {
    checked_elements(dims).unwrap_or(usize::MAX)
}

/// Number of elements described by `dims`, or `None` if it overflows.
#[inline]
pub fn checked_elements(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

/// Extent of `axis`, treating missing trailing dims as 1.
#[inline]
pub fn dim_at(dims: &[usize], axis: usize) -> usize {
    dims.get(axis).copied().unwrap_or(1)
}

/// Shape equality after right-padding the shorter list with 1s.
pub fn same_dims(a: &[usize], b: &[usize]) -> bool {
    let rank = a.len().max(b.len());
    (0..rank).all(|i| dim_at(a, i) == dim_at(b, i))
}

/// Normalize a user-supplied shape: empty → `[1, 1]`, `[n]` → `[1, n]`.
pub fn normalize_dims(dims: &[usize]) -> Vec<usize> {
    match dims.len() {
        0 => vec![1, 1],
        1 => vec![1, dims[0]],
        _ => dims.to_vec(),
    }
}

/// Pad `dims` with trailing 1s up to `rank` entries.
pub fn pad_dims(dims: &[usize], rank: usize) -> Vec<usize> {
    let mut out = dims.to_vec();
    if out.len() < rank {
        out.resize(rank, 1);
    }
    out
}

/// Column-major strides: the first dimension varies fastest.
pub fn strides(dims: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(dims.len());
    let mut stride = 1;
    for &d in dims {
        out.push(stride);
        stride *= d;
    }
    out
}

/// At most one dimension differs from 1.
///
/// Scalars count as vectors; so do empty shapes such as `1x0`.
pub fn is_vector(dims: &[usize]) -> bool {
    dims.iter().filter(|&&d| d != 1).count() <= 1
}

/// Linear (zero-based) position of 1-based `coords` within `dims`.
///
/// A single coordinate is a linear index over the whole array. Returns
/// `Ok(None)` when a coordinate lies past its dimension, the signal that a
/// write needs to grow the array. A coordinate of 0 is always an
/// [`Error::IndexBelowOne`], whether or not another coordinate overflows.
///
/// ```
/// use matrt::array::linear_index;
///
/// assert_eq!(linear_index(&[3, 4], &[2, 3]).unwrap(), Some(7));
/// assert_eq!(linear_index(&[3, 4], &[12]).unwrap(), Some(11));
/// assert_eq!(linear_index(&[3, 4], &[4, 1]).unwrap(), None);
/// assert!(linear_index(&[3, 4], &[0, 1]).is_err());
/// assert_eq!(linear_index(&[3, 4], &[1, usize::MAX]).unwrap(), None);
/// ```
pub fn linear_index(dims: &[usize], coords: &[usize]) -> Result<Option<usize>> {
    if let Some(axis) = coords.iter().position(|&c| c < 1) {
        return Err(Error::IndexBelowOne { axis });
    }
    if let [k] = coords {
        let k = *k;
        return Ok(if k <= elements(dims) { Some(k - 1) } else { None });
    }
    let rank = dims.len().max(coords.len());
    if (0..rank).any(|axis| dim_at(coords, axis) > dim_at(dims, axis)) {
        return Ok(None);
    }
    // Every coordinate is in range, so the sum stays below `elements(dims)`
    let mut ndx = 0;
    let mut stride = 1;
    for axis in 0..rank {
        ndx += (dim_at(coords, axis) - 1) * stride;
        stride *= dim_at(dims, axis);
    }
    Ok(Some(ndx))
}

/// Describe the first coordinate that lies outside `dims`, for read errors.
pub(crate) fn out_of_range(dims: &[usize], coords: &[usize]) -> Error {
    if let [k] = coords {
        return Error::IndexOutOfRange {
            coord: *k,
            axis: 0,
            extent: elements(dims),
        };
    }
    let rank = dims.len().max(coords.len());
    for axis in 0..rank {
        let c = dim_at(coords, axis);
        let d = dim_at(dims, axis);
        if c > d {
            return Error::IndexOutOfRange {
                coord: c,
                axis,
                extent: d,
            };
        }
    }
    Error::IndexOutOfRange {
        coord: 0,
        axis: 0,
        extent: 0,
    }
}

/// Shape after an N-d write at `coords`: coordinate-wise maximum.
pub fn grown_dims(dims: &[usize], coords: &[usize]) -> Vec<usize> {
    let rank = dims.len().max(coords.len());
    (0..rank)
        .map(|axis| dim_at(dims, axis).max(dim_at(coords, axis)))
        .collect()
}

/// Shape after a linear-index write at position `n` (1-based) past the end.
///
/// Vectors grow along their sole non-unit axis; scalars and empty arrays
/// become row vectors; any other matrix is treated as a column.
pub fn grown_linear_dims(dims: &[usize], n: usize) -> Vec<usize> {
    if elements(dims) == 0 {
        return vec![1, n];
    }
    match dims.iter().position(|&d| d != 1) {
        None => {
            let mut out = pad_dims(dims, 2);
            out[1] = n;
            out
        }
        Some(axis) if is_vector(dims) => {
            let mut out = dims.to_vec();
            out[axis] = n;
            out
        }
        Some(_) => vec![n, 1],
    }
}

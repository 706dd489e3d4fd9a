use alloc::vec;
use alloc::vec::Vec;

use tracing::trace;

use super::index::{
    checked_elements, dim_at, elements, is_vector, normalize_dims, pad_dims, strides,
};
use super::Array;
use crate::error::{Error, Result};

/// Over-allocation factor applied when a write reallocates storage.
pub const GROWTH_FACTOR: usize = 2;

/// Zero-filled buffer of `len` elements, or `None` if the allocator refuses.
fn zeroed(len: usize) -> Option<Vec<f64>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).ok()?;
    buf.resize(len, 0.0);
    Some(buf)
}

/// Copy `src` laid out as `old_dims` into `dst`, a zeroed buffer laid out
/// as `new_dims`. Every old coordinate must fit.
fn copy_into(src: &[f64], old_dims: &[usize], new_dims: &[usize], mut dst: Vec<f64>) -> Vec<f64> {
    let count = elements(old_dims);
    if count == 0 {
        return dst;
    }
    let rank = old_dims.len().max(new_dims.len());
    let old = pad_dims(old_dims, rank);
    let new_strides = strides(&pad_dims(new_dims, rank));

    // Walk the old array in storage order, carrying a coordinate counter
    // and the matching destination offset.
    let rows = old[0];
    let mut coord = vec![0usize; rank];
    let mut src_ndx = 0;
    while src_ndx < count {
        let base: usize = coord
            .iter()
            .zip(&new_strides)
            .skip(1)
            .map(|(c, s)| c * s)
            .sum();
        dst[base..base + rows].copy_from_slice(&src[src_ndx..src_ndx + rows]);
        src_ndx += rows;
        // Ripple-carry over axes 1..
        for axis in 1..rank {
            coord[axis] += 1;
            if coord[axis] < old[axis] {
                break;
            }
            coord[axis] = 0;
        }
    }
    dst
}

impl Array {
    /// Grow the array to `new_dims`, keeping every element at its N-d
    /// coordinate and zero-filling the new positions.
    ///
    /// - An empty array is simply reallocated.
    /// - A vector reshaped into another vector that fits the current
    ///   capacity only updates the dims.
    /// - Anything else copies into a fresh buffer of
    ///   [`GROWTH_FACTOR`] times the new element count.
    ///
    /// Shrinking is not supported: any dimension smaller than the current
    /// one is an [`Error::Unsupported`]. A shape too large to allocate is an
    /// [`Error::OutOfMemory`]. On error the array is left untouched.
    ///
    /// ```
    /// use matrt::{Array, Value};
    ///
    /// let mut a = Array::from_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]);
    /// a.resize(&[3, 2, 2]).unwrap();
    /// assert_eq!(a.dims(), &[3, 2, 2]);
    /// assert_eq!(a.get(&[2, 2]).unwrap(), Value::Real(4.0));
    /// assert_eq!(a.get(&[3, 2, 2]).unwrap(), Value::Real(0.0));
    /// ```
    pub fn resize(&mut self, new_dims: &[usize]) -> Result<()> {
        let new_dims = normalize_dims(new_dims);
        let Some(new_len) = checked_elements(&new_dims) else {
            return Err(Error::OutOfMemory { dims: new_dims });
        };
        let out_of_memory = || Error::OutOfMemory { dims: new_dims.clone() };

        if self.len == 0 {
            let real = zeroed(new_len).ok_or_else(out_of_memory)?;
            let imag = match self.imag {
                Some(_) => Some(zeroed(new_len).ok_or_else(out_of_memory)?),
                None => None,
            };
            self.real = real;
            self.imag = imag;
            self.dims = new_dims;
            self.len = new_len;
            return Ok(());
        }

        let rank = self.dims.len().max(new_dims.len());
        if (0..rank).any(|axis| dim_at(&new_dims, axis) < dim_at(&self.dims, axis)) {
            return Err(Error::Unsupported("arrays cannot shrink by resizing"));
        }

        if is_vector(&self.dims) && is_vector(&new_dims) && self.capacity() >= new_len {
            // Storage order of a vector does not depend on its orientation
            self.dims = new_dims;
            self.len = new_len;
            return Ok(());
        }

        let capacity = new_len.saturating_mul(GROWTH_FACTOR);
        trace!(
            from = ?self.dims,
            to = ?new_dims,
            capacity,
            "reallocating array storage"
        );
        let real = zeroed(capacity).ok_or_else(out_of_memory)?;
        let imag = match &self.imag {
            Some(im) => {
                let buf = zeroed(capacity).ok_or_else(out_of_memory)?;
                Some(copy_into(im, &self.dims, &new_dims, buf))
            }
            None => None,
        };
        self.real = copy_into(&self.real, &self.dims, &new_dims, real);
        self.imag = imag;
        self.dims = new_dims;
        self.len = new_len;
        Ok(())
    }
}

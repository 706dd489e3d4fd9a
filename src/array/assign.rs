use alloc::vec;
use alloc::vec::Vec;

use num_complex::Complex64;
use tracing::debug;

use super::index::{grown_dims, grown_linear_dims, is_vector, linear_index, out_of_range};
use super::{Array, ElementKind};
use crate::error::{Error, Result};
use crate::value::Value;

impl Array {
    /// Read the element at 1-based `coords`.
    ///
    /// Logical arrays yield [`Value::Logical`], complex arrays
    /// [`Value::Complex`] (even when the imaginary part is zero), everything
    /// else [`Value::Real`]. Reads never grow the array.
    pub fn get(&self, coords: &[usize]) -> Result<Value> {
        let ndx = linear_index(&self.dims, coords)?.ok_or_else(|| out_of_range(&self.dims, coords))?;
        Ok(self.value_at(ndx))
    }

    /// Element at zero-based storage position `ndx` as a scalar value.
    pub(crate) fn value_at(&self, ndx: usize) -> Value {
        match (&self.imag, self.kind) {
            (_, ElementKind::Logical) => Value::Logical(self.real[ndx] != 0.0),
            (Some(im), _) => Value::Complex(Complex64::new(self.real[ndx], im[ndx])),
            (None, _) => Value::Real(self.real[ndx]),
        }
    }

    /// Write a scalar `value` at 1-based `coords`, growing and promoting as
    /// needed.
    ///
    /// - A complex value promotes a real array to complex.
    /// - A non-logical value turns a logical array into the value's kind.
    /// - A single coordinate past the end of a vector extends it along its
    ///   non-unit axis; past the end of a matrix, the matrix is first
    ///   viewed as a column.
    /// - Any other coordinate past its dimension grows that dimension.
    ///
    /// Values written into a `Single` array are rounded to single precision.
    ///
    /// ```
    /// use matrt::{Array, Value};
    /// use num_complex::Complex64;
    ///
    /// let mut v = Array::zeros(&[1, 1]);
    /// v.set(&[3], 2.0).unwrap();
    /// assert_eq!(v.dims(), &[1, 3]);
    ///
    /// v.set(&[1], Complex64::new(0.0, 1.0)).unwrap();
    /// assert!(v.is_complex());
    /// assert_eq!(v.get(&[3]).unwrap(), Value::Complex(Complex64::new(2.0, 0.0)));
    /// ```
    pub fn set(&mut self, coords: &[usize], value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let z = value
            .scalar()
            .ok_or(Error::Unsupported("assignment of a non-scalar value to an indexed element"))?;

        // Validate and grow before any retagging, so a failed write leaves
        // the array as it was
        let ndx = match linear_index(&self.dims, coords)? {
            Some(ndx) => ndx,
            None => {
                self.grow_for(coords)?;
                linear_index(&self.dims, coords)?.ok_or_else(|| out_of_range(&self.dims, coords))?
            }
        };

        if self.kind == ElementKind::Logical && value.kind() != ElementKind::Logical {
            debug!(kind = ?value.kind(), "logical array converted by assignment");
            self.retag(value.kind());
        }
        if value.is_complex() && !self.is_complex() {
            self.promote();
        }

        self.real[ndx] = self.kind.store(z.re);
        if let Some(im) = self.imag.as_mut() {
            im[ndx] = self.kind.store(z.im);
        }
        Ok(())
    }

    /// Grow so that `coords` addresses an element.
    fn grow_for(&mut self, coords: &[usize]) -> Result<()> {
        match *coords {
            [n] if !is_vector(&self.dims) => {
                // Storage is unchanged; only the view becomes a column
                let dims = grown_linear_dims(&[self.len, 1], n);
                let matrix = core::mem::replace(&mut self.dims, vec![self.len, 1]);
                let grown = self.resize(&dims);
                if grown.is_err() {
                    self.dims = matrix;
                }
                grown
            }
            [n] => {
                let dims = grown_linear_dims(&self.dims, n);
                self.resize(&dims)
            }
            _ => {
                let dims = grown_dims(&self.dims, coords);
                self.resize(&dims)
            }
        }
    }

    /// Read using index values as produced by generated code.
    ///
    /// Each index must be a real, finite integer; see [`Value::as_index`].
    pub fn get_at(&self, index: &[Value]) -> Result<Value> {
        let coords = index_coords(index)?;
        self.get(&coords)
    }

    /// Write using index values as produced by generated code.
    pub fn set_at(&mut self, index: &[Value], value: impl Into<Value>) -> Result<()> {
        let coords = index_coords(index)?;
        self.set(&coords, value)
    }

    /// Attach a zero imaginary part. Logical arrays become `Double` first.
    ///
    /// No-op on arrays that are already complex.
    pub fn promote(&mut self) {
        if self.imag.is_some() {
            return;
        }
        if self.kind == ElementKind::Logical {
            self.kind = ElementKind::Double;
        }
        debug!(dims = ?self.dims, "promoting array to complex");
        self.imag = Some(vec![0.0; self.capacity()]);
    }

    /// Drop the imaginary part if every visible element has a zero one.
    ///
    /// Returns whether the array is real afterwards.
    ///
    /// ```
    /// use matrt::Array;
    ///
    /// let mut a = Array::from_parts(&[1, 2], vec![1.0, 2.0], vec![0.0, 0.0]);
    /// assert!(a.demote());
    /// assert!(!a.is_complex());
    /// ```
    pub fn demote(&mut self) -> bool {
        let real = match self.imag() {
            None => return true,
            Some(im) => im.iter().all(|&x| x == 0.0),
        };
        if real {
            debug!(dims = ?self.dims, "demoting array to real");
            self.imag = None;
        }
        real
    }
}

fn index_coords(index: &[Value]) -> Result<Vec<usize>> {
    index.iter().map(Value::as_index).collect()
}

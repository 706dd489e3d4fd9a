use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use num_complex::Complex64;

use crate::array::Array;
use crate::error::{Error, Result};
use crate::traits::LinalgScalar;

/// Tile edge used by the blocked transpose.
pub const BLOCK: usize = 32;

/// Bridge between [`Array`] storage and a kernel element type.
pub(crate) trait Element: LinalgScalar {
    /// Element `ndx` of `a`; a missing imaginary part reads as zero.
    fn read(a: &Array, ndx: usize) -> Self;

    /// Pack column-major `data` into a `Double` array.
    fn pack(nrows: usize, ncols: usize, data: Vec<Self>) -> Array;
}

impl Element for f64 {
    #[inline]
    fn read(a: &Array, ndx: usize) -> f64 {
        a.real()[ndx]
    }

    fn pack(nrows: usize, ncols: usize, data: Vec<f64>) -> Array {
        Array::from_vec(&[nrows, ncols], data)
    }
}

impl Element for Complex64 {
    #[inline]
    fn read(a: &Array, ndx: usize) -> Complex64 {
        a.element(ndx)
    }

    fn pack(nrows: usize, ncols: usize, data: Vec<Complex64>) -> Array {
        Array::from_complex(&[nrows, ncols], &data)
    }
}

/// Column-major matrix the kernels work on.
///
/// Column `j` occupies `data[j * nrows..(j + 1) * nrows]`, so column
/// slices are contiguous.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DenseMatrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

impl<T: LinalgScalar> DenseMatrix<T> {
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Rows `row_start..` of column `col`.
    #[inline]
    pub fn col(&self, col: usize, row_start: usize) -> &[T] {
        let base = col * self.nrows;
        &self.data[base + row_start..base + self.nrows]
    }

    #[inline]
    pub fn col_mut(&mut self, col: usize, row_start: usize) -> &mut [T] {
        let base = col * self.nrows;
        &mut self.data[base + row_start..base + self.nrows]
    }

    /// Rows `row_start..` of columns `a < b`, borrowed together.
    pub fn two_cols_mut(&mut self, a: usize, b: usize, row_start: usize) -> (&[T], &mut [T]) {
        debug_assert!(a < b);
        let m = self.nrows;
        let (left, right) = self.data.split_at_mut(b * m);
        (&left[a * m + row_start..(a + 1) * m], &mut right[row_start..m])
    }

    pub fn swap_cols(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let m = self.nrows;
        let (left, right) = self.data.split_at_mut(hi * m);
        left[lo * m..(lo + 1) * m].swap_with_slice(&mut right[..m]);
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let m = self.nrows;
        for j in 0..self.ncols {
            self.data.swap(j * m + a, j * m + b);
        }
    }

    /// `self * rhs`. Loop order `j, k, i` walks every operand column-wise.
    pub fn matmul(&self, rhs: &Self) -> Self {
        debug_assert_eq!(self.ncols, rhs.nrows);
        let (m, n, p) = (self.nrows, self.ncols, rhs.ncols);
        let mut out = Self::zeros(m, p);
        for j in 0..p {
            for k in 0..n {
                let b_kj = rhs[(k, j)];
                let a_col = self.col(k, 0);
                for (c, &a) in out.col_mut(j, 0).iter_mut().zip(a_col) {
                    *c = *c + a * b_kj;
                }
            }
        }
        out
    }

    /// Transpose, conjugating each element if `conjugate` is set.
    /// Works tile by tile so that both source and destination stay in cache.
    pub fn transpose(&self, conjugate: bool) -> Self {
        let (m, n) = (self.nrows, self.ncols);
        let mut out = Self::zeros(n, m);
        for jb in (0..n).step_by(BLOCK) {
            for ib in (0..m).step_by(BLOCK) {
                for j in jb..(jb + BLOCK).min(n) {
                    for i in ib..(ib + BLOCK).min(m) {
                        let x = self[(i, j)];
                        out[(j, i)] = if conjugate { x.conj() } else { x };
                    }
                }
            }
        }
        out
    }
}

impl<T: Element> DenseMatrix<T> {
    /// Read a 2-D array; trailing dims must all be 1.
    pub fn from_array(a: &Array) -> Result<Self> {
        if !a.is_matrix() {
            return Err(Error::Unsupported("matrix operations require 2-D arguments"));
        }
        let (nrows, ncols) = a.rows_cols();
        let data = (0..a.len()).map(|ndx| T::read(a, ndx)).collect();
        Ok(Self { data, nrows, ncols })
    }

    pub fn into_array(self) -> Array {
        T::pack(self.nrows, self.ncols, self.data)
    }
}

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[j * self.nrows + i]
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.data[j * self.nrows + i]
    }
}

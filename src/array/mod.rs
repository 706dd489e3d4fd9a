mod assign;
mod index;
mod resize;

pub use index::{
    checked_elements, dim_at, elements, grown_dims, grown_linear_dims, is_vector, linear_index,
    normalize_dims, pad_dims, same_dims, strides,
};
pub(crate) use index::out_of_range;
pub use resize::GROWTH_FACTOR;

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use num_complex::Complex64;

use crate::error::{Error, Result};

/// Storage / precision tag of an array.
///
/// Orthogonal to the real/complex distinction: a `Double` or `Single` array
/// may carry an imaginary part, a `Logical` array never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ElementKind {
    /// 0/1 truth values.
    Logical,
    /// IEEE single precision, stored widened to `f64`.
    Single,
    /// IEEE double precision.
    #[default]
    Double,
}

impl ElementKind {
    /// Storage type of a mixed result: the wider kind wins.
    ///
    /// `Logical < Single < Double`, so a `Single` combined with a `Double`
    /// is `Double`. Used for concatenation and conversions.
    #[inline]
    pub fn promote(self, other: Self) -> Self {
        self.max(other)
    }

    /// Kind of an arithmetic result. Like [`promote`](Self::promote), except
    /// arithmetic on logicals produces doubles.
    ///
    /// ```
    /// use matrt::ElementKind::*;
    ///
    /// assert_eq!(Single.arithmetic(Double), Double);
    /// assert_eq!(Single.arithmetic(Single), Single);
    /// assert_eq!(Single.arithmetic(Logical), Single);
    /// assert_eq!(Logical.arithmetic(Logical), Double);
    /// ```
    #[inline]
    pub fn arithmetic(self, other: Self) -> Self {
        match self.promote(other) {
            ElementKind::Logical => ElementKind::Double,
            k => k,
        }
    }

    /// Round `x` to what this kind can represent.
    #[inline]
    pub fn store(self, x: f64) -> f64 {
        match self {
            ElementKind::Double => x,
            ElementKind::Single => x as f32 as f64,
            ElementKind::Logical => {
                if x != 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Dense N-dimensional array of real, complex or logical numbers.
///
/// Column-major storage: the first dimension varies fastest. The backing
/// buffer may be longer than the addressable element count (`capacity >=
/// len`), which lets vectors grow in O(1) on write. Positions between `len`
/// and `capacity` are always zero.
///
/// The imaginary buffer exists only while the array is complex; a missing
/// buffer reads as all zeros.
///
/// # Examples
///
/// ```
/// use matrt::{Array, Value};
///
/// let mut a = Array::from_vec(&[2, 2], vec![1.0, 3.0, 2.0, 4.0]);
/// assert_eq!(a.get(&[1, 2]).unwrap(), Value::Real(2.0));
///
/// // Writing past the end grows the array and keeps existing data
/// a.set(&[3, 3], 9.0).unwrap();
/// assert_eq!(a.dims(), &[3, 3]);
/// assert_eq!(a.get(&[2, 2]).unwrap(), Value::Real(4.0));
/// assert_eq!(a.get(&[3, 1]).unwrap(), Value::Real(0.0));
/// ```
#[derive(Debug, Clone)]
pub struct Array {
    dims: Vec<usize>,
    len: usize,
    real: Vec<f64>,
    imag: Option<Vec<f64>>,
    kind: ElementKind,
}

// ── Constructors ────────────────────────────────────────────────────

impl Array {
    /// Zero-filled `Double` array of the given shape.
    ///
    /// ```
    /// use matrt::Array;
    /// let a = Array::zeros(&[2, 3]);
    /// assert_eq!(a.len(), 6);
    /// assert_eq!(a.real(), &[0.0; 6]);
    /// ```
    pub fn zeros(dims: &[usize]) -> Self {
        Self::with_kind(dims, ElementKind::Double)
    }

    /// Zero-filled array of the given shape and kind.
    pub fn with_kind(dims: &[usize], kind: ElementKind) -> Self {
        let dims = normalize_dims(dims);
        let len = elements(&dims);
        Self {
            dims,
            len,
            real: vec![0.0; len],
            imag: None,
            kind,
        }
    }

    /// Real `Double` array from column-major data.
    ///
    /// Panics if `real.len()` does not match the shape.
    pub fn from_vec(dims: &[usize], real: Vec<f64>) -> Self {
        let dims = normalize_dims(dims);
        let len = elements(&dims);
        assert_eq!(
            real.len(),
            len,
            "data length {} does not match dims {:?}",
            real.len(),
            dims
        );
        Self {
            dims,
            len,
            real,
            imag: None,
            kind: ElementKind::Double,
        }
    }

    /// Complex `Double` array from separate column-major parts.
    ///
    /// Panics if either part does not match the shape.
    pub fn from_parts(dims: &[usize], real: Vec<f64>, imag: Vec<f64>) -> Self {
        let mut a = Self::from_vec(dims, real);
        assert_eq!(
            imag.len(),
            a.len,
            "imaginary length {} does not match dims {:?}",
            imag.len(),
            a.dims
        );
        a.imag = Some(imag);
        a
    }

    /// Complex array from column-major complex values.
    pub fn from_complex(dims: &[usize], values: &[Complex64]) -> Self {
        let real = values.iter().map(|z| z.re).collect();
        let imag = values.iter().map(|z| z.im).collect();
        Self::from_parts(dims, real, imag)
    }

    /// Logical array from column-major truth values.
    pub fn from_bools(dims: &[usize], values: &[bool]) -> Self {
        let real = values.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect();
        let mut a = Self::from_vec(dims, real);
        a.kind = ElementKind::Logical;
        a
    }

    /// Build an array by calling `f(ndx)` for each zero-based linear index.
    ///
    /// ```
    /// use matrt::Array;
    /// let a = Array::from_fn(&[2, 3], |i| i as f64);
    /// assert_eq!(a.real(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    /// ```
    pub fn from_fn(dims: &[usize], f: impl Fn(usize) -> f64) -> Self {
        let dims = normalize_dims(dims);
        let real = (0..elements(&dims)).map(f).collect();
        Self::from_vec(&dims, real)
    }

    /// `1x1` real array.
    pub fn scalar(x: f64) -> Self {
        Self::from_vec(&[1, 1], vec![x])
    }

    /// `1x1` complex array.
    pub fn complex_scalar(z: Complex64) -> Self {
        Self::from_parts(&[1, 1], vec![z.re], vec![z.im])
    }

    /// Assemble from raw parts produced by the engine itself.
    ///
    /// `real` (and `imag`) may be longer than the shape; the tail must be zero.
    pub(crate) fn from_raw(
        dims: Vec<usize>,
        real: Vec<f64>,
        imag: Option<Vec<f64>>,
        kind: ElementKind,
    ) -> Self {
        let len = elements(&dims);
        debug_assert!(real.len() >= len);
        debug_assert!(imag.as_ref().map_or(true, |im| im.len() == real.len()));
        debug_assert!(kind != ElementKind::Logical || imag.is_none());
        Self {
            dims,
            len,
            real,
            imag,
            kind,
        }
    }
}

// ── Accessors ───────────────────────────────────────────────────────

impl Array {
    /// Shape (at least two entries).
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of addressable elements: `product(dims)`.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Length of the backing buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.real.len()
    }

    /// Whether the array has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the array holds exactly one element.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.len == 1
    }

    /// Whether at most one dimension differs from 1.
    #[inline]
    pub fn is_vector(&self) -> bool {
        is_vector(&self.dims)
    }

    /// Whether every dimension past the second is 1.
    #[inline]
    pub fn is_matrix(&self) -> bool {
        self.dims.iter().skip(2).all(|&d| d == 1)
    }

    /// Whether an imaginary buffer is attached.
    #[inline]
    pub fn is_complex(&self) -> bool {
        self.imag.is_some()
    }

    /// Whether this is a logical array.
    #[inline]
    pub fn is_logical(&self) -> bool {
        self.kind == ElementKind::Logical
    }

    /// Storage kind.
    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Real parts of the addressable elements, column-major.
    #[inline]
    pub fn real(&self) -> &[f64] {
        &self.real[..self.len]
    }

    /// Imaginary parts of the addressable elements, if complex.
    #[inline]
    pub fn imag(&self) -> Option<&[f64]> {
        self.imag.as_deref().map(|im| &im[..self.len])
    }

    /// Element at zero-based linear position `ndx` as a complex number.
    #[inline]
    pub(crate) fn element(&self, ndx: usize) -> Complex64 {
        let im = self.imag.as_ref().map_or(0.0, |im| im[ndx]);
        Complex64::new(self.real[ndx], im)
    }

    /// Number of rows and columns of a 2-D view (trailing dims folded).
    #[inline]
    pub(crate) fn rows_cols(&self) -> (usize, usize) {
        let rows = self.dims[0];
        let cols = if rows == 0 { dim_at(&self.dims, 1) } else { self.len / rows };
        (rows, cols)
    }
}

// ── Conversions ─────────────────────────────────────────────────────

impl Array {
    /// Copy converted to `kind`.
    ///
    /// Converting to `Single` rounds to single precision. Converting to
    /// `Logical` maps nonzero values to 1 and fails on complex or `NaN` data.
    ///
    /// ```
    /// use matrt::{Array, ElementKind};
    ///
    /// let a = Array::from_vec(&[1, 3], vec![0.0, 2.5, -1.0]);
    /// let l = a.to_kind(ElementKind::Logical).unwrap();
    /// assert_eq!(l.real(), &[0.0, 1.0, 1.0]);
    /// ```
    pub fn to_kind(&self, kind: ElementKind) -> Result<Array> {
        if kind == self.kind {
            return Ok(self.clone());
        }
        if kind == ElementKind::Logical {
            if self.imag().is_some_and(|im| im.iter().any(|&x| x != 0.0)) {
                return Err(Error::Complex("complex values cannot be converted to logicals"));
            }
            if self.real().iter().any(|x| x.is_nan()) {
                return Err(Error::Unsupported("NaN values cannot be converted to logicals"));
            }
        }
        let real: Vec<f64> = self.real.iter().map(|&x| kind.store(x)).collect();
        let imag = match kind {
            ElementKind::Logical => None,
            _ => self
                .imag
                .as_ref()
                .map(|im| im.iter().map(|&x| kind.store(x)).collect()),
        };
        Ok(Array::from_raw(self.dims.clone(), real, imag, kind))
    }

    /// In-place conversion used when a write changes the array's class.
    pub(crate) fn retag(&mut self, kind: ElementKind) {
        if kind != ElementKind::Logical {
            for x in self.real.iter_mut() {
                *x = kind.store(*x);
            }
            if let Some(im) = self.imag.as_mut() {
                for x in im.iter_mut() {
                    *x = kind.store(*x);
                }
            }
        }
        self.kind = kind;
    }
}

impl PartialEq for Array {
    /// Same shape (modulo trailing 1s), same kind, same elements.
    /// A missing imaginary part equals an all-zero one.
    fn eq(&self, other: &Self) -> bool {
        if !same_dims(&self.dims, &other.dims) || self.kind != other.kind {
            return false;
        }
        if self.real() != other.real() {
            return false;
        }
        match (self.imag(), other.imag()) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b,
            (Some(im), None) | (None, Some(im)) => im.iter().all(|&x| x == 0.0),
        }
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl fmt::Display for Array {
    /// One 2-D page at a time, rows on separate lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, _) = self.rows_cols();
        let cols = dim_at(&self.dims, 1);
        let page = rows * cols;
        if page == 0 {
            return write!(f, "[]({:?})", self.dims);
        }
        let pages = self.len / page;
        for p in 0..pages {
            if pages > 1 {
                writeln!(f, "page {}:", p + 1)?;
            }
            for i in 0..rows {
                for j in 0..cols {
                    let ndx = p * page + i + j * rows;
                    if j > 0 {
                        write!(f, " ")?;
                    }
                    match &self.imag {
                        Some(im) => write!(f, "{}{:+}i", self.real[ndx], im[ndx])?,
                        None => write!(f, "{}", self.real[ndx])?,
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn zeros_shape() {
        let a = Array::zeros(&[3, 4, 2]);
        assert_eq!(a.dims(), &[3, 4, 2]);
        assert_eq!(a.len(), 24);
        assert_eq!(a.capacity(), 24);
        assert!(!a.is_complex());
        assert!(!a.is_matrix());
    }

    #[test]
    fn short_dims_are_normalized() {
        assert_eq!(Array::zeros(&[4]).dims(), &[1, 4]);
        assert_eq!(Array::zeros(&[]).dims(), &[1, 1]);
    }

    #[test]
    #[should_panic(expected = "data length")]
    fn from_vec_wrong_length() {
        let _ = Array::from_vec(&[2, 2], vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn eq_ignores_capacity_and_zero_imag() {
        let a = Array::from_vec(&[1, 2], vec![1.0, 2.0]);
        let b = Array::from_raw(vec![1, 2, 1], vec![1.0, 2.0, 0.0, 0.0], None, ElementKind::Double);
        assert_eq!(a, b);
        let c = Array::from_parts(&[1, 2], vec![1.0, 2.0], vec![0.0, 0.0]);
        assert_eq!(a, c);
        let d = Array::from_parts(&[1, 2], vec![1.0, 2.0], vec![0.0, 1.0]);
        assert_ne!(a, d);
    }

    #[test]
    fn kind_rules() {
        use ElementKind::*;
        assert_eq!(Single.promote(Double), Double);
        assert_eq!(Double.promote(Single), Double);
        assert_eq!(Logical.promote(Logical), Logical);
        assert_eq!(Logical.arithmetic(Logical), Double);
        assert_eq!(Single.store(0.1), 0.1_f32 as f64);
        assert_eq!(Logical.store(-3.0), 1.0);
    }

    #[test]
    fn to_single_rounds() {
        let a = Array::from_vec(&[1, 2], vec![0.1, 1.0 / 3.0]);
        let s = a.to_kind(ElementKind::Single).unwrap();
        assert_eq!(s.kind(), ElementKind::Single);
        assert_eq!(s.real()[0], 0.1_f32 as f64);
        assert_ne!(s.real()[1], 1.0 / 3.0);
    }

    #[test]
    fn complex_to_logical_fails() {
        let a = Array::from_parts(&[1, 1], vec![1.0], vec![1.0]);
        assert!(matches!(a.to_kind(ElementKind::Logical), Err(Error::Complex(_))));
        let n = Array::from_vec(&[1, 1], vec![f64::NAN]);
        assert!(n.to_kind(ElementKind::Logical).is_err());
    }

    #[test]
    fn display_real_and_complex() {
        let a = Array::from_vec(&[2, 2], vec![1.0, 3.0, 2.0, 4.0]);
        assert_eq!(a.to_string(), "1 2\n3 4\n");
        let c = Array::from_parts(&[1, 2], vec![1.0, 2.0], vec![-1.0, 0.5]);
        assert_eq!(c.to_string(), "1-1i 2+0.5i\n");
    }
}

use alloc::vec::Vec;

use thiserror::Error;

use crate::linalg::LinalgError;

/// Errors raised by the array engine.
///
/// Every variant is a local, synchronous failure reported at the point of
/// violation. Nothing in the engine retries or truncates silently.
///
/// ```
/// use matrt::{Array, Error};
///
/// let mut a = Array::zeros(&[2, 2]);
/// assert!(matches!(a.set(&[0], 1.0), Err(Error::IndexBelowOne { .. })));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A coordinate below 1. Arrays never grow below index 1.
    #[error("index along dimension {axis} is below 1; indices must be positive integers")]
    IndexBelowOne {
        /// Zero-based axis the coordinate addresses.
        axis: usize,
    },

    /// An index value that is not a finite integer.
    #[error("invalid index value {value}; indices must be positive integers")]
    InvalidIndex {
        /// The value that was supplied as an index.
        value: f64,
    },

    /// Read past the end of an array. Reads never grow.
    #[error("index exceeds array bounds: position {coord} along dimension {axis} exceeds extent {extent}")]
    IndexOutOfRange {
        /// Offending coordinate (1-based).
        coord: usize,
        /// Zero-based axis the coordinate addresses.
        axis: usize,
        /// Current extent of that axis.
        extent: usize,
    },

    /// Two non-scalar operands whose dims disagree after rank padding.
    #[error("cannot apply an operator to variables of size {lhs:?} and {rhs:?}")]
    ShapeMismatch {
        /// Left operand dims.
        lhs: Vec<usize>,
        /// Right operand dims.
        rhs: Vec<usize>,
    },

    /// Colon expression constructed with a zero step.
    #[error("step size must be nonzero in colon expression")]
    DegenerateRange,

    /// Operation outside the supported subset of the engine.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Growth to a shape whose storage cannot be addressed or allocated.
    #[error("out of memory: an array of size {dims:?} cannot be allocated")]
    OutOfMemory {
        /// Requested dims.
        dims: Vec<usize>,
    },

    /// Complex data where only real data is meaningful.
    #[error("complex values are not allowed: {0}")]
    Complex(&'static str),

    /// Failure reported by the linear algebra collaborator.
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub(crate) fn shape(lhs: &[usize], rhs: &[usize]) -> Self {
        Error::ShapeMismatch {
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }
}

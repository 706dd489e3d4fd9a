//! Dense linear algebra collaborator.
//!
//! The math layer never factors matrices itself: matrix products,
//! transposes and linear solves go through a [`LinalgBackend`]. The crate
//! ships [`DenseBackend`] (feature `linalg`, on by default), a pure-Rust
//! implementation built on column-major kernels:
//!
//! | Operation | Kernel |
//! |-----------|--------|
//! | `gemm` | column-major `j, k, i` loop |
//! | transpose / hermitian | blocked, [`BLOCK`]-sized tiles |
//! | square solve | LU with partial pivoting |
//! | rectangular solve | Householder QR with column pivoting |
//!
//! Solvers report soft failures through a caller-supplied warning callback
//! and still return a result; only an exactly singular square system is an
//! error.

#[cfg(feature = "linalg")]
mod backend;
#[cfg(feature = "linalg")]
pub(crate) mod dense;
#[cfg(feature = "linalg")]
pub(crate) mod lu;
#[cfg(feature = "linalg")]
pub(crate) mod qr;

#[cfg(feature = "linalg")]
pub use backend::DenseBackend;
#[cfg(feature = "linalg")]
pub use dense::BLOCK;

use thiserror::Error;

use crate::array::Array;
use crate::error::Result;

/// Errors from linear algebra operations.
///
/// ```
/// use matrt::linalg::LinalgError;
///
/// assert_eq!(LinalgError::Singular.to_string(), "matrix is singular");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinalgError {
    /// A square system with an exactly zero pivot column.
    #[error("matrix is singular")]
    Singular,
}

/// Interface to a dense linear algebra provider.
///
/// Arguments are 2-D arrays; the `_real` methods ignore imaginary parts and
/// the `_complex` methods read a missing imaginary part as zero. Results
/// are `Double` arrays, complex for the `_complex` methods.
///
/// Non-conformant operands are an
/// [`Error::ShapeMismatch`](crate::Error::ShapeMismatch). Solvers call
/// `log` with a human-readable message for ill-conditioned or
/// rank-deficient systems and still return a result.
pub trait LinalgBackend {
    /// `a * b` for real matrices.
    fn gemm_real(&self, a: &Array, b: &Array) -> Result<Array>;

    /// `a * b` for complex matrices.
    fn gemm_complex(&self, a: &Array, b: &Array) -> Result<Array>;

    /// `a.'` for a real matrix.
    fn transpose_real(&self, a: &Array) -> Result<Array>;

    /// `a.'` for a complex matrix (no conjugation).
    fn transpose_complex(&self, a: &Array) -> Result<Array>;

    /// `a'`: conjugate transpose of a complex matrix.
    fn hermitian_complex(&self, a: &Array) -> Result<Array>;

    /// Solve `a x = b` for real matrices: exactly for square `a`, in the
    /// least-squares / minimum-norm sense otherwise.
    fn solve_real(&self, a: &Array, b: &Array, log: &mut dyn FnMut(&str)) -> Result<Array>;

    /// Solve `a x = b` for complex matrices.
    fn solve_complex(&self, a: &Array, b: &Array, log: &mut dyn FnMut(&str)) -> Result<Array>;
}

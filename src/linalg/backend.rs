use alloc::format;
use alloc::vec;

use num_complex::Complex64;
use tracing::debug;

use super::dense::{DenseMatrix, Element};
use super::lu::{lu_in_place, lu_solve};
use super::qr::{apply_q, apply_qh, pivoted_rank, qr_pivoted, solve_upper, solve_upper_hermitian};
use super::LinalgBackend;
use crate::array::Array;
use crate::error::{Error, Result};

/// Pure-Rust [`LinalgBackend`].
///
/// # Example
///
/// ```
/// use matrt::linalg::{DenseBackend, LinalgBackend};
/// use matrt::Array;
///
/// // [4 -2; 1 1] x = [2; 3]  →  x = [1.3333; 1.6667]
/// let a = Array::from_vec(&[2, 2], vec![4.0, 1.0, -2.0, 1.0]);
/// let b = Array::from_vec(&[2, 1], vec![2.0, 3.0]);
/// let mut warnings = Vec::new();
/// let x = DenseBackend
///     .solve_real(&a, &b, &mut |msg| warnings.push(msg.to_string()))
///     .unwrap();
/// assert!((x.real()[0] - 4.0 / 3.0).abs() < 1e-12);
/// assert!((x.real()[1] - 5.0 / 3.0).abs() < 1e-12);
/// assert!(warnings.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseBackend;

fn gemm<T: Element>(a: &Array, b: &Array) -> Result<Array> {
    let x = DenseMatrix::<T>::from_array(a)?;
    let y = DenseMatrix::<T>::from_array(b)?;
    if x.ncols() != y.nrows() {
        return Err(Error::shape(a.dims(), b.dims()));
    }
    debug!(lhs = ?a.dims(), rhs = ?b.dims(), "dense gemm");
    Ok(x.matmul(&y).into_array())
}

fn transpose<T: Element>(a: &Array, conjugate: bool) -> Result<Array> {
    Ok(DenseMatrix::<T>::from_array(a)?.transpose(conjugate).into_array())
}

fn solve<T: Element>(a: &Array, b: &Array, log: &mut dyn FnMut(&str)) -> Result<Array> {
    let mut lhs = DenseMatrix::<T>::from_array(a)?;
    let rhs = DenseMatrix::<T>::from_array(b)?;
    let (m, n) = (lhs.nrows(), lhs.ncols());
    if rhs.nrows() != m {
        return Err(Error::shape(a.dims(), b.dims()));
    }
    let k = rhs.ncols();
    if m == 0 || n == 0 {
        return Ok(DenseMatrix::<T>::zeros(n, k).into_array());
    }

    if m == n {
        debug!(n, nrhs = k, "LU solve");
        let mut perm = vec![0; n];
        let rcond = lu_in_place(&mut lhs, &mut perm)?;
        if rcond < f64::EPSILON {
            log(&format!(
                "Matrix is singular to working precision.  RCOND = {:e}",
                rcond
            ));
        }
        return Ok(lu_solve(&lhs, &perm, &rhs).into_array());
    }

    if m > n {
        // Least squares: A P = Q R, x = P R^-1 (Q^H b)[..n]
        debug!(m, n, nrhs = k, "QR least-squares solve");
        let mut tau = vec![T::zero(); n];
        let mut jpvt = vec![0; n];
        qr_pivoted(&mut lhs, &mut tau, &mut jpvt);
        let rank = pivoted_rank(&lhs);
        if rank < n {
            log(&format!("Matrix is rank deficient to machine precision.  RANK = {}", rank));
        }
        let mut c = rhs;
        apply_qh(&lhs, &tau, &mut c);
        let y = solve_upper(&lhs, rank, &c, n);
        let mut x = DenseMatrix::<T>::zeros(n, k);
        for (i, &p) in jpvt.iter().enumerate() {
            for j in 0..k {
                x[(p, j)] = y[(i, j)];
            }
        }
        return Ok(x.into_array());
    }

    // Minimum norm: A^H P = Q R, so P^T A = R^H Q^H and x = Q [R^-H P^T b; 0]
    debug!(m, n, nrhs = k, "QR minimum-norm solve");
    let mut adj = lhs.transpose(true);
    let mut tau = vec![T::zero(); m];
    let mut jpvt = vec![0; m];
    qr_pivoted(&mut adj, &mut tau, &mut jpvt);
    let rank = pivoted_rank(&adj);
    if rank < m {
        log(&format!("Matrix is rank deficient to machine precision.  RANK = {}", rank));
    }
    let permuted = DenseMatrix::from_fn(m, k, |i, j| rhs[(jpvt[i], j)]);
    let mut x = solve_upper_hermitian(&adj, rank, &permuted, n);
    apply_q(&adj, &tau, &mut x);
    Ok(x.into_array())
}

impl LinalgBackend for DenseBackend {
    fn gemm_real(&self, a: &Array, b: &Array) -> Result<Array> {
        gemm::<f64>(a, b)
    }

    fn gemm_complex(&self, a: &Array, b: &Array) -> Result<Array> {
        gemm::<Complex64>(a, b)
    }

    fn transpose_real(&self, a: &Array) -> Result<Array> {
        transpose::<f64>(a, false)
    }

    fn transpose_complex(&self, a: &Array) -> Result<Array> {
        transpose::<Complex64>(a, false)
    }

    fn hermitian_complex(&self, a: &Array) -> Result<Array> {
        transpose::<Complex64>(a, true)
    }

    fn solve_real(&self, a: &Array, b: &Array, log: &mut dyn FnMut(&str)) -> Result<Array> {
        solve::<f64>(a, b, log)
    }

    fn solve_complex(&self, a: &Array, b: &Array, log: &mut dyn FnMut(&str)) -> Result<Array> {
        solve::<Complex64>(a, b, log)
    }
}

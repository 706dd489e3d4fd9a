use alloc::vec;
use alloc::vec::Vec;

use num_traits::Float;

use super::dense::DenseMatrix;
use crate::traits::LinalgScalar;

/// Householder QR with column pivoting, in place: `A P = Q R`.
///
/// On return, `a` contains the packed factorization:
/// - Upper triangle (including diagonal): R
/// - Below the diagonal: Householder vectors, scaled so that the implicit
///   leading entry is 1
///
/// `tau` receives the reflector factors (`H = I - tau v v^H`, `tau` real
/// even for complex input) and `jpvt` the column permutation: column `i`
/// of `A P` is column `jpvt[i]` of `A`. At each step the remaining column
/// with the largest norm is moved forward, so `|R[i, i]|` is non-increasing.
///
/// Works for any shape; `min(M, N)` reflectors are produced. A column that
/// is exactly zero gets `tau = 0` (identity reflector).
pub(crate) fn qr_pivoted<T: LinalgScalar>(
    a: &mut DenseMatrix<T>,
    tau: &mut [T],
    jpvt: &mut [usize],
) {
    let m = a.nrows();
    let n = a.ncols();
    let k = m.min(n);
    debug_assert_eq!(tau.len(), k);
    debug_assert_eq!(jpvt.len(), n);

    for (i, p) in jpvt.iter_mut().enumerate() {
        *p = i;
    }

    for col in 0..k {
        // Pivot: bring the trailing column with the largest norm forward
        let mut best = col;
        let mut best_norm = -1.0;
        for j in col..n {
            let norm_sq: f64 = a.col(j, col).iter().map(|v| v.norm_sqr()).sum();
            if norm_sq > best_norm {
                best_norm = norm_sq;
                best = j;
            }
        }
        if best != col {
            a.swap_cols(col, best);
            jpvt.swap(col, best);
        }

        let norm_sq = best_norm.max(0.0);
        if norm_sq == 0.0 {
            tau[col] = T::zero();
            continue;
        }

        let norm = Float::sqrt(norm_sq);
        let a_col_col = a[(col, col)];

        // sigma carries the phase of a[col, col] so that v0 = a + sigma
        // avoids cancellation
        let alpha = a_col_col.modulus();
        let sigma = if alpha == 0.0 {
            T::from_real(norm)
        } else {
            T::from_real(norm) * (a_col_col / T::from_real(alpha))
        };

        let v0 = a_col_col + sigma;
        let tau_val = v0 / sigma;
        tau[col] = tau_val;

        let inv_v0 = T::one() / v0;
        for x in a.col_mut(col, col + 1) {
            *x = *x * inv_v0;
        }

        // A[col:m, j] -= tau * v * (v^H A[col:m, j]) for the trailing columns
        for j in (col + 1)..n {
            let (v, target) = a.two_cols_mut(col, j, col + 1);
            let mut dot = dot_h(v, target);
            dot = (dot + a[(col, j)]) * tau_val;
            a[(col, j)] = a[(col, j)] - dot;
            let (v, target) = a.two_cols_mut(col, j, col + 1);
            for (t, &vi) in target.iter_mut().zip(v) {
                *t = *t - dot * vi;
            }
        }

        a[(col, col)] = -sigma;
    }
}

/// `v^H t` over two equally long slices.
#[inline]
fn dot_h<T: LinalgScalar>(v: &[T], t: &[T]) -> T {
    v.iter()
        .zip(t)
        .fold(T::zero(), |acc, (&vi, &ti)| acc + vi.conj() * ti)
}

/// Overwrite `b` (M x K) with `Q^H b`, applying the reflectors in order.
pub(crate) fn apply_qh<T: LinalgScalar>(qr: &DenseMatrix<T>, tau: &[T], b: &mut DenseMatrix<T>) {
    for (col, &t) in tau.iter().enumerate() {
        if t == T::zero() {
            continue;
        }
        let v = qr.col(col, col + 1);
        for k in 0..b.ncols() {
            let dot = (b[(col, k)] + dot_h(v, b.col(k, col + 1))) * t;
            b[(col, k)] = b[(col, k)] - dot;
            for (x, &vi) in b.col_mut(k, col + 1).iter_mut().zip(v) {
                *x = *x - dot * vi;
            }
        }
    }
}

/// Overwrite `x` (M x K) with `Q x`, applying the reflectors in reverse.
pub(crate) fn apply_q<T: LinalgScalar>(qr: &DenseMatrix<T>, tau: &[T], x: &mut DenseMatrix<T>) {
    for (col, &t) in tau.iter().enumerate().rev() {
        if t == T::zero() {
            continue;
        }
        let v = qr.col(col, col + 1);
        for k in 0..x.ncols() {
            let dot = (x[(col, k)] + dot_h(v, x.col(k, col + 1))) * t;
            x[(col, k)] = x[(col, k)] - dot;
            for (xi, &vi) in x.col_mut(k, col + 1).iter_mut().zip(v) {
                *xi = *xi - dot * vi;
            }
        }
    }
}

/// Numerical rank from the diagonal of a pivoted R: entries at or below
/// `max(M, N) * eps * |R[0, 0]|` count as zero.
pub(crate) fn pivoted_rank<T: LinalgScalar>(qr: &DenseMatrix<T>) -> usize {
    let k = qr.nrows().min(qr.ncols());
    if k == 0 {
        return 0;
    }
    let tol = qr.nrows().max(qr.ncols()) as f64 * f64::EPSILON * qr[(0, 0)].modulus();
    (0..k).take_while(|&i| qr[(i, i)].modulus() > tol).count()
}

/// Solve the leading `r x r` upper-triangular system `R y = c` for each
/// column of `c`; rows past `r` of the result are zero.
pub(crate) fn solve_upper<T: LinalgScalar>(
    qr: &DenseMatrix<T>,
    r: usize,
    c: &DenseMatrix<T>,
    n: usize,
) -> DenseMatrix<T> {
    let mut y = DenseMatrix::zeros(n, c.ncols());
    for k in 0..c.ncols() {
        for i in (0..r).rev() {
            let mut sum = c[(i, k)];
            for j in (i + 1)..r {
                sum = sum - qr[(i, j)] * y[(j, k)];
            }
            y[(i, k)] = sum / qr[(i, i)];
        }
    }
    y
}

/// Solve the leading `r x r` lower-triangular system `R^H z = c` for each
/// column of `c`; rows past `r` of the result are zero.
pub(crate) fn solve_upper_hermitian<T: LinalgScalar>(
    qr: &DenseMatrix<T>,
    r: usize,
    c: &DenseMatrix<T>,
    n: usize,
) -> DenseMatrix<T> {
    let mut z = DenseMatrix::zeros(n, c.ncols());
    let mut acc: Vec<T> = vec![T::zero(); r];
    for k in 0..c.ncols() {
        for i in 0..r {
            let mut sum = c[(i, k)];
            for j in 0..i {
                sum = sum - qr[(j, i)].conj() * acc[j];
            }
            acc[i] = sum / qr[(i, i)].conj();
            z[(i, k)] = acc[i];
        }
    }
    z
}

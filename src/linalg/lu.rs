use alloc::vec;

use super::dense::DenseMatrix;
use super::LinalgError;
use crate::traits::LinalgScalar;

/// LU decomposition with partial pivoting, in place.
///
/// On return, `a` holds both factors packed together:
/// - Upper triangle (including diagonal): U
/// - Lower triangle (excluding diagonal): L (unit diagonal implied)
///
/// `perm` is filled with the row permutation. Returns the ratio of the
/// smallest to the largest pivot modulus, a cheap reciprocal condition
/// estimate. An exactly zero pivot column is [`LinalgError::Singular`].
pub(crate) fn lu_in_place<T: LinalgScalar>(
    a: &mut DenseMatrix<T>,
    perm: &mut [usize],
) -> Result<f64, LinalgError> {
    let n = a.nrows();
    debug_assert_eq!(n, a.ncols(), "LU decomposition requires a square matrix");
    debug_assert_eq!(n, perm.len());

    for (i, p) in perm.iter_mut().enumerate() {
        *p = i;
    }

    for col in 0..n {
        // Partial pivoting: largest modulus in this column
        let mut max_row = col;
        let mut max_val = a[(col, col)].modulus();
        for row in (col + 1)..n {
            let val = a[(row, col)].modulus();
            if val > max_val {
                max_val = val;
                max_row = row;
            }
        }

        if max_val == 0.0 {
            return Err(LinalgError::Singular);
        }

        if max_row != col {
            perm.swap(col, max_row);
            a.swap_rows(col, max_row);
        }

        // dgetf2-style elimination: scale the sub-column by 1/pivot, then
        // a rank-1 update of the trailing columns, all on contiguous slices.
        let inv_pivot = T::one() / a[(col, col)];
        for x in a.col_mut(col, col + 1) {
            *x = *x * inv_pivot;
        }
        for j in (col + 1)..n {
            let a_col_j = a[(col, j)];
            let (left, right) = a.two_cols_mut(col, j, col + 1);
            for (r, &l) in right.iter_mut().zip(left) {
                *r = *r - a_col_j * l;
            }
        }
    }

    let (mut lo, mut hi) = (f64::INFINITY, 0.0_f64);
    for i in 0..n {
        let d = a[(i, i)].modulus();
        lo = lo.min(d);
        hi = hi.max(d);
    }
    Ok(if n == 0 { 1.0 } else { lo / hi })
}

/// Solve `A X = B` given the packed factors from [`lu_in_place`].
///
/// Each column of `b` is solved independently.
pub(crate) fn lu_solve<T: LinalgScalar>(
    lu: &DenseMatrix<T>,
    perm: &[usize],
    b: &DenseMatrix<T>,
) -> DenseMatrix<T> {
    let n = lu.nrows();
    let mut x = DenseMatrix::zeros(n, b.ncols());
    let mut y = vec![T::zero(); n];
    for k in 0..b.ncols() {
        // Forward substitution: L y = P b
        for i in 0..n {
            let mut sum = b[(perm[i], k)];
            for j in 0..i {
                sum = sum - lu[(i, j)] * y[j];
            }
            y[i] = sum;
        }
        // Back substitution: U x = y
        for i in (0..n).rev() {
            let mut sum = y[i];
            for j in (i + 1)..n {
                sum = sum - lu[(i, j)] * x[(j, k)];
            }
            x[(i, k)] = sum / lu[(i, i)];
        }
    }
    x
}

use matrt::linalg::{DenseBackend, LinalgBackend, LinalgError};
use matrt::math::{hermitian, mldivide, mldivide_with, mrdivide, mrdivide_with, mtimes, mtimes_with, transpose};
use matrt::{Array, ElementKind, Error, Value};
use num_complex::Complex64;

type C = Complex64;

fn c(re: f64, im: f64) -> C {
    Complex64::new(re, im)
}

fn mat(rows: usize, cols: usize, data: &[f64]) -> Value {
    Value::from(Array::from_vec(&[rows, cols], data.to_vec()))
}

const TOL: f64 = 1e-10;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!((a - b).abs() < tol, "{}: {} vs {}", msg, a, b);
}

fn assert_complex_near(a: C, b: C, tol: f64, msg: &str) {
    assert!(
        (a.re - b.re).abs() < tol && (a.im - b.im).abs() < tol,
        "{}: {:?} vs {:?}",
        msg,
        a,
        b
    );
}

fn assert_values_near(a: &Value, b: &Value, tol: f64) {
    assert_eq!(a.dims(), b.dims());
    for k in 1..=a.len() {
        let x = a.get(&[k]).unwrap().scalar().unwrap();
        let y = b.get(&[k]).unwrap().scalar().unwrap();
        assert_complex_near(x, y, tol, &format!("element {}", k));
    }
}

// ── Matrix multiply ──────────────────────────────────────────────────

#[test]
fn mtimes_rectangular() {
    // [1 2 3; 4 5 6] * [1; 0; -1] = [-2; -2]
    let a = mat(2, 3, &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    let x = mat(3, 1, &[1.0, 0.0, -1.0]);
    assert_eq!(mtimes(&a, &x).unwrap(), mat(2, 1, &[-2.0, -2.0]));
}

#[test]
fn mtimes_inner_dimension_mismatch() {
    let a = mat(2, 3, &[0.0; 6]);
    assert!(matches!(mtimes(&a, &a), Err(Error::ShapeMismatch { .. })));
}

#[test]
fn mtimes_scalar_is_elementwise() {
    let a = mat(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(mtimes(&Value::Real(2.0), &a).unwrap(), mat(2, 2, &[2.0, 4.0, 6.0, 8.0]));
    assert_eq!(mtimes(&Value::Real(2.0), &Value::Real(3.0)).unwrap(), Value::Real(6.0));
}

#[test]
fn mtimes_complex() {
    // [i 1] * [i; 1] = i*i + 1 = 0
    let a = Value::from(Array::from_complex(&[1, 2], &[c(0.0, 1.0), c(1.0, 0.0)]));
    let b = Value::from(Array::from_complex(&[2, 1], &[c(0.0, 1.0), c(1.0, 0.0)]));
    let r = mtimes(&a, &b).unwrap();
    assert!(r.is_complex());
    assert_complex_near(r.scalar().unwrap(), c(0.0, 0.0), TOL, "product");

    // Mixed real * complex goes through the complex kernel
    let m = mat(2, 2, &[1.0, 0.0, 0.0, 2.0]);
    let r = mtimes(&m, &b).unwrap();
    assert_values_near(&r, &Value::from(Array::from_complex(&[2, 1], &[c(0.0, 1.0), c(2.0, 0.0)])), TOL);
}

#[test]
fn mtimes_rejects_nd() {
    let a = Value::from(Array::zeros(&[2, 2, 2]));
    let b = mat(2, 2, &[0.0; 4]);
    assert!(matches!(mtimes(&a, &b), Err(Error::Unsupported(_))));
}

// ── Transpose ────────────────────────────────────────────────────────

#[test]
fn transpose_and_hermitian() {
    let a = mat(2, 3, &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    let t = transpose(&a).unwrap();
    assert_eq!(t, mat(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
    // Real hermitian is the plain transpose
    assert_eq!(hermitian(&a).unwrap(), t);

    let z = Value::from(Array::from_complex(&[1, 2], &[c(1.0, 1.0), c(2.0, -2.0)]));
    let h = hermitian(&z).unwrap();
    assert_eq!(h, Value::from(Array::from_complex(&[2, 1], &[c(1.0, -1.0), c(2.0, 2.0)])));
    let t = transpose(&z).unwrap();
    assert_eq!(t, Value::from(Array::from_complex(&[2, 1], &[c(1.0, 1.0), c(2.0, -2.0)])));
}

#[test]
fn transpose_of_scalars() {
    assert_eq!(transpose(&Value::Real(3.0)).unwrap(), Value::Real(3.0));
    assert_eq!(hermitian(&Value::Complex(c(1.0, 2.0))).unwrap(), Value::Complex(c(1.0, -2.0)));
}

#[test]
fn transpose_keeps_logical_kind() {
    let a = Value::from(Array::from_bools(&[1, 3], &[true, false, true]));
    let t = transpose(&a).unwrap();
    assert_eq!(t.kind(), ElementKind::Logical);
    assert_eq!(t.dims(), &[3, 1]);
}

#[test]
fn transpose_large_is_blocked_correctly() {
    // Spans several tiles, with ragged edges on both axes
    let (m, n) = (70, 45);
    let a = Value::from(Array::from_fn(&[m, n], |k| k as f64));
    let t = transpose(&a).unwrap();
    assert_eq!(t.dims(), &[n, m]);
    for i in [1, 33, 70] {
        for j in [1, 32, 45] {
            assert_eq!(t.get(&[j, i]).unwrap(), a.get(&[i, j]).unwrap());
        }
    }
}

// ── Left division ────────────────────────────────────────────────────

#[test]
fn mldivide_square() {
    // [2 1; 1 3] x = [3; 5]  →  x = [0.8; 1.4]
    let a = mat(2, 2, &[2.0, 1.0, 1.0, 3.0]);
    let b = mat(2, 1, &[3.0, 5.0]);
    let x = mldivide(&a, &b).unwrap();
    assert_values_near(&x, &mat(2, 1, &[0.8, 1.4]), TOL);
}

#[test]
fn mldivide_needs_pivoting() {
    // Zero in the leading position
    let a = mat(3, 3, &[0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0]);
    let want = mat(3, 1, &[1.0, -2.0, 3.0]);
    let b = mtimes(&a, &want).unwrap();
    let x = mldivide(&a, &b).unwrap();
    assert_values_near(&x, &want, TOL);
}

#[test]
fn mldivide_multiple_right_hand_sides() {
    let a = mat(2, 2, &[4.0, 1.0, 1.0, 3.0]);
    let b = mat(2, 3, &[1.0, 0.0, 0.0, 1.0, 5.0, 4.0]);
    let x = mldivide(&a, &b).unwrap();
    assert_eq!(x.dims(), &[2, 3]);
    assert_values_near(&mtimes(&a, &x).unwrap(), &b, TOL);
}

#[test]
fn mldivide_least_squares() {
    // Fit y = c0 + c1 t through (0, 1), (1, 3), (2, 5), (3, 7)
    let a = mat(4, 2, &[1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 2.0, 3.0]);
    let b = mat(4, 1, &[1.0, 3.0, 5.0, 7.0]);
    let x = mldivide(&a, &b).unwrap();
    assert_values_near(&x, &mat(2, 1, &[1.0, 2.0]), TOL);
}

#[test]
fn mldivide_minimum_norm() {
    // [1 2 2; 0 1 0] x = [9; 1]
    let a = mat(2, 3, &[1.0, 0.0, 2.0, 1.0, 2.0, 0.0]);
    let b = mat(2, 1, &[9.0, 1.0]);
    let x = mldivide(&a, &b).unwrap();
    assert_eq!(x.dims(), &[3, 1]);
    assert_values_near(&mtimes(&a, &x).unwrap(), &b, TOL);
    // No component along the null space [2; 0; -1]
    let null = mat(1, 3, &[2.0, 0.0, -1.0]);
    let proj = mtimes(&null, &x).unwrap().scalar().unwrap();
    assert_near(proj.re, 0.0, TOL, "null-space component");
    assert_values_near(&x, &mat(3, 1, &[1.4, 1.0, 2.8]), TOL);
}

#[test]
fn mldivide_scalar_is_elementwise() {
    let nine = mat(1, 1, &[9.0]);
    let a = mat(1, 3, &[1.0, 2.0, 2.0]);
    let r = mldivide(&nine, &a).unwrap();
    assert_values_near(&r, &mat(1, 3, &[1.0 / 9.0, 2.0 / 9.0, 2.0 / 9.0]), TOL);
}

#[test]
fn mldivide_complex() {
    let a = Value::from(Array::from_complex(
        &[2, 2],
        &[c(2.0, 1.0), c(1.0, 0.0), c(1.0, -1.0), c(3.0, 2.0)],
    ));
    let b = Value::from(Array::from_complex(&[2, 1], &[c(5.0, 3.0), c(7.0, 4.0)]));
    let x = mldivide(&a, &b).unwrap();
    assert!(x.is_complex());
    assert_values_near(&mtimes(&a, &x).unwrap(), &b, TOL);
}

#[test]
fn mldivide_singular_is_error() {
    let a = mat(2, 2, &[1.0, 2.0, 2.0, 4.0]);
    let b = mat(2, 1, &[1.0, 1.0]);
    assert_eq!(mldivide(&a, &b).unwrap_err(), Error::Linalg(LinalgError::Singular));
}

#[test]
fn mldivide_row_mismatch() {
    let a = mat(2, 2, &[1.0, 0.0, 0.0, 1.0]);
    let b = mat(3, 1, &[1.0, 1.0, 1.0]);
    assert!(matches!(mldivide(&a, &b), Err(Error::ShapeMismatch { .. })));
}

// ── Warnings ─────────────────────────────────────────────────────────

#[test]
fn ill_conditioned_system_warns_through_callback() {
    let a = mat(2, 2, &[1.0, 0.0, 0.0, 1e-20]);
    let b = mat(2, 1, &[1.0, 1.0]);
    let mut warnings = Vec::new();
    let x = mldivide_with(&DenseBackend, &a, &b, &mut |m| warnings.push(m.to_string())).unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("RCOND"));
    assert_near(x.get(&[1]).unwrap().scalar().unwrap().re, 1.0, TOL, "x1");
}

#[test]
fn rank_deficient_least_squares_warns() {
    let a = mat(3, 2, &[1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
    let b = mat(3, 1, &[2.0, 2.0, 2.0]);
    let mut warnings = Vec::new();
    let x = mldivide_with(&DenseBackend, &a, &b, &mut |m| warnings.push(m.to_string())).unwrap();
    assert_eq!(warnings, ["Matrix is rank deficient to machine precision.  RANK = 1"]);
    // The basic solution still satisfies the consistent system
    assert_values_near(&mtimes(&a, &x).unwrap(), &b, TOL);
}

#[test]
fn well_conditioned_system_is_silent() {
    let a = mat(2, 2, &[3.0, 1.0, 1.0, 2.0]);
    let b = mat(2, 1, &[1.0, 0.0]);
    let mut warnings: Vec<String> = Vec::new();
    mldivide_with(&DenseBackend, &a, &b, &mut |m| warnings.push(m.to_string())).unwrap();
    assert!(warnings.is_empty());
}

// ── Right division ───────────────────────────────────────────────────

#[test]
fn mrdivide_square() {
    // x [2 1; 1 3] = [3 5]
    let a = mat(1, 2, &[3.0, 5.0]);
    let b = mat(2, 2, &[2.0, 1.0, 1.0, 3.0]);
    let x = mrdivide(&a, &b).unwrap();
    assert_eq!(x.dims(), &[1, 2]);
    assert_values_near(&mtimes(&x, &b).unwrap(), &a, TOL);
}

#[test]
fn mrdivide_complex_uses_conjugate_transposes() {
    let b = Value::from(Array::from_complex(
        &[2, 2],
        &[c(1.0, 1.0), c(0.0, 2.0), c(1.0, 0.0), c(3.0, -1.0)],
    ));
    let a = Value::from(Array::from_complex(&[1, 2], &[c(1.0, 0.0), c(0.0, 1.0)]));
    let x = mrdivide(&a, &b).unwrap();
    assert_values_near(&mtimes(&x, &b).unwrap(), &a, TOL);
}

#[test]
fn mrdivide_scalar_is_elementwise() {
    let a = mat(1, 2, &[2.0, 4.0]);
    assert_eq!(mrdivide(&a, &Value::Real(2.0)).unwrap(), mat(1, 2, &[1.0, 2.0]));
}

// ── Element kinds ────────────────────────────────────────────────────

#[test]
fn wider_kind_wins_in_matrix_ops() {
    let s = Value::from(
        Array::from_vec(&[2, 2], vec![2.0, 0.0, 0.0, 2.0])
            .to_kind(ElementKind::Single)
            .unwrap(),
    );
    let d = mat(2, 1, &[0.1, 0.2]);
    assert_eq!(mtimes(&s, &d).unwrap().kind(), ElementKind::Double);
    assert_eq!(mldivide(&s, &d).unwrap().kind(), ElementKind::Double);
    assert_eq!(mtimes(&s, &s).unwrap().kind(), ElementKind::Single);

    let l = Value::from(Array::from_bools(&[2, 2], &[true, false, false, true]));
    assert_eq!(mtimes(&l, &l).unwrap().kind(), ElementKind::Double);
    assert_eq!(mtimes(&s, &l).unwrap().kind(), ElementKind::Single);
}

// ── Custom backends ──────────────────────────────────────────────────

/// Counts calls and forwards to the dense backend.
#[derive(Default)]
struct Counting {
    calls: std::cell::Cell<usize>,
}

impl Counting {
    fn tick(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl LinalgBackend for Counting {
    fn gemm_real(&self, a: &Array, b: &Array) -> matrt::Result<Array> {
        self.tick();
        DenseBackend.gemm_real(a, b)
    }
    fn gemm_complex(&self, a: &Array, b: &Array) -> matrt::Result<Array> {
        self.tick();
        DenseBackend.gemm_complex(a, b)
    }
    fn transpose_real(&self, a: &Array) -> matrt::Result<Array> {
        self.tick();
        DenseBackend.transpose_real(a)
    }
    fn transpose_complex(&self, a: &Array) -> matrt::Result<Array> {
        self.tick();
        DenseBackend.transpose_complex(a)
    }
    fn hermitian_complex(&self, a: &Array) -> matrt::Result<Array> {
        self.tick();
        DenseBackend.hermitian_complex(a)
    }
    fn solve_real(&self, a: &Array, b: &Array, log: &mut dyn FnMut(&str)) -> matrt::Result<Array> {
        self.tick();
        DenseBackend.solve_real(a, b, log)
    }
    fn solve_complex(&self, a: &Array, b: &Array, log: &mut dyn FnMut(&str)) -> matrt::Result<Array> {
        self.tick();
        DenseBackend.solve_complex(a, b, log)
    }
}

#[test]
fn scalar_operands_bypass_the_backend() {
    let backend = Counting::default();
    let a = mat(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    mtimes_with(&backend, &Value::Real(2.0), &a).unwrap();
    mrdivide_with(&backend, &a, &Value::Real(2.0), &mut |_| {}).unwrap();
    assert_eq!(backend.calls.get(), 0);

    mtimes_with(&backend, &a, &a).unwrap();
    assert_eq!(backend.calls.get(), 1);
    // Right division: two transposes, one solve, one transpose back
    mrdivide_with(&backend, &a, &a, &mut |_| {}).unwrap();
    assert_eq!(backend.calls.get(), 5);
}

#[test]
fn backend_is_object_safe() {
    let backend: &dyn LinalgBackend = &DenseBackend;
    let a = mat(2, 2, &[1.0, 0.0, 0.0, 1.0]);
    assert_eq!(mtimes_with(backend, &a, &a).unwrap(), a);
}

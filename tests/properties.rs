//! Property-based tests for indexing, growth, broadcasting and ranges.

use matrt::complex::{cdiv, cmul};
use matrt::concat::ncat;
use matrt::math::{minus, plus, power, rdivide, times};
use matrt::{Array, ColonGenerator, Value};
use num_complex::Complex64;
use proptest::prelude::*;

/// Matrix with dims in `1..=max` and small integer-valued entries.
fn matrix_strategy(max: usize) -> impl Strategy<Value = Array> {
    (1..=max, 1..=max).prop_flat_map(|(r, c)| {
        proptest::collection::vec(-100i32..100, r * c)
            .prop_map(move |v| Array::from_vec(&[r, c], v.into_iter().map(f64::from).collect()))
    })
}

/// Complex number, sometimes purely real or purely imaginary.
fn complex_strategy() -> impl Strategy<Value = Complex64> {
    let part = -1e3f64..1e3;
    (part.clone(), part, 0u8..3).prop_map(|(re, im, shape)| match shape {
        0 => Complex64::new(re, 0.0),
        1 => Complex64::new(0.0, im),
        _ => Complex64::new(re, im),
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Writing then reading a coordinate inside the shape returns the value.
    #[test]
    fn index_round_trip(a in matrix_strategy(6), i in 0usize..6, j in 0usize..6, v in -1e6f64..1e6) {
        let mut a = a;
        let (r, c) = (a.dims()[0], a.dims()[1]);
        let coords = [i % r + 1, j % c + 1];
        a.set(&coords, v).unwrap();
        prop_assert_eq!(a.get(&coords).unwrap(), Value::Real(v));
        prop_assert_eq!(a.dims(), &[r, c][..]);
    }

    /// Growing a matrix keeps every element that was there before.
    #[test]
    fn growth_preserves_prior_data(a in matrix_strategy(5), gi in 1usize..9, gj in 1usize..9, gk in 1usize..3) {
        let before = a.clone();
        let mut a = a;
        a.set(&[gi, gj, gk], 1.5).unwrap();
        let (r, c) = (before.dims()[0], before.dims()[1]);
        prop_assert!(a.dims()[0] >= r && a.dims()[1] >= c);
        for i in 1..=r {
            for j in 1..=c {
                if [i, j, 1] != [gi, gj, gk] {
                    prop_assert_eq!(a.get(&[i, j]).unwrap(), before.get(&[i, j]).unwrap());
                }
            }
        }
        prop_assert_eq!(a.get(&[gi, gj, gk]).unwrap(), Value::Real(1.5));
    }

    /// Row vectors grow as rows, columns as columns.
    #[test]
    fn vector_orientation_is_preserved(n in 2usize..20, extra in 1usize..50, column in any::<bool>()) {
        let dims = if column { [n, 1] } else { [1, n] };
        let mut a = Array::from_fn(&dims, |k| k as f64);
        a.set(&[n + extra], -1.0).unwrap();
        let want = if column { [n + extra, 1] } else { [1, n + extra] };
        prop_assert_eq!(a.dims(), &want[..]);
        for k in 1..=n {
            prop_assert_eq!(a.get(&[k]).unwrap(), Value::Real((k - 1) as f64));
        }
    }

    /// A scalar operand behaves like an array filled with that scalar.
    #[test]
    fn scalar_broadcast_matches_filled_array(
        a in matrix_strategy(5),
        s in -50.0f64..50.0,
        op in 0usize..5,
        scalar_first in any::<bool>(),
    ) {
        let filled = Value::from(Array::from_fn(a.dims(), |_| s));
        let scalar = Value::Real(s);
        // Keep divisors away from zero
        let arr = Value::from(Array::from_fn(a.dims(), |k| {
            let x = a.real()[k];
            if x == 0.0 { 1.0 } else { x }
        }));
        let ops: [fn(&Value, &Value) -> matrt::Result<Value>; 5] = [plus, minus, times, rdivide, power];
        let f = ops[op];
        let (lhs, rhs) = if scalar_first {
            (f(&scalar, &arr).unwrap(), f(&filled, &arr).unwrap())
        } else {
            (f(&arr, &scalar).unwrap(), f(&arr, &filled).unwrap())
        };
        prop_assert_eq!(lhs, rhs);
    }

    /// Once an array holds a complex element, every read is complex.
    #[test]
    fn complex_promotion_is_closed(a in matrix_strategy(4), im in 0.1f64..10.0, k in 1usize..40) {
        let mut a = a;
        a.set(&[k], Complex64::new(1.0, im)).unwrap();
        for n in 1..=a.len() {
            prop_assert!(matches!(a.get(&[n]).unwrap(), Value::Complex(_)));
        }
    }

    /// Division undoes multiplication.
    #[test]
    fn cdiv_inverts_cmul(a in complex_strategy(), b in complex_strategy()) {
        prop_assume!(b.norm() > 1e-3);
        let q = cdiv(cmul(a, b), b);
        let tol = 1e-9 * (1.0 + a.norm());
        prop_assert!((q - a).norm() < tol, "{:?} vs {:?}", q, a);
    }

    /// Concatenation adds extents along the axis and keeps both inputs.
    #[test]
    fn concatenation_shape_law(rows in 1usize..5, ca in 1usize..5, cb in 1usize..5, axis in 0usize..3) {
        let (da, db) = match axis {
            0 => ([ca, rows, 1], [cb, rows, 1]),
            1 => ([rows, ca, 1], [rows, cb, 1]),
            _ => ([rows, 2, ca], [rows, 2, cb]),
        };
        let a = Array::from_fn(&da, |k| k as f64);
        let b = Array::from_fn(&db, |k| -(k as f64) - 1.0);
        let out = ncat(&[Value::from(a.clone()), Value::from(b.clone())], axis).unwrap();
        prop_assert_eq!(out.dims()[axis], da[axis] + db[axis]);
        for ax in (0..3).filter(|&ax| ax != axis) {
            prop_assert_eq!(matrt::array::dim_at(out.dims(), ax), da[ax]);
        }
        for i in 1..=da[0] {
            for j in 1..=da[1] {
                for k in 1..=da[2] {
                    prop_assert_eq!(out.get(&[i, j, k]).unwrap(), a.get(&[i, j, k]).unwrap());
                }
            }
        }
        for i in 1..=db[0] {
            for j in 1..=db[1] {
                for k in 1..=db[2] {
                    let mut at = [i, j, k];
                    at[axis] += da[axis];
                    prop_assert_eq!(out.get(&at).unwrap(), b.get(&[i, j, k]).unwrap());
                }
            }
        }
    }

    /// Integer ranges have exactly `floor((stop - start) / step) + 1` elements.
    #[test]
    fn colon_length_formula(start in -200i32..200, step in -7i32..8, stop in -200i32..200) {
        prop_assume!(step != 0);
        let r = ColonGenerator::new(f64::from(start), f64::from(step), f64::from(stop)).unwrap();
        let ratio = f64::from(stop - start) / f64::from(step);
        let expected = (ratio.floor() + 1.0).max(0.0) as usize;
        prop_assert_eq!(r.len(), expected);
        let v: Vec<f64> = r.collect();
        prop_assert_eq!(v.len(), expected);
        for (n, x) in v.iter().enumerate() {
            prop_assert_eq!(*x, f64::from(start) + n as f64 * f64::from(step));
        }
    }

    /// Fractional steps end within one step of `stop` and never overshoot.
    #[test]
    fn colon_fractional_bounds(start in -10.0f64..10.0, step in 0.01f64..2.0, span in 0.0f64..20.0) {
        let stop = start + span;
        let v: Vec<f64> = ColonGenerator::new(start, step, stop).unwrap().collect();
        prop_assert!(!v.is_empty());
        let last = v[v.len() - 1];
        prop_assert!(last <= stop + 1e-9 * (1.0 + stop.abs()));
        prop_assert!(stop - last < step + 1e-9);
    }
}

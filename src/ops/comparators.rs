use num_complex::Complex64;

use super::{Comparator, LogicalOperator};

macro_rules! ordering {
    ($(#[$doc:meta])* $name:ident, $op:tt) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Comparator for $name {
            #[inline]
            fn cmp_real(&self, a: f64, b: f64) -> bool {
                a $op b
            }

            /// Orders by real part only; imaginary parts are ignored.
            #[inline]
            fn cmp_complex(&self, a: Complex64, b: Complex64) -> bool {
                a.re $op b.re
            }
        }
    };
}

ordering!(
    /// `a < b`
    LessThan, <
);
ordering!(
    /// `a <= b`
    LessEquals, <=
);
ordering!(
    /// `a > b`
    GreaterThan, >
);
ordering!(
    /// `a >= b`
    GreaterEquals, >=
);

/// `a == b`; complex values must match in both parts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Equals;

impl Comparator for Equals {
    #[inline]
    fn cmp_real(&self, a: f64, b: f64) -> bool {
        a == b
    }

    #[inline]
    fn cmp_complex(&self, a: Complex64, b: Complex64) -> bool {
        a.re == b.re && a.im == b.im
    }
}

/// `a ~= b`; true if either part differs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotEquals;

impl Comparator for NotEquals {
    #[inline]
    fn cmp_real(&self, a: f64, b: f64) -> bool {
        a != b
    }

    #[inline]
    fn cmp_complex(&self, a: Complex64, b: Complex64) -> bool {
        a.re != b.re || a.im != b.im
    }
}

/// `a & b`
#[derive(Debug, Clone, Copy, Default)]
pub struct And;

impl LogicalOperator for And {
    #[inline]
    fn apply(&self, a: bool, b: bool) -> bool {
        a && b
    }
}

/// `a | b`
#[derive(Debug, Clone, Copy, Default)]
pub struct Or;

impl LogicalOperator for Or {
    #[inline]
    fn apply(&self, a: bool, b: bool) -> bool {
        a || b
    }
}

/// `xor(a, b)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Xor;

impl LogicalOperator for Xor {
    #[inline]
    fn apply(&self, a: bool, b: bool) -> bool {
        a != b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn ordering_ignores_imaginary_part() {
        assert!(LessThan.cmp_complex(c(1.0, 100.0), c(2.0, -100.0)));
        assert!(!GreaterThan.cmp_complex(c(1.0, 100.0), c(2.0, -100.0)));
        assert!(LessEquals.cmp_complex(c(2.0, 5.0), c(2.0, -5.0)));
        assert!(GreaterEquals.cmp_complex(c(2.0, 5.0), c(2.0, -5.0)));
    }

    #[test]
    fn equality_uses_both_parts() {
        assert!(!Equals.cmp_complex(c(2.0, 5.0), c(2.0, -5.0)));
        assert!(NotEquals.cmp_complex(c(2.0, 5.0), c(2.0, -5.0)));
        assert!(Equals.cmp_complex(c(2.0, 5.0), c(2.0, 5.0)));
    }

    #[test]
    fn nan_compares_unequal() {
        assert!(!Equals.cmp_real(f64::NAN, f64::NAN));
        assert!(NotEquals.cmp_real(f64::NAN, f64::NAN));
        assert!(!LessThan.cmp_real(f64::NAN, 1.0));
    }

    #[test]
    fn truth_tables() {
        let pairs = [(false, false), (false, true), (true, false), (true, true)];
        let and: [bool; 4] = pairs.map(|(a, b)| And.apply(a, b));
        let or: [bool; 4] = pairs.map(|(a, b)| Or.apply(a, b));
        let xor: [bool; 4] = pairs.map(|(a, b)| Xor.apply(a, b));
        assert_eq!(and, [false, false, false, true]);
        assert_eq!(or, [false, true, true, true]);
        assert_eq!(xor, [false, true, true, false]);
    }
}

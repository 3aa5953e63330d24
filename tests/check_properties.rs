//! Comparison-law properties for the assertion surface.

use proptest::prelude::*;
use tessera::Checker;

proptest! {
    #[test]
    fn every_integer_equals_itself(v in any::<i32>()) {
        let mut cx = Checker::new();
        prop_assert!(cx.check_eq(v, v));
        prop_assert!(!cx.failed());
    }

    #[test]
    fn distinct_integers_never_compare_equal(a in any::<i32>(), b in any::<i32>()) {
        prop_assume!(a != b);
        let mut cx = Checker::new();
        prop_assert!(!cx.check_eq(a, b));
        prop_assert!(cx.failed());
    }

    #[test]
    fn every_normal_float_equals_itself(v in proptest::num::f64::NORMAL) {
        let mut cx = Checker::new();
        prop_assert!(cx.check_eq(v, v));
    }

    #[test]
    fn tolerance_comparison_is_symmetric(
        a in -1.0e6f64..1.0e6,
        b in -1.0e6f64..1.0e6,
        tol in 1.0e-6f64..10.0,
    ) {
        let mut left = Checker::new();
        let mut right = Checker::new();
        prop_assert_eq!(
            left.check_eq_within(a, b, tol),
            right.check_eq_within(b, a, tol)
        );
    }
}

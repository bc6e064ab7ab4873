//! Property tests for rectangle arithmetic.

use dockwork_core::geometry::{Point, Rect, Sides};
use proptest::prelude::*;

fn rect() -> impl Strategy<Value = Rect> {
    (-500i32..500, -500i32..500, 0i32..400, 0i32..400)
        .prop_map(|(x, y, width, height)| Rect::new(x, y, width, height))
}

proptest! {
    #[test]
    fn intersection_is_commutative_and_contained(a in rect(), b in rect()) {
        let ab = a.intersection(&b);
        prop_assert_eq!(ab, b.intersection(&a));
        if !ab.is_empty() {
            prop_assert!(a.contains_rect(&ab));
            prop_assert!(b.contains_rect(&ab));
        }
    }

    #[test]
    fn union_contains_both(a in rect(), b in rect()) {
        let u = a.union(&b);
        prop_assert!(u.contains_rect(&a));
        prop_assert!(u.contains_rect(&b));
        prop_assert!(u.area() >= a.area().max(b.area()));
    }

    #[test]
    fn points_in_intersection_are_in_both(a in rect(), b in rect(), px in -600i32..1000, py in -600i32..1000) {
        let p = Point::new(px, py);
        prop_assert_eq!(a.intersection(&b).contains(p), a.contains(p) && b.contains(p));
    }

    #[test]
    fn inner_never_grows(r in rect(), t in 0i32..50, s in 0i32..50, bm in 0i32..50, l in 0i32..50) {
        let inner = r.inner(Sides::new(t, s, bm, l));
        prop_assert!(inner.width >= 0 && inner.height >= 0);
        prop_assert!(inner.width <= r.width && inner.height <= r.height);
    }
}

use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;
use scarp_geom::Vec2;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vapprox(a: Vec2, b: Vec2, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps)
}

fn approx_abs_rel(a: f32, b: f32, atol: f32, rtol: f32) -> bool {
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    diff <= atol + rtol * scale
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e6)
}

fn bounded_nonzero_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded_nonzero", |v| {
        v.is_finite() && {
            let a = v.abs();
            a >= 1e-6 && a <= 1e6
        }
    })
}

fn arb_vec2() -> impl Strategy<Value = Vec2> {
    (bounded_f32(), bounded_f32()).prop_map(|(x, y)| Vec2::new(x, y))
}

proptest! {
    // Addition commutativity: a + b == b + a (element-wise)
    #[test]
    fn vec2_add_commutative(a in arb_vec2(), b in arb_vec2()) {
        prop_assert!(vapprox(a + b, b + a, 1e-5));
    }

    // Distributive property of dot over addition: (a + b)·c = a·c + b·c
    #[test]
    fn vec2_dot_distributive(a in arb_vec2(), b in arb_vec2(), c in arb_vec2()) {
        let left = (a + b).dot(c);
        let right = a.dot(c) + b.dot(c);
        prop_assert!(approx_abs_rel(left, right, 1e-6, 1e-5));
    }

    // perp is a quarter turn: v·perp(v) = 0 and perp(perp(v)) = -v
    #[test]
    fn vec2_perp_quarter_turn(v in arb_vec2()) {
        let scale = v.dot(v);
        prop_assert!(v.dot(v.perp()).abs() <= 1e-6 + 1e-5 * scale);
        prop_assert!(vapprox(v.perp().perp(), -v, 1e-5));
    }

    // cross anti-symmetry: cross(a, b) = -cross(b, a)
    #[test]
    fn vec2_cross_antisymmetric(a in arb_vec2(), b in arb_vec2()) {
        let l = a.cross(b);
        let r = -b.cross(a);
        prop_assert!(approx_abs_rel(l, r, 1e-6, 1e-5));
    }

    // cross relates to perp: cross(a, b) = perp(a)·b
    #[test]
    fn vec2_cross_is_perp_dot(a in arb_vec2(), b in arb_vec2()) {
        prop_assert!(approx_abs_rel(a.cross(b), a.perp().dot(b), 1e-6, 1e-5));
    }

    // Normalized length: |normalize(v)| = 1 for non-zero vectors
    #[test]
    fn vec2_normalized_length(
        x in bounded_nonzero_f32(),
        y in bounded_nonzero_f32(),
    ) {
        let v = Vec2::new(x, y);
        prop_assert!(approx(v.normalized().length(), 1.0, 1e-3));
    }

    // Cauchy-Schwarz: |a·b| <= |a||b|
    #[test]
    fn vec2_cauchy_schwarz(a in arb_vec2(), b in arb_vec2()) {
        let lhs = a.dot(b).abs();
        let rhs = a.length() * b.length();
        prop_assert!(lhs <= rhs + 1e-6 + 1e-5 * rhs.max(1.0));
    }
}

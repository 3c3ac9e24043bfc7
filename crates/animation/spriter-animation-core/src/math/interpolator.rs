//! Pure easing and root-solving functions.
//!
//! Higher-order eases are expressed as nested linear interpolations
//! (De Casteljau) rather than expanded polynomials, so their numerical
//! behavior is independent of argument order.

use std::f32::consts::PI;

/// Tolerance for accepting roots that rounding pushed just past the unit
/// range; a boundary root like u = 1 must not be mistaken for "no solution".
const ROOT_EPSILON: f32 = 1e-4;

#[inline]
fn unit_root(x: f32) -> Option<f32> {
    ((-ROOT_EPSILON..=1.0 + ROOT_EPSILON).contains(&x)).then(|| x.clamp(0.0, 1.0))
}

/// Linear interpolation.
#[inline]
pub fn linear(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quadratic ease through one control point.
#[inline]
pub fn quadratic(a: f32, b: f32, c: f32, t: f32) -> f32 {
    linear(linear(a, b, t), linear(b, c, t), t)
}

/// Cubic ease through two control points.
#[inline]
pub fn cubic(a: f32, b: f32, c: f32, d: f32, t: f32) -> f32 {
    linear(quadratic(a, b, c, t), quadratic(b, c, d, t), t)
}

/// Quartic ease through three control points.
#[inline]
pub fn quartic(a: f32, b: f32, c: f32, d: f32, e: f32, t: f32) -> f32 {
    linear(cubic(a, b, c, d, t), cubic(b, c, d, e, t), t)
}

/// Quintic ease through four control points.
#[inline]
pub fn quintic(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32, t: f32) -> f32 {
    linear(quartic(a, b, c, d, e, t), quartic(b, c, d, e, f, t), t)
}

/// Cubic Bezier through `p0..p3` evaluated at `t` (Bernstein basis).
#[inline]
pub fn bezier(t: f32, p0: f32, p1: f32, p2: f32, p3: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Solves `a*x^3 + b*x^2 + c*x + d = 0` for a real root in `[0, 1]`.
///
/// Cardano's method. Returns `None` when no real root lands in range,
/// which callers treat as a degenerate-constraint condition.
pub fn solve_cubic(a: f32, b: f32, c: f32, d: f32) -> Option<f32> {
    if a == 0.0 {
        return solve_quadratic(b, c, d);
    }

    if d == 0.0 {
        return Some(0.0);
    }

    let b = b / a;
    let c = c / a;
    let d = d / a;

    let squared_b = b * b;
    let q = (3.0 * c - squared_b) / 9.0;
    let r = (-27.0 * d + b * (9.0 * c - 2.0 * squared_b)) / 54.0;
    let disc = q * q * q + r * r;
    let term1 = b / 3.0;

    if disc > 0.0 {
        let sqrt_disc = disc.sqrt();

        let s = (r + sqrt_disc).cbrt();
        let t = (r - sqrt_disc).cbrt();

        if let Some(result) = unit_root(-term1 + s + t) {
            return Some(result);
        }
    } else if disc == 0.0 {
        let r13 = r.cbrt();

        if let Some(result) = unit_root(-term1 + 2.0 * r13) {
            return Some(result);
        }

        if let Some(result) = unit_root(-(r13 + term1)) {
            return Some(result);
        }
    } else {
        let q = -q;
        let q_sqrt = q.sqrt();

        // Three real roots; the argument is clamped against rounding drift.
        let angle = (r / (q * q_sqrt)).clamp(-1.0, 1.0).acos();
        let r13 = 2.0 * q_sqrt;

        for k in 0..3 {
            let result = -term1 + r13 * ((angle + 2.0 * PI * k as f32) / 3.0).cos();
            if let Some(result) = unit_root(result) {
                return Some(result);
            }
        }
    }

    None
}

/// Solves `a*x^2 + b*x + c = 0` for a real root in `[0, 1]`.
pub fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<f32> {
    if a == 0.0 {
        if b == 0.0 {
            return None;
        }
        return unit_root(-c / b);
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }

    let sqrt = disc.sqrt();
    let two_a = 2.0 * a;

    if let Some(result) = unit_root((-b + sqrt) / two_a) {
        return Some(result);
    }

    if let Some(result) = unit_root((-b - sqrt) / two_a) {
        return Some(result);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints() {
        assert_eq!(linear(2.0, 8.0, 0.0), 2.0);
        assert_eq!(linear(2.0, 8.0, 1.0), 8.0);
        assert_eq!(linear(2.0, 8.0, 0.5), 5.0);
    }

    #[test]
    fn nested_eases_hit_endpoints() {
        assert_eq!(quadratic(1.0, 5.0, 3.0, 0.0), 1.0);
        assert_eq!(quadratic(1.0, 5.0, 3.0, 1.0), 3.0);
        assert_eq!(cubic(1.0, 5.0, -2.0, 3.0, 0.0), 1.0);
        assert_eq!(cubic(1.0, 5.0, -2.0, 3.0, 1.0), 3.0);
        assert_eq!(quartic(1.0, 5.0, -2.0, 9.0, 3.0, 1.0), 3.0);
        assert_eq!(quintic(1.0, 5.0, -2.0, 9.0, 0.5, 3.0, 1.0), 3.0);
    }

    #[test]
    fn bezier_endpoints() {
        assert_eq!(bezier(0.0, 0.0, 0.3, 0.7, 1.0), 0.0);
        assert_eq!(bezier(1.0, 0.0, 0.3, 0.7, 1.0), 1.0);
    }

    #[test]
    fn solve_quadratic_picks_root_in_range() {
        // x^2 - x = 0 has roots 0 and 1
        let root = solve_quadratic(1.0, -1.0, 0.0).unwrap();
        assert!((0.0..=1.0).contains(&root));

        // x^2 + 1 = 0 has no real roots
        assert_eq!(solve_quadratic(1.0, 0.0, 1.0), None);
    }

    #[test]
    fn solve_cubic_identity_curve() {
        // The bezier time polynomial for c1 = 1/3, c3 = 2/3 is u^3... + u = t,
        // i.e. the identity mapping: the root equals t.
        for &t in &[0.1f32, 0.25, 0.5, 0.75, 0.9] {
            let c1 = 1.0 / 3.0;
            let c3 = 2.0 / 3.0;
            let root = solve_cubic(
                3.0 * (c1 - c3) + 1.0,
                3.0 * (c3 - 2.0 * c1),
                3.0 * c1,
                -t,
            )
            .unwrap();
            assert!((root - t).abs() < 1e-3, "root={root} t={t}");
        }
    }

    #[test]
    fn solve_cubic_zero_rhs_is_zero() {
        assert_eq!(solve_cubic(1.0, -0.5, 0.25, 0.0), Some(0.0));
    }
}

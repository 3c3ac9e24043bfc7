//! Curves tween authored values between two keyframes.

use std::cell::Cell;

use glam::Vec2;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{AnimationError, Result};
use crate::math::interpolator::{
    bezier, cubic, linear, quadratic, quartic, quintic, solve_cubic,
};

/// Easing family of a [`Curve`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveType {
    /// No blending, the value snaps at the keyframe boundary.
    Instant,
    #[default]
    Linear,
    Quadratic,
    Cubic,
    Quartic,
    Quintic,
    Bezier,
}

/// Control values for curves of order higher than linear.
///
/// For the polynomial types `c1..c4` are blend weights for the intermediate
/// control points; for [`CurveType::Bezier`] `(c1, c2)` and `(c3, c4)` are
/// the two control handles of a cubic timing bezier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub c1: f32,
    pub c2: f32,
    pub c3: f32,
    pub c4: f32,
}

impl Constraints {
    pub fn new(c1: f32, c2: f32, c3: f32, c4: f32) -> Self {
        Self { c1, c2, c3, c4 }
    }

    fn is_finite(&self) -> bool {
        self.c1.is_finite() && self.c2.is_finite() && self.c3.is_finite() && self.c4.is_finite()
    }
}

/// Authored rotation direction for angle tweening.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spin {
    /// Rotate so the angle increases (+1 in the authored format).
    #[default]
    Forward,
    /// Rotate so the angle decreases (-1 in the authored format).
    Backward,
    /// Do not tween rotation at all, the start angle is held (0).
    None,
}

/// A tweening curve between one keyframe and the next.
///
/// Stateless except for the cached last bezier root: when the cubic solver
/// hits numerically degenerate constraints, [`Curve::interpolate`] reuses the
/// last successful root instead of failing, trading a one-frame easing error
/// for the absence of visible popping. The cache is intentional hysteresis,
/// owned per curve instance, and never serialized.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Curve {
    #[serde(rename = "type")]
    pub curve_type: CurveType,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(skip)]
    last_bezier_root: Cell<f32>,
}

impl Default for Curve {
    fn default() -> Self {
        Self::new(CurveType::Linear)
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        // The solver cache is transient state, not identity.
        self.curve_type == other.curve_type && self.constraints == other.constraints
    }
}

impl Curve {
    /// Creates a curve of the given type with zeroed constraints.
    pub fn new(curve_type: CurveType) -> Self {
        Self::with_constraints(curve_type, Constraints::default())
    }

    pub fn with_constraints(curve_type: CurveType, constraints: Constraints) -> Self {
        Self {
            curve_type,
            constraints,
            last_bezier_root: Cell::new(0.0),
        }
    }

    /// Checks that the constraints are usable. `context` names the owner in
    /// the error message.
    pub fn validate(&self, context: &str) -> Result<()> {
        if !self.constraints.is_finite() {
            return Err(AnimationError::MalformedCurve {
                context: context.to_string(),
            });
        }
        Ok(())
    }

    /// Tweens from `a` to `b` at normalized progress `t`.
    ///
    /// `t` is expected in `[0, 1]`; out-of-range inputs are not re-clamped.
    pub fn interpolate(&self, a: f32, b: f32, t: f32) -> f32 {
        let c = &self.constraints;
        match self.curve_type {
            CurveType::Instant => a,
            CurveType::Linear => linear(a, b, t),
            CurveType::Quadratic => quadratic(a, linear(a, b, c.c1), b, t),
            CurveType::Cubic => cubic(a, linear(a, b, c.c1), linear(a, b, c.c2), b, t),
            CurveType::Quartic => quartic(
                a,
                linear(a, b, c.c1),
                linear(a, b, c.c2),
                linear(a, b, c.c3),
                b,
                t,
            ),
            CurveType::Quintic => quintic(
                a,
                linear(a, b, c.c1),
                linear(a, b, c.c2),
                linear(a, b, c.c3),
                linear(a, b, c.c4),
                b,
                t,
            ),
            CurveType::Bezier => {
                // Invert the x-bezier to find the parameter whose x equals t,
                // then evaluate the y-bezier there.
                let root = solve_cubic(
                    3.0 * (c.c1 - c.c3) + 1.0,
                    3.0 * (c.c3 - 2.0 * c.c1),
                    3.0 * c.c1,
                    -t,
                );
                let root = match root {
                    Some(root) => {
                        self.last_bezier_root.set(root);
                        root
                    }
                    None => {
                        warn!(
                            "no bezier root for constraints {:?} at t={}, reusing last solution",
                            c, t
                        );
                        self.last_bezier_root.get()
                    }
                };
                linear(a, b, bezier(root, 0.0, c.c2, c.c4, 1.0))
            }
        }
    }

    /// Tweens an angle in degrees, honoring the authored spin direction.
    ///
    /// The spin adjustment picks which of the two equivalent targets
    /// (`b` vs `b ± 360`) is blended toward, and must happen before the
    /// general interpolation.
    pub fn interpolate_angle(&self, a: f32, mut b: f32, t: f32, spin: Spin) -> f32 {
        match spin {
            Spin::Forward => {
                if b - a < 0.0 {
                    b += 360.0;
                }
            }
            Spin::Backward => {
                if b - a > 0.0 {
                    b -= 360.0;
                }
            }
            Spin::None => return a,
        }

        self.interpolate(a, b, t)
    }

    /// Componentwise tween of a 2D vector.
    #[inline]
    pub fn interpolate_vec2(&self, a: Vec2, b: Vec2, t: f32) -> Vec2 {
        Vec2::new(
            self.interpolate(a.x, b.x, t),
            self.interpolate(a.y, b.y, t),
        )
    }
}

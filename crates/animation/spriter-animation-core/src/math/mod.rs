//! Curve evaluation and the easing math behind it.

pub mod curve;
pub mod interpolator;

pub use curve::{Constraints, Curve, CurveType, Spin};

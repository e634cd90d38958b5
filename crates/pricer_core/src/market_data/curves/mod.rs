//! Yield curves for discounting and dividend yields.
//!
//! This module provides:
//! - [`YieldCurve`]: Generic trait for discount factor and rate calculations
//! - [`FlatCurve`]: Constant rate yield curve implementation
//! - [`InterpolatedCurve`]: Pillar-based interpolated yield curve
//! - [`CurveInterpolation`]: Interpolation method selection
//! - [`CurveEnum`]: Static dispatch enum wrapping concrete curve implementations

mod curve_enum;
mod flat;
mod interpolated;
mod traits;

pub use curve_enum::CurveEnum;
pub use flat::FlatCurve;
pub use interpolated::{CurveInterpolation, InterpolatedCurve};
pub use traits::YieldCurve;

//! One-dimensional interpolation.
//!
//! ## Available Interpolators
//!
//! - [`LinearInterpolator`]: Piecewise linear interpolation between data points
//! - [`QuadraticInterpolator`]: Three-point Lagrange interpolation on the
//!   nearest node and its neighbours
//!
//! ## Core Trait
//!
//! Both implement [`Interpolator`]:
//! - `interpolate(x: T) -> Result<T, InterpolationError>`
//! - `domain() -> (T, T)`
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let xs: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
//! let ys = [0.0, 1.0, 4.0, 9.0];
//!
//! let interp = LinearInterpolator::new(&xs, &ys).unwrap();
//! assert_eq!(interp.domain(), (0.0, 3.0));
//!
//! let y = interp.interpolate(1.5).unwrap();
//! assert!((y - 2.5).abs() < 1e-10);
//! ```

mod linear;
mod quadratic;
mod traits;

pub use linear::LinearInterpolator;
pub use quadratic::QuadraticInterpolator;
pub use traits::Interpolator;

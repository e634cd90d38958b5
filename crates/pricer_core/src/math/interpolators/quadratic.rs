//! Three-point Lagrange interpolation.

use super::traits::{out_of_bounds, validate_nodes};
use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Local quadratic interpolator.
///
/// Each query is answered by the Lagrange parabola through the node nearest
/// to `x` and its two neighbours (shifted inwards at the boundary). Exact for
/// quadratics; error O(h³) on smooth data.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, QuadraticInterpolator};
///
/// let xs: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
/// let ys = [0.0, 1.0, 4.0, 9.0];
///
/// let interp = QuadraticInterpolator::new(&xs, &ys).unwrap();
/// assert!((interp.interpolate(1.5).unwrap() - 2.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct QuadraticInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> QuadraticInterpolator<T> {
    /// Construct from at least 3 nodes with strictly increasing abscissae.
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        validate_nodes(xs, ys, 3)?;
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Returns the x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns the y-values.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Centre index of the stencil: nearest node, clamped to `[1, n-2]`.
    fn centre(&self, x: T) -> usize {
        let n = self.xs.len();
        let pos = self.xs.partition_point(|&xi| xi <= x);
        let nearest = if pos == 0 {
            0
        } else if pos >= n {
            n - 1
        } else if (x - self.xs[pos - 1]) <= (self.xs[pos] - x) {
            pos - 1
        } else {
            pos
        };
        nearest.clamp(1, n - 2)
    }
}

impl<T: Float> Interpolator<T> for QuadraticInterpolator<T> {
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if !(x >= x_min && x <= x_max) {
            return Err(out_of_bounds(x, x_min, x_max));
        }

        let i = self.centre(x);
        let (x0, x1, x2) = (self.xs[i - 1], self.xs[i], self.xs[i + 1]);
        let (y0, y1, y2) = (self.ys[i - 1], self.ys[i], self.ys[i + 1]);

        let l0 = (x - x1) * (x - x2) / ((x0 - x1) * (x0 - x2));
        let l1 = (x - x0) * (x - x2) / ((x1 - x0) * (x1 - x2));
        let l2 = (x - x0) * (x - x1) / ((x2 - x0) * (x2 - x1));

        Ok(y0 * l0 + y1 * l1 + y2 * l2)
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

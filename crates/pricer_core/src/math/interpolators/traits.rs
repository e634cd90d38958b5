//! Core interpolation trait.

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolator over a fixed set of nodes.
///
/// Implementations never extrapolate: queries outside [`domain`](Self::domain)
/// fail with `InterpolationError::OutOfBounds`.
pub trait Interpolator<T: Float> {
    /// Interpolated value at `x`.
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Valid query range `(x_min, x_max)`, inclusive.
    fn domain(&self) -> (T, T);

    /// Whether `x` lies inside the domain.
    #[inline]
    fn contains(&self, x: T) -> bool {
        let (lo, hi) = self.domain();
        x >= lo && x <= hi
    }
}

/// Validates node data shared by the interpolators.
///
/// Requires equal lengths, at least `need` points and strictly increasing,
/// finite abscissae.
pub(crate) fn validate_nodes<T: Float>(
    xs: &[T],
    ys: &[T],
    need: usize,
) -> Result<(), InterpolationError> {
    if xs.len() != ys.len() {
        return Err(InterpolationError::InvalidInput(format!(
            "xs and ys must have same length: got {} and {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < need {
        return Err(InterpolationError::InsufficientData {
            got: xs.len(),
            need,
        });
    }
    if let Some(index) = xs.iter().position(|x| !x.is_finite()) {
        return Err(InterpolationError::InvalidInput(format!(
            "non-finite abscissa at index {}",
            index
        )));
    }
    if let Some(i) = (1..xs.len()).find(|&i| xs[i] <= xs[i - 1]) {
        return Err(InterpolationError::NonMonotonicData { index: i });
    }
    Ok(())
}

/// Out-of-bounds error for `x` against `(min, max)`.
pub(crate) fn out_of_bounds<T: Float>(x: T, min: T, max: T) -> InterpolationError {
    InterpolationError::OutOfBounds {
        x: x.to_f64().unwrap_or(f64::NAN),
        min: min.to_f64().unwrap_or(f64::NAN),
        max: max.to_f64().unwrap_or(f64::NAN),
    }
}

//! Interpolated yield curve implementation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use num_traits::Float;

/// Interpolation method for yield curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveInterpolation {
    /// Linear interpolation on zero rates.
    #[default]
    Linear,

    /// Linear interpolation on ln D(t) (piecewise constant forwards).
    LogLinear,
}

/// Pillar-based yield curve.
///
/// Stores (tenor, zero rate) pillars. Outside the pillar range the curve
/// either extrapolates the boundary zero rate flat or fails with
/// `MarketDataError::OutOfBounds`.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, InterpolatedCurve, CurveInterpolation};
///
/// let curve = InterpolatedCurve::<f64>::new(
///     &[0.25, 0.5, 1.0, 2.0, 5.0],
///     &[0.02, 0.025, 0.03, 0.035, 0.04],
///     CurveInterpolation::Linear,
///     false,
/// ).unwrap();
///
/// let r = curve.zero_rate(0.75).unwrap();
/// assert!((r - 0.0275).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedCurve<T: Float> {
    rates: LinearInterpolator<T>,
    log_dfs: LinearInterpolator<T>,
    method: CurveInterpolation,
    allow_extrapolation: bool,
}

impl<T: Float> InterpolatedCurve<T> {
    /// Construct an interpolated curve from pillar points.
    ///
    /// # Arguments
    ///
    /// * `tenors` - Strictly increasing positive tenors in years (at least 2)
    /// * `rates` - Continuously compounded zero rate per tenor
    /// * `method` - Interpolation method
    /// * `allow_extrapolation` - Flat zero-rate extrapolation beyond the pillars
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InsufficientData` - Fewer than 2 pillars or length mismatch
    /// * `MarketDataError::InvalidMaturity` - A non-positive tenor
    /// * `MarketDataError::InvalidRate` - A non-finite rate
    /// * `MarketDataError::Interpolation` - Tenors not strictly increasing
    pub fn new(
        tenors: &[T],
        rates: &[T],
        method: CurveInterpolation,
        allow_extrapolation: bool,
    ) -> Result<Self, MarketDataError> {
        if tenors.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: tenors.len(),
                need: 2,
            });
        }
        if tenors.len() != rates.len() {
            return Err(MarketDataError::InsufficientData {
                got: rates.len(),
                need: tenors.len(),
            });
        }
        if let Some(&t) = tenors.iter().find(|&&t| t <= T::zero()) {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        if let Some(&r) = rates.iter().find(|r| !r.is_finite()) {
            return Err(MarketDataError::InvalidRate {
                rate: r.to_f64().unwrap_or(f64::NAN),
            });
        }

        let log_dfs: Vec<T> = tenors
            .iter()
            .zip(rates)
            .map(|(&tenor, &rate)| -rate * tenor)
            .collect();

        Ok(Self {
            rates: LinearInterpolator::new(tenors, rates)?,
            log_dfs: LinearInterpolator::new(tenors, &log_dfs)?,
            method,
            allow_extrapolation,
        })
    }

    /// Return the pillar range `(t_min, t_max)`.
    #[inline]
    pub fn domain(&self) -> (T, T) {
        self.rates.domain()
    }

    /// Return the interpolation method.
    #[inline]
    pub fn method(&self) -> CurveInterpolation {
        self.method
    }

    /// Return whether extrapolation is allowed.
    #[inline]
    pub fn allow_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    /// Boundary zero rate for `t` outside the pillars, or `None` inside.
    fn extrapolated_rate(&self, t: T) -> Result<Option<T>, MarketDataError> {
        let (t_min, t_max) = self.domain();
        if t >= t_min && t <= t_max {
            return Ok(None);
        }
        if !self.allow_extrapolation {
            return Err(MarketDataError::OutOfBounds {
                x: t.to_f64().unwrap_or(f64::NAN),
                min: t_min.to_f64().unwrap_or(f64::NAN),
                max: t_max.to_f64().unwrap_or(f64::NAN),
            });
        }
        let ys = self.rates.ys();
        Ok(Some(if t < t_min { ys[0] } else { ys[ys.len() - 1] }))
    }
}

impl<T: Float> YieldCurve<T> for InterpolatedCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        if t == T::zero() {
            return Ok(T::one());
        }
        if let Some(rate) = self.extrapolated_rate(t)? {
            return Ok((-rate * t).exp());
        }

        match self.method {
            CurveInterpolation::Linear => Ok((-self.rates.interpolate(t)? * t).exp()),
            CurveInterpolation::LogLinear => Ok(self.log_dfs.interpolate(t)?.exp()),
        }
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        if let Some(rate) = self.extrapolated_rate(t)? {
            return Ok(rate);
        }

        match self.method {
            CurveInterpolation::Linear => Ok(self.rates.interpolate(t)?),
            CurveInterpolation::LogLinear => Ok(-self.log_dfs.interpolate(t)? / t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InterpolationError;
    use approx::assert_relative_eq;

    fn curve(method: CurveInterpolation, extrapolate: bool) -> InterpolatedCurve<f64> {
        InterpolatedCurve::new(&[0.5, 1.0, 2.0], &[0.02, 0.03, 0.04], method, extrapolate)
            .unwrap()
    }

    #[test]
    fn test_new_insufficient_data() {
        let result = InterpolatedCurve::new(&[1.0_f64], &[0.02], CurveInterpolation::Linear, false);
        assert_eq!(
            result.unwrap_err(),
            MarketDataError::InsufficientData { got: 1, need: 2 }
        );
    }

    #[test]
    fn test_new_rejects_unsorted_tenors() {
        let result = InterpolatedCurve::new(
            &[1.0_f64, 0.5, 2.0],
            &[0.02, 0.03, 0.04],
            CurveInterpolation::Linear,
            false,
        );
        assert_eq!(
            result.unwrap_err(),
            MarketDataError::Interpolation(InterpolationError::NonMonotonicData { index: 1 })
        );
    }

    #[test]
    fn test_new_rejects_non_positive_tenor() {
        let result = InterpolatedCurve::new(
            &[0.0_f64, 1.0],
            &[0.02, 0.03],
            CurveInterpolation::Linear,
            false,
        );
        assert!(matches!(
            result,
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }

    #[test]
    fn test_linear_zero_rate_between_pillars() {
        let c = curve(CurveInterpolation::Linear, false);
        assert_relative_eq!(c.zero_rate(1.5).unwrap(), 0.035, epsilon = 1e-14);
        assert_relative_eq!(
            c.discount_factor(1.5).unwrap(),
            (-0.035_f64 * 1.5).exp(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_log_linear_matches_pillars() {
        let c = curve(CurveInterpolation::LogLinear, false);
        assert_relative_eq!(c.zero_rate(1.0).unwrap(), 0.03, epsilon = 1e-14);
        // ln D(1.5) halfway between -0.03 and -0.08
        assert_relative_eq!(
            c.discount_factor(1.5).unwrap(),
            (-0.055_f64).exp(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_out_of_bounds_without_extrapolation() {
        let c = curve(CurveInterpolation::Linear, false);
        assert!(matches!(
            c.discount_factor(3.0),
            Err(MarketDataError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_flat_extrapolation() {
        let c = curve(CurveInterpolation::LogLinear, true);
        assert_relative_eq!(c.zero_rate(0.1).unwrap(), 0.02, epsilon = 1e-14);
        assert_relative_eq!(c.zero_rate(10.0).unwrap(), 0.04, epsilon = 1e-14);
        assert_relative_eq!(
            c.discount_factor(10.0).unwrap(),
            (-0.4_f64).exp(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_discount_factor_at_zero() {
        let c = curve(CurveInterpolation::Linear, false);
        assert_eq!(c.discount_factor(0.0).unwrap(), 1.0);
    }
}

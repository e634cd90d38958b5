//! Flat yield curve implementation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Constant continuously compounded rate.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
///
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
///
/// assert_eq!(curve.zero_rate(1.0).unwrap(), 0.05);
/// assert_eq!(curve.zero_rate(5.0).unwrap(), 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Construct a flat curve with the given constant rate.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// Construct a flat curve, rejecting NaN and infinite rates.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::market_data::curves::FlatCurve;
    ///
    /// assert!(FlatCurve::try_new(0.02_f64).is_ok());
    /// assert!(FlatCurve::try_new(f64::NAN).is_err());
    /// ```
    pub fn try_new(rate: T) -> Result<Self, MarketDataError> {
        if !rate.is_finite() {
            return Err(MarketDataError::InvalidRate {
                rate: rate.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self::new(rate))
    }

    /// Return the constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok((-self.rate * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.rate)
    }

    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t1 < T::zero() || t2 <= t1 {
            return Err(MarketDataError::InvalidMaturity {
                t: (t2 - t1).to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_factor_at_zero_is_one() {
        let curve = FlatCurve::new(0.05_f64);
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_discount_factor_one_year() {
        let curve = FlatCurve::new(0.05_f64);
        assert_relative_eq!(
            curve.discount_factor(1.0).unwrap(),
            (-0.05_f64).exp(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_negative_maturity_rejected() {
        let curve = FlatCurve::new(0.05_f64);
        assert_eq!(
            curve.discount_factor(-0.5).unwrap_err(),
            MarketDataError::InvalidMaturity { t: -0.5 }
        );
    }

    #[test]
    fn test_zero_rate_rejects_zero_maturity() {
        let curve = FlatCurve::new(0.05_f64);
        assert!(curve.zero_rate(0.0).is_err());
    }

    #[test]
    fn test_negative_rate_discount_above_one() {
        let curve = FlatCurve::new(-0.01_f64);
        assert!(curve.discount_factor(2.0).unwrap() > 1.0);
    }

    #[test]
    fn test_try_new_rejects_infinite() {
        assert!(matches!(
            FlatCurve::try_new(f64::INFINITY),
            Err(MarketDataError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_forward_rate_constant() {
        let curve = FlatCurve::new(0.03_f64);
        assert_eq!(curve.forward_rate(0.5, 3.0).unwrap(), 0.03);
        assert!(curve.forward_rate(3.0, 0.5).is_err());
    }
}

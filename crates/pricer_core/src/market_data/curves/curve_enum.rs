//! Static dispatch over the concrete curve types.

use super::{FlatCurve, InterpolatedCurve, YieldCurve};
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Static dispatch enum wrapping concrete yield curve implementations.
///
/// # Variants
///
/// - `Flat`: Constant rate curve
/// - `Interpolated`: Pillar-based curve
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CurveEnum, YieldCurve};
///
/// let curve = CurveEnum::flat(0.05_f64);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub enum CurveEnum<T: Float> {
    /// Flat (constant rate) yield curve
    Flat(FlatCurve<T>),
    /// Interpolated yield curve with pillar points
    Interpolated(InterpolatedCurve<T>),
}

impl<T: Float> CurveEnum<T> {
    /// Create a flat curve variant.
    #[inline]
    pub fn flat(rate: T) -> Self {
        CurveEnum::Flat(FlatCurve::new(rate))
    }

    /// Zero rate to horizon `t`, with `t = 0` mapped to the short end.
    ///
    /// The short end is the forward rate over the first day, so a flat curve
    /// returns its rate at every horizon including zero.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::market_data::curves::CurveEnum;
    ///
    /// let curve = CurveEnum::flat(0.03_f64);
    /// assert_eq!(curve.rate_to(0.0).unwrap(), 0.03);
    /// assert_eq!(curve.rate_to(2.0).unwrap(), 0.03);
    /// ```
    pub fn rate_to(&self, t: T) -> Result<T, MarketDataError> {
        if t == T::zero() {
            let one_day = T::one() / T::from(365.0).unwrap_or_else(T::one);
            return self.forward_rate(T::zero(), one_day);
        }
        self.zero_rate(t)
    }
}

impl<T: Float> YieldCurve<T> for CurveEnum<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.discount_factor(t),
            CurveEnum::Interpolated(curve) => curve.discount_factor(t),
        }
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.zero_rate(t),
            CurveEnum::Interpolated(curve) => curve.zero_rate(t),
        }
    }

    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.forward_rate(t1, t2),
            CurveEnum::Interpolated(curve) => curve.forward_rate(t1, t2),
        }
    }
}

impl<T: Float> From<FlatCurve<T>> for CurveEnum<T> {
    fn from(curve: FlatCurve<T>) -> Self {
        CurveEnum::Flat(curve)
    }
}

impl<T: Float> From<InterpolatedCurve<T>> for CurveEnum<T> {
    fn from(curve: InterpolatedCurve<T>) -> Self {
        CurveEnum::Interpolated(curve)
    }
}

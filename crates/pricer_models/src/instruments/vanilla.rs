//! Vanilla option definitions.

use num_traits::Float;

use super::error::InstrumentError;
use super::exercise::ExerciseStyle;
use super::params::InstrumentParams;
use super::payoff::PayoffType;

/// Vanilla option instrument.
///
/// Combines instrument parameters, payoff type, and exercise style.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{
///     VanillaOption, InstrumentParams, PayoffType, ExerciseStyle,
/// };
///
/// let params = InstrumentParams::new(100.0_f64, 1.0, 1_000.0).unwrap();
/// let option = VanillaOption::new(params, PayoffType::Call, ExerciseStyle::European);
///
/// // notional * (S - K)
/// assert_eq!(option.payoff(110.0), 10_000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VanillaOption<T: Float> {
    params: InstrumentParams<T>,
    payoff_type: PayoffType,
    exercise_style: ExerciseStyle<T>,
}

impl<T: Float> VanillaOption<T> {
    /// Creates a new vanilla option.
    pub fn new(
        params: InstrumentParams<T>,
        payoff_type: PayoffType,
        exercise_style: ExerciseStyle<T>,
    ) -> Self {
        Self {
            params,
            payoff_type,
            exercise_style,
        }
    }

    /// Creates a European option with unit notional.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::{PayoffType, VanillaOption};
    ///
    /// let put = VanillaOption::european(5550.0_f64, 1.0, PayoffType::Put).unwrap();
    /// assert_eq!(put.notional(), 1.0);
    /// assert!(put.exercise_style().is_european());
    /// ```
    pub fn european(
        strike: T,
        expiry: T,
        payoff_type: PayoffType,
    ) -> Result<Self, InstrumentError> {
        let params = InstrumentParams::new(strike, expiry, T::one())?;
        Ok(Self::new(params, payoff_type, ExerciseStyle::European))
    }

    /// Payoff at expiry for `spot`, scaled by notional.
    #[inline]
    pub fn payoff(&self, spot: T) -> T {
        self.params.notional() * self.payoff_type.evaluate(spot, self.params.strike())
    }

    /// Returns a reference to the instrument parameters.
    #[inline]
    pub fn params(&self) -> &InstrumentParams<T> {
        &self.params
    }

    /// Returns the payoff type.
    #[inline]
    pub fn payoff_type(&self) -> PayoffType {
        self.payoff_type
    }

    /// Returns a reference to the exercise style.
    #[inline]
    pub fn exercise_style(&self) -> &ExerciseStyle<T> {
        &self.exercise_style
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> T {
        self.params.strike()
    }

    /// Returns the time to expiry.
    #[inline]
    pub fn expiry(&self) -> T {
        self.params.expiry()
    }

    /// Returns the notional amount.
    #[inline]
    pub fn notional(&self) -> T {
        self.params.notional()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> InstrumentParams<f64> {
        InstrumentParams::new(100.0, 1.0, 2.0).unwrap()
    }

    #[test]
    fn test_new_european_call() {
        let option = VanillaOption::new(params(), PayoffType::Call, ExerciseStyle::European);

        assert_eq!(option.payoff_type(), PayoffType::Call);
        assert!(option.exercise_style().is_european());
        assert_eq!(option.strike(), 100.0);
        assert_eq!(option.expiry(), 1.0);
        assert_eq!(option.notional(), 2.0);
    }

    #[test]
    fn test_payoff_scaled_by_notional() {
        let call = VanillaOption::new(params(), PayoffType::Call, ExerciseStyle::European);
        let put = VanillaOption::new(params(), PayoffType::Put, ExerciseStyle::American);

        assert_eq!(call.payoff(110.0), 20.0);
        assert_eq!(call.payoff(90.0), 0.0);
        assert_eq!(put.payoff(90.0), 20.0);
    }

    #[test]
    fn test_european_rejects_bad_strike() {
        let result = VanillaOption::european(0.0_f64, 1.0, PayoffType::Call);
        assert!(matches!(result, Err(InstrumentError::InvalidStrike { .. })));
    }
}

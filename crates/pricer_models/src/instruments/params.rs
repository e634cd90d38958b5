//! Common instrument parameters.

use num_traits::Float;
use pricer_core::types::{Date, DayCountConvention};

use super::error::InstrumentError;

/// Strike, time to expiry and notional of an option contract.
///
/// All three values must be finite and strictly positive.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentParams;
///
/// let params = InstrumentParams::new(100.0_f64, 1.0, 1_000_000.0).unwrap();
/// assert_eq!(params.strike(), 100.0);
/// assert_eq!(params.expiry(), 1.0);
/// assert_eq!(params.notional(), 1_000_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstrumentParams<T: Float> {
    strike: T,
    expiry: T,
    notional: T,
}

impl<T: Float> InstrumentParams<T> {
    /// Creates new instrument parameters with validation.
    ///
    /// # Arguments
    /// * `strike` - Strike price (must be positive)
    /// * `expiry` - Time to expiry in years (must be positive)
    /// * `notional` - Notional amount (must be positive)
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::InstrumentParams;
    ///
    /// assert!(InstrumentParams::new(100.0_f64, 1.0, 1.0).is_ok());
    /// assert!(InstrumentParams::new(-100.0_f64, 1.0, 1.0).is_err());
    /// assert!(InstrumentParams::new(100.0_f64, f64::NAN, 1.0).is_err());
    /// ```
    pub fn new(strike: T, expiry: T, notional: T) -> Result<Self, InstrumentError> {
        let positive = |x: T| x.is_finite() && x > T::zero();

        if !positive(strike) {
            return Err(InstrumentError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !positive(expiry) {
            return Err(InstrumentError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !positive(notional) {
            return Err(InstrumentError::InvalidNotional {
                notional: notional.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            strike,
            expiry,
            notional,
        })
    }

    /// Creates parameters whose expiry is the year fraction between
    /// `reference` and `maturity` under `day_count`.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::{Date, DayCountConvention};
    /// use pricer_models::instruments::InstrumentParams;
    ///
    /// let today = Date::from_ymd(2024, 1, 1).unwrap();
    /// let maturity = today.add_days(360).unwrap();
    /// let params = InstrumentParams::<f64>::from_dates(
    ///     6000.0,
    ///     today,
    ///     maturity,
    ///     DayCountConvention::Actual360,
    ///     1.0,
    /// )
    /// .unwrap();
    /// assert!((params.expiry() - 1.0).abs() < 1e-12);
    /// ```
    ///
    /// # Errors
    /// `InstrumentError::InvalidExpiry` if `maturity` is not after `reference`.
    pub fn from_dates(
        strike: T,
        reference: Date,
        maturity: Date,
        day_count: DayCountConvention,
        notional: T,
    ) -> Result<Self, InstrumentError> {
        let year_fraction = day_count.year_fraction(reference, maturity);
        let expiry = T::from(year_fraction).ok_or(InstrumentError::InvalidExpiry {
            expiry: year_fraction,
        })?;
        Self::new(strike, expiry, notional)
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns the time to expiry.
    #[inline]
    pub fn expiry(&self) -> T {
        self.expiry
    }

    /// Returns the notional amount.
    #[inline]
    pub fn notional(&self) -> T {
        self.notional
    }
}

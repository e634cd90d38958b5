//! Market data error types.

use crate::types::{InterpolationError, PricingError};
use thiserror::Error;

/// Yield curve construction and lookup errors.
///
/// # Variants
///
/// - `InvalidMaturity`: Negative (or, for rates, non-positive) time
/// - `InvalidRate`: Non-finite rate
/// - `OutOfBounds`: Query outside the pillar range with extrapolation disabled
/// - `Interpolation`: Wrapped interpolation error
/// - `InsufficientData`: Not enough pillars for construction
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity.
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Rate is NaN or infinite.
    #[error("Invalid rate: {rate}")]
    InvalidRate {
        /// The offending rate
        rate: f64,
    },

    /// Query point outside valid domain.
    #[error("Out of bounds: {x} not in [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

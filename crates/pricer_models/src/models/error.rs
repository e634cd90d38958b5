//! Model error types.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::PricingError;
use thiserror::Error;

/// Stochastic model construction and evaluation errors.
///
/// # Variants
/// - `InvalidParameter`: A model parameter is out of its admissible range
/// - `MarketData`: A curve lookup failed
///
/// # Examples
/// ```
/// use pricer_models::models::ModelError;
///
/// let err = ModelError::InvalidParameter {
///     name: "sigma",
///     value: 0.0,
///     reason: "must be positive".to_string(),
/// };
/// assert_eq!(err.to_string(), "Invalid parameter sigma = 0: must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Parameter outside its admissible range.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Constraint that was violated
        reason: String,
    },

    /// Curve lookup failed.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}

impl ModelError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: impl Into<String>) -> Self {
        ModelError::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }
}

impl From<ModelError> for PricingError {
    fn from(err: ModelError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_market_data_error() {
        let err: ModelError = MarketDataError::InvalidMaturity { t: -1.0 }.into();
        assert_eq!(err.to_string(), "Market data error: Invalid maturity: t = -1");
    }

    #[test]
    fn test_into_pricing_error() {
        let err = ModelError::invalid("nu", -0.1, "must be positive");
        assert!(matches!(
            PricingError::from(err),
            PricingError::InvalidInput(_)
        ));
    }
}

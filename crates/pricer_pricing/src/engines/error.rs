//! Engine error types.

use pricer_core::types::{FftError, IntegrationError, PricingError};
use pricer_models::instruments::InstrumentError;
use pricer_models::models::ModelError;
use thiserror::Error;

/// Pricing engine errors.
///
/// # Variants
/// - `InvalidParameter`: Damping or expiry outside the admissible range
/// - `NumericalIntegrationFailure`: Quadrature or truncation did not converge
/// - `StrikeOutOfRange`: Strike outside the FFT grid's interpolation range
/// - `MaturityMismatch`: No usable price curve for the option's maturity
/// - `UnsupportedExercise`: Exercise style other than European
/// - `InvalidConfig`: Engine configuration failed validation
/// - `Instrument`, `Model`, `Fft`: Errors from lower layers
///
/// # Examples
/// ```
/// use pricer_pricing::engines::EngineError;
///
/// let err = EngineError::StrikeOutOfRange { strike: 1e9, min: 20.0, max: 1.8e6 };
/// assert!(err.to_string().contains("1000000000"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Parameter outside its admissible range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numerical integration did not reach its tolerance.
    #[error("Numerical integration failed: {reason} (error estimate {error_estimate:e})")]
    NumericalIntegrationFailure {
        /// What went wrong
        reason: String,
        /// Last error estimate, infinite if none was available
        error_estimate: f64,
    },

    /// Strike cannot be priced off the cached grid.
    #[error("Strike {strike} outside priceable range [{min}, {max}]")]
    StrikeOutOfRange {
        /// Requested strike
        strike: f64,
        /// Smallest priceable strike
        min: f64,
        /// Largest priceable strike
        max: f64,
    },

    /// No price curve is available for the option's maturity.
    #[error("No price curve for expiry {expiry}: {reason}")]
    MaturityMismatch {
        /// Option expiry in years
        expiry: f64,
        /// Why the lookup failed
        reason: String,
    },

    /// Only European exercise is supported.
    #[error("Unsupported exercise style: {style}")]
    UnsupportedExercise {
        /// Name of the rejected style
        style: &'static str,
    },

    /// Invalid engine configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Instrument error.
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    /// Model error.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// FFT error.
    #[error("FFT error: {0}")]
    Fft(#[from] FftError),
}

impl From<IntegrationError> for EngineError {
    fn from(err: IntegrationError) -> Self {
        match err {
            IntegrationError::MaxSubdivisionsExceeded { error_estimate, .. } => {
                EngineError::NumericalIntegrationFailure {
                    reason: err.to_string(),
                    error_estimate,
                }
            }
            IntegrationError::NonFiniteIntegrand { .. } => {
                EngineError::NumericalIntegrationFailure {
                    reason: err.to_string(),
                    error_estimate: f64::INFINITY,
                }
            }
            IntegrationError::InvalidInterval { .. } | IntegrationError::InvalidConfig(_) => {
                EngineError::InvalidConfig(err.to_string())
            }
        }
    }
}

impl From<EngineError> for PricingError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NumericalIntegrationFailure { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            EngineError::UnsupportedExercise { .. } => {
                PricingError::UnsupportedInstrument(err.to_string())
            }
            EngineError::Instrument(inner) => inner.into(),
            EngineError::Model(inner) => inner.into(),
            EngineError::Fft(inner) => inner.into(),
            EngineError::InvalidParameter(_)
            | EngineError::StrikeOutOfRange { .. }
            | EngineError::MaturityMismatch { .. }
            | EngineError::InvalidConfig(_) => PricingError::InvalidInput(err.to_string()),
        }
    }
}

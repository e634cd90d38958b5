//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Workspace-wide pricing error every layer converts into
//! - `DateError`: Errors from date construction and arithmetic
//! - `InterpolationError`: Errors from interpolation operations
//! - `IntegrationError`: Errors from adaptive quadrature
//! - `FftError`: Errors from the discrete Fourier transform driver

use thiserror::Error;

/// Categorised pricing errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode. Layer-specific errors
/// (`MarketDataError`, `InstrumentError`, `ModelError`, `EngineError`)
/// all map into one of these categories.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `NumericalInstability`: Computation failed to converge
/// - `UnsupportedInstrument`: Instrument type not supported by model
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical instability during computation
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Instrument type not supported
    #[error("Unsupported instrument: {0}")]
    UnsupportedInstrument(String),
}

/// Date-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Date arithmetic left the representable range.
    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

/// Interpolation-related errors.
///
/// # Variants
/// - `OutOfBounds`: Query point outside valid interpolation domain
/// - `InsufficientData`: Not enough data points for interpolation
/// - `NonMonotonicData`: Abscissae are not strictly increasing
/// - `InvalidInput`: General invalid input error
///
/// # Examples
/// ```
/// use pricer_core::types::InterpolationError;
///
/// let err = InterpolationError::OutOfBounds { x: 5.0, min: 0.0, max: 3.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Abscissae are not strictly increasing.
    #[error("Data is not monotonic at index {index}")]
    NonMonotonicData {
        /// Index where monotonicity violation was detected
        index: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Adaptive quadrature errors.
///
/// # Variants
/// - `MaxSubdivisionsExceeded`: Error target not met within the subdivision budget
/// - `InvalidInterval`: Integration bounds are not finite or not ordered
/// - `NonFiniteIntegrand`: The integrand returned NaN or infinity
/// - `InvalidConfig`: Tolerances or subdivision budget are unusable
///
/// # Examples
/// ```
/// use pricer_core::types::IntegrationError;
///
/// let err = IntegrationError::MaxSubdivisionsExceeded {
///     subdivisions: 200,
///     error_estimate: 1e-3,
/// };
/// assert!(format!("{}", err).contains("200 subdivisions"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntegrationError {
    /// Error target not reached within the subdivision budget.
    #[error("Failed to converge after {subdivisions} subdivisions (error estimate {error_estimate:e})")]
    MaxSubdivisionsExceeded {
        /// Number of subintervals in use when the budget ran out
        subdivisions: usize,
        /// Global error estimate at that point
        error_estimate: f64,
    },

    /// Integration bounds are not finite or `lower > upper`.
    #[error("Invalid integration interval [{lower}, {upper}]")]
    InvalidInterval {
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// The integrand produced a non-finite value.
    #[error("Integrand is not finite at x = {x}")]
    NonFiniteIntegrand {
        /// Abscissa where the integrand failed
        x: f64,
    },

    /// Quadrature configuration rejected by validation.
    #[error("Invalid quadrature configuration: {0}")]
    InvalidConfig(String),
}

/// Discrete Fourier transform errors.
///
/// # Examples
/// ```
/// use pricer_core::types::FftError;
///
/// let err = FftError::InvalidLength { len: 12 };
/// assert!(format!("{}", err).contains("12"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FftError {
    /// Transform length is not a power of two of at least 2.
    #[error("FFT length must be a power of two >= 2, got {len}")]
    InvalidLength {
        /// Offending length
        len: usize,
    },
}

impl From<IntegrationError> for PricingError {
    fn from(err: IntegrationError) -> Self {
        match err {
            IntegrationError::InvalidInterval { .. } | IntegrationError::InvalidConfig(_) => {
                PricingError::InvalidInput(err.to_string())
            }
            _ => PricingError::NumericalInstability(err.to_string()),
        }
    }
}

impl From<FftError> for PricingError {
    fn from(err: FftError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

impl From<InterpolationError> for PricingError {
    fn from(err: InterpolationError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = PricingError::InvalidInput("Negative spot price".to_string());
        assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
    }

    #[test]
    fn test_numerical_instability_display() {
        let err = PricingError::NumericalInstability("quadrature diverged".to_string());
        assert_eq!(
            format!("{}", err),
            "Numerical instability: quadrature diverged"
        );
    }

    #[test]
    fn test_unsupported_instrument_display() {
        let err = PricingError::UnsupportedInstrument("American".to_string());
        assert_eq!(format!("{}", err), "Unsupported instrument: American");
    }

    #[test]
    fn test_date_error_display() {
        let err = DateError::InvalidDate {
            year: 2024,
            month: 13,
            day: 1,
        };
        assert_eq!(format!("{}", err), "Invalid date: 2024-13-1");
    }

    #[test]
    fn test_interpolation_error_insufficient_data_display() {
        let err = InterpolationError::InsufficientData { got: 1, need: 2 };
        assert_eq!(
            format!("{}", err),
            "Insufficient data points: got 1, need at least 2"
        );
    }

    #[test]
    fn test_integration_error_interval_display() {
        let err = IntegrationError::InvalidInterval {
            lower: 1.0,
            upper: 0.0,
        };
        assert_eq!(format!("{}", err), "Invalid integration interval [1, 0]");
    }

    #[test]
    fn test_integration_error_into_pricing_error() {
        let err = IntegrationError::MaxSubdivisionsExceeded {
            subdivisions: 10,
            error_estimate: 0.5,
        };
        match PricingError::from(err) {
            PricingError::NumericalInstability(msg) => assert!(msg.contains("10 subdivisions")),
            other => panic!("Expected NumericalInstability, got {:?}", other),
        }
    }

    #[test]
    fn test_fft_error_into_pricing_error() {
        let err = FftError::InvalidLength { len: 3 };
        assert!(matches!(
            PricingError::from(err),
            PricingError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = IntegrationError::NonFiniteIntegrand { x: 1.0 };
        let _: &dyn std::error::Error = &err;
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_integration_error_serde_roundtrip() {
            let err = IntegrationError::NonFiniteIntegrand { x: 2.5 };
            let json = serde_json::to_string(&err).unwrap();
            let back: IntegrationError = serde_json::from_str(&json).unwrap();
            assert_eq!(err, back);
        }
    }
}

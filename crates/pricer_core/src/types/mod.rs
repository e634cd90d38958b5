//! Core time and error types.
//!
//! This module provides:
//! - `time`: Date and day count conventions for time-to-expiry calculations
//! - `error`: Structured error types for pricing, date, interpolation,
//!   quadrature and FFT operations
//!
//! # Re-exports
//!
//! - [`Date`], [`DayCountConvention`] from `time`
//! - [`PricingError`], [`DateError`], [`InterpolationError`],
//!   [`IntegrationError`], [`FftError`] from `error`

pub mod error;
pub mod time;

pub use error::{DateError, FftError, IntegrationError, InterpolationError, PricingError};
pub use time::{Date, DayCountConvention};

//! # pricer_core: Numerical foundation for Variance Gamma option pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Error types: `PricingError`, `IntegrationError`, `FftError`, ... (`types::error`)
//! - Time types: `Date`, `DayCountConvention` (`types::time`)
//! - Yield curves for discounting and dividend yields (`market_data`)
//! - Adaptive Gauss-Kronrod quadrature (`math::integrators`)
//! - Forward complex FFT (`math::fft`)
//! - Linear and quadratic interpolation (`math::interpolators`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - num-complex / rustfft: Complex arithmetic and the FFT
//! - chrono: Date arithmetic
//! - thiserror: Error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::curves::{CurveEnum, YieldCurve};
//! use pricer_core::math::integrators::{GaussKronrodIntegrator, QuadratureConfig};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! // Time to expiry
//! let today = Date::from_ymd(2024, 1, 1).unwrap();
//! let expiry = today.add_days(360).unwrap();
//! let t = DayCountConvention::Actual360.year_fraction(today, expiry);
//!
//! // Discounting
//! let curve = CurveEnum::flat(0.05);
//! let df = curve.discount_factor(t).unwrap();
//!
//! // Quadrature
//! let integrator = GaussKronrodIntegrator::new(QuadratureConfig::default()).unwrap();
//! let area = integrator.integrate(|x: f64| 0.05 * (-0.05 * x).exp(), 0.0, t).unwrap();
//! # assert!((1.0 - area.value - df).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for dates, curves, configs and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;

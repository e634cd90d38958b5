//! # Pricer Pricing (Layer 3: Engines)
//!
//! Prices European vanilla options under the Variance Gamma process with two
//! independent Fourier engines built on the Carr-Madan damped call transform:
//!
//! - [`engines::AnalyticVarianceGammaEngine`]: one adaptive Gauss-Kronrod
//!   integral per option
//! - [`engines::FftVarianceGammaEngine`]: one FFT per maturity, cached as a
//!   dense log-strike price curve and interpolated per option
//!
//! Both implement [`engines::PricingEngine`] and agree to well under a cent
//! on index-level strikes.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pricer_core::market_data::curves::CurveEnum;
//! use pricer_models::instruments::{PayoffType, VanillaOption};
//! use pricer_models::models::VarianceGammaProcess;
//! use pricer_pricing::engines::{
//!     AnalyticVarianceGammaEngine, FftVarianceGammaEngine, PricingEngine,
//! };
//!
//! let process = Arc::new(
//!     VarianceGammaProcess::new(
//!         6000.0,
//!         CurveEnum::flat(0.0),
//!         CurveEnum::flat(0.05),
//!         0.20,
//!         0.05,
//!         -0.50,
//!     )
//!     .unwrap(),
//! );
//! let option = VanillaOption::european(6000.0, 1.0, PayoffType::Call).unwrap();
//!
//! let analytic = AnalyticVarianceGammaEngine::new(Arc::clone(&process)).unwrap();
//! let fft = FftVarianceGammaEngine::new(process).unwrap();
//! fft.precalculate(std::slice::from_ref(&option)).unwrap();
//!
//! let a = analytic.npv(&option).unwrap();
//! let b = fft.npv(&option).unwrap();
//! assert!((a - 687.2032).abs() < 0.01);
//! assert!((a - b).abs() < 0.01);
//! ```
//!
//! ## Logging
//!
//! Engines emit `tracing` events (`debug` per batch, per price and per
//! single-option fallback, `trace` per maturity group and truncation step).
//! No subscriber is installed here.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engines;

//! Stochastic process models.
//!
//! - [`VarianceGammaProcess`]: Risk-neutral VG dynamics with term-structure carry
//! - [`VgParams`]: Validated `(sigma, nu, theta)` triple
//! - [`ModelError`]: Construction and evaluation failures
//!
//! ## Example
//!
//! ```
//! use num_complex::Complex;
//! use pricer_core::market_data::curves::CurveEnum;
//! use pricer_models::models::VarianceGammaProcess;
//!
//! let process = VarianceGammaProcess::new(
//!     100.0,
//!     CurveEnum::flat(0.01),
//!     CurveEnum::flat(0.03),
//!     0.2,
//!     0.1,
//!     -0.1,
//! )
//! .unwrap();
//!
//! let phi = process.characteristic_function(Complex::new(1.5, 0.0), 0.5).unwrap();
//! assert!(phi.norm() <= 1.0);
//! ```

pub mod error;
pub mod variance_gamma;

pub use error::ModelError;
pub use variance_gamma::{VarianceGammaProcess, VgParams};

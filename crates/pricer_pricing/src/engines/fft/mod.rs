//! Carr-Madan FFT pricing.
//!
//! - [`FftVarianceGammaEngine`]: Batch engine with a per-maturity curve cache
//! - [`PriceCurve`]: Call prices on a uniform log-moneyness grid
//! - [`FftConfig`], [`StrikeInterpolation`]: Grid and interpolation settings

mod config;
mod curve;
mod engine;

pub use config::{FftConfig, StrikeInterpolation, MIN_GRID_SIZE};
pub use curve::PriceCurve;
pub use engine::FftVarianceGammaEngine;

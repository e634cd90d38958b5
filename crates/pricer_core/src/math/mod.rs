//! Numerical building blocks for the pricing engines.
//!
//! - [`integrators`]: Adaptive Gauss-Kronrod quadrature
//! - [`fft`]: Forward complex FFT with cached plans
//! - [`interpolators`]: Linear and quadratic interpolation on sorted nodes

pub mod fft;
pub mod integrators;
pub mod interpolators;

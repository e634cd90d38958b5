//! Numerical integration on finite intervals.
//!
//! - [`GaussKronrodIntegrator`]: Globally adaptive G7/K15 quadrature
//! - [`QuadratureConfig`]: Tolerances and subdivision budget
//! - [`QuadratureResult`]: Integral value with error and work counters

mod config;
mod gauss_kronrod;

pub use config::QuadratureConfig;
pub use gauss_kronrod::{GaussKronrodIntegrator, QuadratureResult};

//! FFT engine configuration.

use std::f64::consts::PI;

use crate::engines::error::EngineError;
use crate::engines::integrand::DampingPolicy;

/// Smallest accepted grid size.
pub const MIN_GRID_SIZE: usize = 16;

/// How option strikes are read off the log-strike price grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeInterpolation {
    /// Straight line between the two neighbouring nodes.
    Linear,
    /// Three-point Lagrange polynomial on the nearest node and its neighbours.
    #[default]
    Quadratic,
}

/// Configuration for the FFT engine.
///
/// The frequency grid is `v_j = j·eta`, `j = 0..grid_size`, and the
/// log-strike grid spacing is `lambda = 2π / (grid_size·eta)`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::engines::{FftConfig, StrikeInterpolation};
///
/// let config = FftConfig::default()
///     .with_grid_size(4096)
///     .with_interpolation(StrikeInterpolation::Linear);
/// assert!(config.validate().is_ok());
/// assert!((config.lambda() - 2.0 * std::f64::consts::PI / 1024.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FftConfig {
    /// Damping coefficient policy.
    pub damping: DampingPolicy,
    /// Number of grid points N (power of two).
    pub grid_size: usize,
    /// Frequency spacing.
    pub eta: f64,
    /// Strike interpolation scheme.
    pub interpolation: StrikeInterpolation,
    /// Price uncached maturities with a one-off FFT instead of failing.
    pub allow_fallback: bool,
}

impl Default for FftConfig {
    /// Default values:
    /// - `damping`: `Fixed(1.5)`
    /// - `grid_size`: 8192
    /// - `eta`: 0.25
    /// - `interpolation`: `Quadratic`
    /// - `allow_fallback`: true
    fn default() -> Self {
        Self {
            damping: DampingPolicy::default(),
            grid_size: 8192,
            eta: 0.25,
            interpolation: StrikeInterpolation::default(),
            allow_fallback: true,
        }
    }
}

impl FftConfig {
    /// Set the damping policy.
    pub fn with_damping(mut self, damping: DampingPolicy) -> Self {
        self.damping = damping;
        self
    }

    /// Set the grid size.
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Set the frequency spacing.
    pub fn with_eta(mut self, eta: f64) -> Self {
        self.eta = eta;
        self
    }

    /// Set the strike interpolation scheme.
    pub fn with_interpolation(mut self, interpolation: StrikeInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Enable or disable the single-option fallback.
    pub fn with_fallback(mut self, allow_fallback: bool) -> Self {
        self.allow_fallback = allow_fallback;
        self
    }

    /// Log-strike spacing `2π / (N·eta)`.
    #[inline]
    pub fn lambda(&self) -> f64 {
        2.0 * PI / (self.grid_size as f64 * self.eta)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` if:
    /// - `grid_size` is not a power of two or is below 16
    /// - `eta` is not finite and positive
    /// - the damping policy is invalid
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.grid_size < MIN_GRID_SIZE || !self.grid_size.is_power_of_two() {
            return Err(EngineError::InvalidConfig(format!(
                "grid_size = {} must be a power of two >= {}",
                self.grid_size, MIN_GRID_SIZE
            )));
        }
        if !self.eta.is_finite() || self.eta <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "eta = {} must be finite and positive",
                self.eta
            )));
        }
        self.damping.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FftConfig::default();
        assert_eq!(config.grid_size, 8192);
        assert_eq!(config.eta, 0.25);
        assert_eq!(config.interpolation, StrikeInterpolation::Quadratic);
        assert!(config.allow_fallback);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        let config = FftConfig::default().with_grid_size(1000);
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let config = FftConfig::default().with_grid_size(8);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_eta() {
        assert!(FftConfig::default().with_eta(0.0).validate().is_err());
        assert!(FftConfig::default().with_eta(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_damping() {
        let config = FftConfig::default().with_damping(DampingPolicy::Fixed(-0.5));
        assert!(config.validate().is_err());
    }
}

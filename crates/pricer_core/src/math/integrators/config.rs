//! Quadrature configuration types.

use crate::types::IntegrationError;

/// Configuration for adaptive quadrature.
///
/// The integrator stops once the global error estimate satisfies
/// `error <= max(abs_tolerance, rel_tolerance * |integral|)`.
///
/// # Example
///
/// ```
/// use pricer_core::math::integrators::QuadratureConfig;
///
/// let config = QuadratureConfig::default()
///     .with_abs_tolerance(1e-12)
///     .with_max_subdivisions(500);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_subdivisions, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadratureConfig {
    /// Absolute error target.
    pub abs_tolerance: f64,

    /// Relative error target.
    pub rel_tolerance: f64,

    /// Maximum number of subintervals before giving up.
    ///
    /// Exceeding it yields `IntegrationError::MaxSubdivisionsExceeded`.
    pub max_subdivisions: usize,

    /// Number of equal panels the interval is split into before refinement.
    pub initial_panels: usize,
}

impl Default for QuadratureConfig {
    /// Default values:
    /// - `abs_tolerance`: 1e-10
    /// - `rel_tolerance`: 1e-10
    /// - `max_subdivisions`: 2000
    /// - `initial_panels`: 8
    fn default() -> Self {
        Self {
            abs_tolerance: 1e-10,
            rel_tolerance: 1e-10,
            max_subdivisions: 2000,
            initial_panels: 8,
        }
    }
}

impl QuadratureConfig {
    /// Set the absolute error target.
    pub fn with_abs_tolerance(mut self, tolerance: f64) -> Self {
        self.abs_tolerance = tolerance;
        self
    }

    /// Set the relative error target.
    pub fn with_rel_tolerance(mut self, tolerance: f64) -> Self {
        self.rel_tolerance = tolerance;
        self
    }

    /// Set the subdivision budget.
    pub fn with_max_subdivisions(mut self, max_subdivisions: usize) -> Self {
        self.max_subdivisions = max_subdivisions;
        self
    }

    /// Set the number of initial panels.
    pub fn with_initial_panels(mut self, panels: usize) -> Self {
        self.initial_panels = panels;
        self
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// `IntegrationError::InvalidConfig` if a tolerance is negative or not
    /// finite, both tolerances are zero, `initial_panels` is zero, or the
    /// subdivision budget is smaller than `initial_panels`.
    pub fn validate(&self) -> Result<(), IntegrationError> {
        for (name, tol) in [
            ("abs_tolerance", self.abs_tolerance),
            ("rel_tolerance", self.rel_tolerance),
        ] {
            if !tol.is_finite() || tol < 0.0 {
                return Err(IntegrationError::InvalidConfig(format!(
                    "{} must be finite and non-negative, got {}",
                    name, tol
                )));
            }
        }
        if self.abs_tolerance == 0.0 && self.rel_tolerance == 0.0 {
            return Err(IntegrationError::InvalidConfig(
                "at least one tolerance must be positive".to_string(),
            ));
        }
        if self.initial_panels == 0 {
            return Err(IntegrationError::InvalidConfig(
                "initial_panels must be at least 1".to_string(),
            ));
        }
        if self.max_subdivisions < self.initial_panels {
            return Err(IntegrationError::InvalidConfig(format!(
                "max_subdivisions ({}) must be at least initial_panels ({})",
                self.max_subdivisions, self.initial_panels
            )));
        }
        Ok(())
    }
}

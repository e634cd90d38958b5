//! Semi-analytic Variance Gamma engine.
//!
//! Integrates the Carr-Madan damped transform per option on `[0, U]` with
//! adaptive Gauss-Kronrod quadrature. The truncation frequency `U` is found
//! by doubling from 1 until the integrand bound `|ψ(U)|` drops below
//! `cutoff_tolerance`. Short expiries on high `nu` processes decay like a
//! low power of `u`, so `U` can reach several thousand.

use std::cell::Cell;
use std::sync::Arc;

use pricer_core::math::integrators::{GaussKronrodIntegrator, QuadratureConfig, QuadratureResult};
use pricer_models::instruments::VanillaOption;
use pricer_models::models::VarianceGammaProcess;
use tracing::{debug, trace};

use super::error::EngineError;
use super::integrand::{CarrMadanIntegrand, DampingPolicy};
use super::{ensure_european, settle_price, PricingEngine};

/// Configuration for [`AnalyticVarianceGammaEngine`].
///
/// # Examples
/// ```
/// use pricer_core::math::integrators::QuadratureConfig;
/// use pricer_pricing::engines::{AnalyticEngineConfig, DampingPolicy};
///
/// let config = AnalyticEngineConfig::default()
///     .with_damping(DampingPolicy::Auto)
///     .with_quadrature(QuadratureConfig::default().with_max_subdivisions(500));
/// assert!(config.validate().is_ok());
/// assert_eq!(config.cutoff_tolerance, 1e-8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalyticEngineConfig {
    /// Damping coefficient policy.
    pub damping: DampingPolicy,

    /// Adaptive quadrature settings.
    pub quadrature: QuadratureConfig,

    /// Integrand magnitude `|ψ(U)|` below which the integral is truncated.
    pub cutoff_tolerance: f64,

    /// Largest truncation frequency tried before giving up.
    pub max_frequency: f64,
}

impl Default for AnalyticEngineConfig {
    /// Default values:
    /// - `damping`: `Fixed(1.5)`
    /// - `quadrature`: `QuadratureConfig::default()` with 20000 subdivisions
    /// - `cutoff_tolerance`: 1e-8
    /// - `max_frequency`: 1e6
    fn default() -> Self {
        Self {
            damping: DampingPolicy::default(),
            quadrature: QuadratureConfig::default().with_max_subdivisions(20_000),
            cutoff_tolerance: 1e-8,
            max_frequency: 1e6,
        }
    }
}

impl AnalyticEngineConfig {
    /// Set the damping policy.
    pub fn with_damping(mut self, damping: DampingPolicy) -> Self {
        self.damping = damping;
        self
    }

    /// Set the quadrature configuration.
    pub fn with_quadrature(mut self, quadrature: QuadratureConfig) -> Self {
        self.quadrature = quadrature;
        self
    }

    /// Set the truncation tolerance.
    pub fn with_cutoff_tolerance(mut self, tolerance: f64) -> Self {
        self.cutoff_tolerance = tolerance;
        self
    }

    /// Set the frequency cap.
    pub fn with_max_frequency(mut self, max_frequency: f64) -> Self {
        self.max_frequency = max_frequency;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` if:
    /// - the damping policy is invalid
    /// - the quadrature configuration is invalid
    /// - `cutoff_tolerance` is not finite and positive
    /// - `max_frequency` is not finite or below 1
    pub fn validate(&self) -> Result<(), EngineError> {
        self.damping.validate()?;
        self.quadrature
            .validate()
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        if !self.cutoff_tolerance.is_finite() || self.cutoff_tolerance <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "cutoff_tolerance = {} must be finite and positive",
                self.cutoff_tolerance
            )));
        }
        if !self.max_frequency.is_finite() || self.max_frequency < 1.0 {
            return Err(EngineError::InvalidConfig(format!(
                "max_frequency = {} must be finite and at least 1",
                self.max_frequency
            )));
        }
        Ok(())
    }
}

/// Prices European options one at a time by direct integration.
///
/// Stateless apart from its configuration, so one engine can serve any
/// number of threads.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use pricer_core::market_data::curves::CurveEnum;
/// use pricer_models::instruments::{PayoffType, VanillaOption};
/// use pricer_models::models::VarianceGammaProcess;
/// use pricer_pricing::engines::{AnalyticVarianceGammaEngine, PricingEngine};
///
/// let process = VarianceGammaProcess::new(
///     6000.0,
///     CurveEnum::flat(0.02),
///     CurveEnum::flat(0.05),
///     0.15,
///     0.01,
///     -0.50,
/// )
/// .unwrap();
/// let engine = AnalyticVarianceGammaEngine::new(Arc::new(process)).unwrap();
///
/// let call = VanillaOption::european(5550.0, 1.0, PayoffType::Call).unwrap();
/// assert!((engine.npv(&call).unwrap() - 732.8705).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct AnalyticVarianceGammaEngine {
    process: Arc<VarianceGammaProcess>,
    config: AnalyticEngineConfig,
    integrator: GaussKronrodIntegrator,
}

impl AnalyticVarianceGammaEngine {
    /// Creates an engine with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` if the configuration is invalid.
    pub fn new(process: Arc<VarianceGammaProcess>) -> Result<Self, EngineError> {
        Self::with_config(process, AnalyticEngineConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` if `config` is invalid.
    pub fn with_config(
        process: Arc<VarianceGammaProcess>,
        config: AnalyticEngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let integrator = GaussKronrodIntegrator::new(config.quadrature)?;
        Ok(Self {
            process,
            config,
            integrator,
        })
    }

    /// Returns the process being priced.
    #[inline]
    pub fn process(&self) -> &Arc<VarianceGammaProcess> {
        &self.process
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &AnalyticEngineConfig {
        &self.config
    }

    /// Unit-notional call value at `strike` and `expiry`.
    fn call_value(&self, strike: f64, expiry: f64) -> Result<f64, EngineError> {
        let spot = self.process.spot();
        let log_moneyness = (strike / spot).ln();
        let integrand = CarrMadanIntegrand::new(&self.process, expiry, self.config.damping)?;
        let scale = spot * integrand.prefactor(log_moneyness);

        let upper = self.truncation_frequency(&integrand)?;
        let result = self.integrate_checked(|u| integrand.integrand(u, log_moneyness), upper)?;
        let tail_bound = scale * integrand.tail_bound(upper)?;

        debug!(
            strike,
            expiry,
            alpha = integrand.alpha(),
            upper,
            tail_bound,
            subdivisions = result.subdivisions,
            evaluations = result.evaluations,
            error_estimate = result.error_estimate,
            "analytic VG call"
        );
        Ok(scale * result.value)
    }

    /// Smallest `U = 2^n` with `|ψ(U)| < cutoff_tolerance`.
    fn truncation_frequency(
        &self,
        integrand: &CarrMadanIntegrand<'_>,
    ) -> Result<f64, EngineError> {
        let mut upper = 1.0;
        let mut magnitude = integrand.magnitude(upper)?;
        while magnitude.is_nan() || magnitude >= self.config.cutoff_tolerance {
            upper *= 2.0;
            if upper > self.config.max_frequency {
                return Err(EngineError::NumericalIntegrationFailure {
                    reason: format!(
                        "integrand still {:e} at frequency cap {}",
                        magnitude, self.config.max_frequency
                    ),
                    error_estimate: magnitude,
                });
            }
            magnitude = integrand.magnitude(upper)?;
            trace!(upper, magnitude, "truncation search");
        }
        Ok(upper)
    }

    /// Integrates a fallible integrand on `[0, upper]`, returning the first
    /// evaluation error instead of a quadrature failure.
    fn integrate_checked<F>(&self, f: F, upper: f64) -> Result<QuadratureResult, EngineError>
    where
        F: Fn(f64) -> Result<f64, EngineError>,
    {
        let failure: Cell<Option<EngineError>> = Cell::new(None);
        let result = self.integrator.integrate(
            |u| match f(u) {
                Ok(value) => value,
                Err(e) => {
                    let first = failure.take().unwrap_or(e);
                    failure.set(Some(first));
                    f64::NAN
                }
            },
            0.0,
            upper,
        );
        if let Some(e) = failure.into_inner() {
            return Err(e);
        }
        Ok(result?)
    }
}

impl PricingEngine for AnalyticVarianceGammaEngine {
    fn npv(&self, option: &VanillaOption<f64>) -> Result<f64, EngineError> {
        ensure_european(option)?;
        let call = self.call_value(option.strike(), option.expiry())?;
        settle_price(&self.process, option, call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pricer_core::market_data::curves::CurveEnum;
    use pricer_models::instruments::{ExerciseStyle, InstrumentParams, PayoffType};

    fn engine() -> AnalyticVarianceGammaEngine {
        let process = VarianceGammaProcess::new(
            6000.0,
            CurveEnum::flat(0.0),
            CurveEnum::flat(0.05),
            0.20,
            0.05,
            -0.50,
        )
        .unwrap();
        AnalyticVarianceGammaEngine::new(Arc::new(process)).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = AnalyticEngineConfig::default();
        assert_eq!(config.damping, DampingPolicy::Fixed(1.5));
        assert_eq!(config.max_frequency, 1e6);
        assert_eq!(config.quadrature.max_subdivisions, 20_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let bad_cutoff = AnalyticEngineConfig::default().with_cutoff_tolerance(0.0);
        assert!(matches!(bad_cutoff.validate(), Err(EngineError::InvalidConfig(_))));

        let bad_cap = AnalyticEngineConfig::default().with_max_frequency(0.5);
        assert!(matches!(bad_cap.validate(), Err(EngineError::InvalidConfig(_))));

        let bad_quadrature = AnalyticEngineConfig::default()
            .with_quadrature(QuadratureConfig::default().with_max_subdivisions(0));
        assert!(matches!(bad_quadrature.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_atm_call_reference() {
        let option = VanillaOption::european(6000.0, 1.0, PayoffType::Call).unwrap();
        assert_abs_diff_eq!(engine().npv(&option).unwrap(), 687.2032, epsilon = 0.01);
    }

    #[test]
    fn test_put_reference() {
        let option = VanillaOption::european(5550.0, 1.0, PayoffType::Put).unwrap();
        assert_abs_diff_eq!(engine().npv(&option).unwrap(), 234.4870, epsilon = 0.01);
    }

    #[test]
    fn test_short_expiry_on_high_nu_process() {
        // t/ν = 0.2 and 0.1: |ψ| only decays like u^{-2.4} and u^{-2.2}
        let process = VarianceGammaProcess::new(
            100.0,
            CurveEnum::flat(0.0),
            CurveEnum::flat(0.05),
            0.2,
            0.5,
            -0.1,
        )
        .unwrap();
        let engine = AnalyticVarianceGammaEngine::new(Arc::new(process)).unwrap();

        let atm = VanillaOption::european(100.0, 0.1, PayoffType::Call).unwrap();
        assert_abs_diff_eq!(engine.npv(&atm).unwrap(), 2.0871, epsilon = 0.01);

        let shorter = VanillaOption::european(100.0, 0.05, PayoffType::Call).unwrap();
        let price = engine.npv(&shorter).unwrap();
        assert!(price > 0.0 && price < engine.npv(&atm).unwrap());
    }

    #[test]
    fn test_reference_process_two_week_expiry() {
        let option = VanillaOption::european(6000.0, 0.02, PayoffType::Call).unwrap();
        assert_abs_diff_eq!(engine().npv(&option).unwrap(), 65.4655, epsilon = 0.01);
    }

    #[test]
    fn test_integrand_error_is_returned_unchanged() {
        let engine = engine();
        let result = engine.integrate_checked(
            |u| {
                if u > 0.5 {
                    Err(EngineError::InvalidParameter("curve lookup failed".to_string()))
                } else {
                    Ok(1.0)
                }
            },
            1.0,
        );
        assert_eq!(
            result.map(|r| r.value),
            Err(EngineError::InvalidParameter("curve lookup failed".to_string()))
        );
    }

    #[test]
    fn test_notional_scales_price() {
        let engine = engine();
        let unit = VanillaOption::european(6100.0, 1.0, PayoffType::Call).unwrap();
        let params = InstrumentParams::new(6100.0, 1.0, 25.0).unwrap();
        let scaled = VanillaOption::new(params, PayoffType::Call, ExerciseStyle::European);
        assert_abs_diff_eq!(
            engine.npv(&scaled).unwrap(),
            25.0 * engine.npv(&unit).unwrap(),
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_rejects_bermudan() {
        let params = InstrumentParams::new(6000.0, 1.0, 1.0).unwrap();
        let option = VanillaOption::new(
            params,
            PayoffType::Put,
            ExerciseStyle::bermudan(vec![0.5, 1.0]),
        );
        assert_eq!(
            engine().npv(&option),
            Err(EngineError::UnsupportedExercise { style: "Bermudan" })
        );
    }

    #[test]
    fn test_tiny_subdivision_budget_fails() {
        let process = Arc::clone(engine().process());
        let config = AnalyticEngineConfig::default().with_quadrature(
            QuadratureConfig::default()
                .with_initial_panels(1)
                .with_max_subdivisions(1)
                .with_abs_tolerance(1e-15)
                .with_rel_tolerance(1e-15),
        );
        let engine = AnalyticVarianceGammaEngine::with_config(process, config).unwrap();
        let option = VanillaOption::european(6000.0, 1.0, PayoffType::Call).unwrap();
        assert!(matches!(
            engine.npv(&option),
            Err(EngineError::NumericalIntegrationFailure { .. })
        ));
    }

    #[test]
    fn test_frequency_cap_fails() {
        let process = Arc::clone(engine().process());
        let config = AnalyticEngineConfig::default().with_max_frequency(1.0);
        let engine = AnalyticVarianceGammaEngine::with_config(process, config).unwrap();
        let option = VanillaOption::european(6000.0, 1.0, PayoffType::Call).unwrap();
        assert!(matches!(
            engine.npv(&option),
            Err(EngineError::NumericalIntegrationFailure { .. })
        ));
    }

    #[test]
    fn test_inadmissible_damping_rejected() {
        let process = Arc::clone(engine().process());
        let alpha = process.max_damping() + 0.5;
        let config = AnalyticEngineConfig::default().with_damping(DampingPolicy::Fixed(alpha));
        let engine = AnalyticVarianceGammaEngine::with_config(process, config).unwrap();
        let option = VanillaOption::european(6000.0, 1.0, PayoffType::Call).unwrap();
        assert!(matches!(
            engine.npv(&option),
            Err(EngineError::InvalidParameter(_))
        ));
    }
}

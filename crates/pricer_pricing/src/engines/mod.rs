//! Variance Gamma pricing engines.
//!
//! - [`PricingEngine`]: Common `npv` / `npv_many` interface
//! - [`AnalyticVarianceGammaEngine`]: Adaptive quadrature per option
//! - [`FftVarianceGammaEngine`]: One FFT per maturity with a price curve cache
//! - [`CarrMadanIntegrand`], [`DampingPolicy`]: The shared damped transform
//! - [`EngineError`]: Engine failures
//!
//! Both engines price calls from the transform and puts by put-call parity
//! `P = C - S_0 e^{-qt} + K e^{-rt}`, scale by notional and floor at zero.

pub mod analytic;
pub mod error;
pub mod fft;
pub mod integrand;

pub use analytic::{AnalyticEngineConfig, AnalyticVarianceGammaEngine};
pub use error::EngineError;
pub use fft::{FftConfig, FftVarianceGammaEngine, PriceCurve, StrikeInterpolation};
pub use integrand::{CarrMadanIntegrand, DampingPolicy, DEFAULT_DAMPING};

use pricer_models::instruments::{PayoffType, VanillaOption};
use pricer_models::models::VarianceGammaProcess;
use rayon::prelude::*;

/// Prices vanilla options against a fixed process.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use pricer_core::market_data::curves::CurveEnum;
/// use pricer_models::instruments::{PayoffType, VanillaOption};
/// use pricer_models::models::VarianceGammaProcess;
/// use pricer_pricing::engines::{AnalyticVarianceGammaEngine, PricingEngine};
///
/// let process = VarianceGammaProcess::new(
///     100.0,
///     CurveEnum::flat(0.0),
///     CurveEnum::flat(0.02),
///     0.2,
///     0.1,
///     -0.1,
/// )
/// .unwrap();
/// let engine = AnalyticVarianceGammaEngine::new(Arc::new(process)).unwrap();
///
/// let options: Vec<_> = [90.0, 100.0, 110.0]
///     .iter()
///     .map(|&k| VanillaOption::european(k, 0.5, PayoffType::Call).unwrap())
///     .collect();
/// let prices = engine.npv_many(&options);
/// assert!(prices.iter().all(|p| p.is_ok()));
/// ```
pub trait PricingEngine: Send + Sync {
    /// Present value of `option`.
    fn npv(&self, option: &VanillaOption<f64>) -> Result<f64, EngineError>;

    /// Present values of independent options, in input order.
    fn npv_many(&self, options: &[VanillaOption<f64>]) -> Vec<Result<f64, EngineError>> {
        options.par_iter().map(|option| self.npv(option)).collect()
    }
}

pub(crate) fn ensure_european(option: &VanillaOption<f64>) -> Result<(), EngineError> {
    let style = option.exercise_style();
    if style.is_european() {
        Ok(())
    } else {
        Err(EngineError::UnsupportedExercise {
            style: style.name(),
        })
    }
}

/// Turns a unit-notional call value into the option's price.
pub(crate) fn settle_price(
    process: &VarianceGammaProcess,
    option: &VanillaOption<f64>,
    call: f64,
) -> Result<f64, EngineError> {
    let value = match option.payoff_type() {
        PayoffType::Call => call,
        PayoffType::Put => {
            let t = option.expiry();
            call - process.spot() * process.dividend_discount(t)?
                + option.strike() * process.risk_free_discount(t)?
        }
    };
    Ok((option.notional() * value).max(0.0))
}

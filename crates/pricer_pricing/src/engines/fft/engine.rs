//! Batch Carr-Madan FFT engine with a per-maturity price curve cache.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use pricer_models::instruments::VanillaOption;
use pricer_models::models::VarianceGammaProcess;
use rayon::prelude::*;
use tracing::{debug, trace};

use super::config::FftConfig;
use super::curve::PriceCurve;
use crate::engines::error::EngineError;
use crate::engines::{ensure_european, settle_price, PricingEngine};

/// Options of one maturity inside a batch.
struct MaturityGroup {
    expiry: f64,
    min_strike: f64,
    max_strike: f64,
}

/// Prices European options from FFT price curves, one curve per maturity.
///
/// [`precalculate`](Self::precalculate) computes and caches the curves for
/// a batch; [`npv`](PricingEngine::npv) then reads a cached curve. An option
/// whose maturity is not cached is priced with a one-off FFT when
/// `allow_fallback` is set, and rejected with `MaturityMismatch` otherwise.
///
/// Maturities are keyed by exact `f64` equality.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use pricer_core::market_data::curves::CurveEnum;
/// use pricer_models::instruments::{PayoffType, VanillaOption};
/// use pricer_models::models::VarianceGammaProcess;
/// use pricer_pricing::engines::{FftVarianceGammaEngine, PricingEngine};
///
/// let process = VarianceGammaProcess::new(
///     6000.0,
///     CurveEnum::flat(0.0),
///     CurveEnum::flat(0.05),
///     0.20,
///     0.05,
///     -0.50,
/// )
/// .unwrap();
/// let engine = FftVarianceGammaEngine::new(Arc::new(process)).unwrap();
///
/// let options: Vec<_> = (0..5)
///     .map(|i| VanillaOption::european(5800.0 + 100.0 * i as f64, 1.0, PayoffType::Call).unwrap())
///     .collect();
/// engine.precalculate(&options).unwrap();
/// assert!(engine.is_cached(1.0));
///
/// let prices: Vec<f64> = options.iter().map(|o| engine.npv(o).unwrap()).collect();
/// assert!(prices.windows(2).all(|w| w[0] >= w[1]));
/// ```
#[derive(Debug)]
pub struct FftVarianceGammaEngine {
    process: Arc<VarianceGammaProcess>,
    config: FftConfig,
    cache: RwLock<HashMap<u64, PriceCurve>>,
}

impl FftVarianceGammaEngine {
    /// Creates an engine with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` if the configuration is invalid.
    pub fn new(process: Arc<VarianceGammaProcess>) -> Result<Self, EngineError> {
        Self::with_config(process, FftConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` if `config` is invalid.
    pub fn with_config(
        process: Arc<VarianceGammaProcess>,
        config: FftConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            process,
            config,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Returns the process being priced.
    #[inline]
    pub fn process(&self) -> &Arc<VarianceGammaProcess> {
        &self.process
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &FftConfig {
        &self.config
    }

    /// Computes one price curve per distinct maturity in `options` and
    /// replaces the cache with them.
    ///
    /// Maturity groups are computed in parallel outside the cache lock. The
    /// cache is only swapped once every group has succeeded, so a failed
    /// call leaves the previous curves in place. An empty batch clears the
    /// cache.
    ///
    /// # Errors
    ///
    /// * `EngineError::UnsupportedExercise` - an option is not European
    /// * `EngineError::StrikeOutOfRange` - a strike falls outside its
    ///   maturity's grid
    /// * any error from [`PriceCurve::compute`]
    pub fn precalculate(&self, options: &[VanillaOption<f64>]) -> Result<(), EngineError> {
        if options.is_empty() {
            self.clear_cache();
            debug!("empty batch, FFT cache cleared");
            return Ok(());
        }

        let mut groups: HashMap<u64, MaturityGroup> = HashMap::new();
        for option in options {
            ensure_european(option)?;
            let expiry = option.expiry();
            let strike = option.strike();
            groups
                .entry(expiry.to_bits())
                .and_modify(|g| {
                    g.min_strike = g.min_strike.min(strike);
                    g.max_strike = g.max_strike.max(strike);
                })
                .or_insert(MaturityGroup {
                    expiry,
                    min_strike: strike,
                    max_strike: strike,
                });
        }

        debug!(
            options = options.len(),
            maturities = groups.len(),
            "precalculating FFT price curves"
        );

        let spot = self.process.spot();
        let curves = groups
            .into_par_iter()
            .map(|(key, group)| {
                let lo = (group.min_strike / spot).ln();
                let hi = (group.max_strike / spot).ln();
                let centre = 0.5 * (lo + hi);
                let curve = PriceCurve::compute(&self.process, group.expiry, centre, &self.config)?;
                curve.call_price(group.min_strike)?;
                curve.call_price(group.max_strike)?;
                trace!(
                    expiry = group.expiry,
                    min_strike = group.min_strike,
                    max_strike = group.max_strike,
                    "maturity group priced"
                );
                Ok((key, curve))
            })
            .collect::<Result<HashMap<u64, PriceCurve>, EngineError>>()?;

        *self.write_cache() = curves;
        Ok(())
    }

    /// Cached maturities in ascending order.
    pub fn cached_maturities(&self) -> Vec<f64> {
        let mut maturities: Vec<f64> = self.read_cache().values().map(PriceCurve::expiry).collect();
        maturities.sort_by(f64::total_cmp);
        maturities
    }

    /// Whether a curve for exactly `expiry` is cached.
    pub fn is_cached(&self, expiry: f64) -> bool {
        self.read_cache().contains_key(&expiry.to_bits())
    }

    /// Drops every cached curve.
    pub fn clear_cache(&self) {
        self.write_cache().clear();
    }

    fn read_cache(&self) -> RwLockReadGuard<'_, HashMap<u64, PriceCurve>> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, HashMap<u64, PriceCurve>> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Prices one option off a curve centred on its own strike. Never cached.
    fn fallback_call(&self, strike: f64, expiry: f64) -> Result<f64, EngineError> {
        let centre = (strike / self.process.spot()).ln();
        let curve = PriceCurve::compute(&self.process, expiry, centre, &self.config)?;
        curve.call_price(strike)
    }
}

impl PricingEngine for FftVarianceGammaEngine {
    fn npv(&self, option: &VanillaOption<f64>) -> Result<f64, EngineError> {
        ensure_european(option)?;
        let strike = option.strike();
        let expiry = option.expiry();

        let cached = self
            .read_cache()
            .get(&expiry.to_bits())
            .map(|curve| curve.call_price(strike));
        let call = match cached {
            Some(call) => call?,
            None if self.config.allow_fallback => {
                debug!(
                    strike,
                    expiry, "maturity not precalculated, pricing with a single-option FFT"
                );
                self.fallback_call(strike, expiry).map_err(|e| {
                    EngineError::MaturityMismatch {
                        expiry,
                        reason: format!("single-option fallback failed: {}", e),
                    }
                })?
            }
            None => {
                return Err(EngineError::MaturityMismatch {
                    expiry,
                    reason: "maturity not precalculated and fallback disabled".to_string(),
                })
            }
        };

        settle_price(&self.process, option, call)
    }
}

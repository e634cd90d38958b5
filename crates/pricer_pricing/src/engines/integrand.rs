//! Carr-Madan damped call transform.
//!
//! For log-moneyness `k = ln(K / S_0)` and damping `α > 0` the damped call
//! `e^{αk} C(k) / S_0` is square integrable and has Fourier transform
//!
//! ```text
//! ψ(u) = e^{-rt} φ(u - (α + 1) i) / (α² + α - u² + i (2α + 1) u)
//! ```
//!
//! so that
//!
//! ```text
//! C(K) = S_0 · e^{-αk} / π · ∫_0^∞ Re[e^{-iuk} ψ(u)] du
//! ```
//!
//! Both engines evaluate this integral: the analytic engine with adaptive
//! quadrature per strike, the FFT engine on a uniform grid for a strip of
//! strikes.

use std::f64::consts::PI;

use num_complex::Complex;
use pricer_models::models::VarianceGammaProcess;

use super::error::EngineError;

/// Damping used when none is configured.
pub const DEFAULT_DAMPING: f64 = 1.5;

/// How the Carr-Madan damping coefficient `α` is chosen.
///
/// # Examples
/// ```
/// use pricer_pricing::engines::DampingPolicy;
///
/// assert_eq!(DampingPolicy::default(), DampingPolicy::Fixed(1.5));
/// assert!(DampingPolicy::Fixed(-1.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DampingPolicy {
    /// Use the given `α`.
    Fixed(f64),
    /// `α = min(1.5, max_damping / 2)` for the process being priced.
    Auto,
}

impl Default for DampingPolicy {
    fn default() -> Self {
        DampingPolicy::Fixed(DEFAULT_DAMPING)
    }
}

impl DampingPolicy {
    /// Checks the process-independent part of the policy.
    ///
    /// # Errors
    /// `EngineError::InvalidConfig` if a fixed `α` is not finite and positive.
    pub fn validate(&self) -> Result<(), EngineError> {
        match *self {
            DampingPolicy::Fixed(alpha) if !alpha.is_finite() || alpha <= 0.0 => Err(
                EngineError::InvalidConfig(format!("damping alpha = {} must be positive", alpha)),
            ),
            _ => Ok(()),
        }
    }

    /// Resolves `α` for `process`.
    ///
    /// # Errors
    /// `EngineError::InvalidParameter` unless `0 < α < process.max_damping()`.
    pub fn resolve(&self, process: &VarianceGammaProcess) -> Result<f64, EngineError> {
        let max_damping = process.max_damping();
        let alpha = match *self {
            DampingPolicy::Fixed(alpha) => alpha,
            DampingPolicy::Auto => DEFAULT_DAMPING.min(0.5 * max_damping),
        };
        if alpha > 0.0 && alpha < max_damping {
            Ok(alpha)
        } else {
            Err(EngineError::InvalidParameter(format!(
                "damping alpha = {} must lie in (0, {}) for this process",
                alpha, max_damping
            )))
        }
    }
}

/// Damped call transform `ψ` of one process at one expiry.
///
/// Borrows the process; build one per (process, expiry) pair.
#[derive(Debug, Clone)]
pub struct CarrMadanIntegrand<'a> {
    process: &'a VarianceGammaProcess,
    expiry: f64,
    alpha: f64,
    discount: f64,
}

impl<'a> CarrMadanIntegrand<'a> {
    /// Resolves the damping and reads the discount factor to `expiry`.
    ///
    /// # Errors
    /// * `EngineError::InvalidParameter` - `expiry` not finite and positive,
    ///   or inadmissible damping
    /// * `EngineError::Model` - the process cannot be evaluated at `expiry`
    pub fn new(
        process: &'a VarianceGammaProcess,
        expiry: f64,
        damping: DampingPolicy,
    ) -> Result<Self, EngineError> {
        if !expiry.is_finite() || expiry <= 0.0 {
            return Err(EngineError::InvalidParameter(format!(
                "expiry = {} must be finite and positive",
                expiry
            )));
        }
        let alpha = damping.resolve(process)?;
        let discount = process.risk_free_discount(expiry)?;
        let integrand = Self {
            process,
            expiry,
            alpha,
            discount,
        };
        // Curve lookups at a fixed horizon are deterministic, so one probe
        // covers every later evaluation.
        integrand.psi(0.0)?;
        Ok(integrand)
    }

    /// Damping coefficient in use.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Expiry in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Risk-free discount factor to expiry.
    #[inline]
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// `ψ(u)` for real frequency `u`.
    pub fn psi(&self, u: f64) -> Result<Complex<f64>, EngineError> {
        let alpha = self.alpha;
        let shifted = Complex::new(u, -(alpha + 1.0));
        let phi = self.process.characteristic_function(shifted, self.expiry)?;
        let denominator = Complex::new(alpha * alpha + alpha - u * u, (2.0 * alpha + 1.0) * u);
        Ok(phi * self.discount / denominator)
    }

    /// `Re[e^{-iuk} ψ(u)]`.
    pub fn integrand(&self, u: f64, log_moneyness: f64) -> Result<f64, EngineError> {
        let phase = Complex::from_polar(1.0, -u * log_moneyness);
        Ok((phase * self.psi(u)?).re)
    }

    /// `e^{-αk} / π`, the factor in front of the integral.
    #[inline]
    pub fn prefactor(&self, log_moneyness: f64) -> f64 {
        (-self.alpha * log_moneyness).exp() / PI
    }

    /// `|ψ(u)|`, a bound on `|Re[e^{-iuk} ψ(u)]|` for every `k`.
    pub fn magnitude(&self, u: f64) -> Result<f64, EngineError> {
        Ok(self.psi(u)?.norm())
    }

    /// Asymptotic bound on `∫_u^∞ |ψ|`.
    ///
    /// `|φ|` falls off like `u^{-2t/ν}`, so `|ψ|` decays like
    /// `u^{-(2 + 2t/ν)}` and the tail is `u |ψ(u)| / (1 + 2t/ν)`.
    pub fn tail_bound(&self, u: f64) -> Result<f64, EngineError> {
        let decay = 1.0 + 2.0 * self.expiry / self.process.nu();
        Ok(u * self.magnitude(u)? / decay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::CurveEnum;

    fn process() -> VarianceGammaProcess {
        VarianceGammaProcess::new(
            6000.0,
            CurveEnum::flat(0.0),
            CurveEnum::flat(0.05),
            0.20,
            0.05,
            -0.50,
        )
        .unwrap()
    }

    #[test]
    fn test_default_policy() {
        assert_eq!(DampingPolicy::default(), DampingPolicy::Fixed(DEFAULT_DAMPING));
        assert!(DampingPolicy::default().validate().is_ok());
        assert!(DampingPolicy::Auto.validate().is_ok());
    }

    #[test]
    fn test_fixed_policy_rejects_non_positive() {
        assert!(matches!(
            DampingPolicy::Fixed(0.0).validate(),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(DampingPolicy::Fixed(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_auto_policy_caps_at_default() {
        let p = process();
        assert_eq!(DampingPolicy::Auto.resolve(&p).unwrap(), DEFAULT_DAMPING);
    }

    #[test]
    fn test_auto_policy_halves_small_bound() {
        // Large nu and sigma push the moment bound below 3
        let p = VarianceGammaProcess::new(
            100.0,
            CurveEnum::flat(0.0),
            CurveEnum::flat(0.0),
            0.6,
            1.0,
            0.1,
        )
        .unwrap();
        let max = p.max_damping();
        assert!(max < 2.0 * DEFAULT_DAMPING);
        assert_relative_eq!(DampingPolicy::Auto.resolve(&p).unwrap(), 0.5 * max, epsilon = 1e-15);
    }

    #[test]
    fn test_resolve_rejects_alpha_beyond_moment_bound() {
        let p = process();
        let alpha = p.max_damping() + 1.0;
        assert!(matches!(
            DampingPolicy::Fixed(alpha).resolve(&p),
            Err(EngineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_psi_at_zero() {
        // ψ(0) = e^{-rt} E[(S_t/S_0)^{α+1}] / (α² + α)
        let p = process();
        let integrand = CarrMadanIntegrand::new(&p, 1.0, DampingPolicy::Fixed(1.5)).unwrap();
        let moment = p
            .characteristic_function(Complex::new(0.0, -2.5), 1.0)
            .unwrap()
            .re;
        let psi = integrand.psi(0.0).unwrap();
        assert_relative_eq!(psi.re, (-0.05_f64).exp() * moment / 3.75, epsilon = 1e-14);
        assert!(psi.im.abs() < 1e-15);
    }

    #[test]
    fn test_integrand_matches_psi_at_zero_log_moneyness() {
        let p = process();
        let integrand = CarrMadanIntegrand::new(&p, 1.0, DampingPolicy::default()).unwrap();
        for u in [0.5, 3.0, 12.0] {
            assert_relative_eq!(
                integrand.integrand(u, 0.0).unwrap(),
                integrand.psi(u).unwrap().re,
                epsilon = 1e-15
            );
        }
    }

    #[test]
    fn test_magnitude_decays() {
        let p = process();
        let integrand = CarrMadanIntegrand::new(&p, 1.0, DampingPolicy::default()).unwrap();
        let near = integrand.magnitude(4.0).unwrap();
        let far = integrand.magnitude(256.0).unwrap();
        assert!(far < 1e-12 * near);
        for u in [0.5, 7.0, 40.0] {
            let k = 0.3;
            let bound = integrand.magnitude(u).unwrap() * (1.0 + 1e-12);
            assert!(integrand.integrand(u, k).unwrap().abs() <= bound);
        }
    }

    #[test]
    fn test_tail_bound_power_law_on_short_expiry() {
        // t/ν = 0.2: |ψ| ~ u^{-2.4}, so doubling u shrinks the tail by 2^{1.4}
        let p = VarianceGammaProcess::new(
            100.0,
            CurveEnum::flat(0.0),
            CurveEnum::flat(0.05),
            0.2,
            0.5,
            -0.1,
        )
        .unwrap();
        let integrand = CarrMadanIntegrand::new(&p, 0.1, DampingPolicy::default()).unwrap();
        let u = 1e5;
        let bound = integrand.tail_bound(u).unwrap();
        let expected = u * integrand.magnitude(u).unwrap() / 1.4;
        assert_relative_eq!(bound, expected, max_relative = 1e-12);
        let ratio = bound / integrand.tail_bound(2.0 * u).unwrap();
        assert_relative_eq!(ratio, 2.0_f64.powf(1.4), max_relative = 1e-3);
    }

    #[test]
    fn test_prefactor() {
        let p = process();
        let integrand = CarrMadanIntegrand::new(&p, 1.0, DampingPolicy::Fixed(2.0)).unwrap();
        assert_relative_eq!(integrand.prefactor(0.0), 1.0 / PI, epsilon = 1e-15);
        assert_relative_eq!(integrand.prefactor(0.1), (-0.2_f64).exp() / PI, epsilon = 1e-15);
    }

    #[test]
    fn test_rejects_non_positive_expiry() {
        let p = process();
        assert!(matches!(
            CarrMadanIntegrand::new(&p, 0.0, DampingPolicy::default()),
            Err(EngineError::InvalidParameter(_))
        ));
    }
}

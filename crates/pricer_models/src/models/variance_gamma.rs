//! Variance Gamma process.
//!
//! Brownian motion with drift `theta` and volatility `sigma`, run on a Gamma
//! clock with unit mean rate and variance rate `nu`. Under the risk-neutral
//! measure the log-return `s = ln(S_t / S_0)` has characteristic function
//!
//! ```text
//! φ(u) = exp(i u ((r - q) t + ω t)) · (1 - i θ ν u + σ² ν u² / 2)^(-t/ν)
//! ω    = ln(1 - θ ν - σ² ν / 2) / ν
//! ```
//!
//! where `ω` makes `S_t e^{-(r-q)t}` a martingale.

use num_complex::Complex;
use pricer_core::market_data::curves::{CurveEnum, YieldCurve};

use super::error::ModelError;

/// VG shape parameters `(sigma, nu, theta)`.
///
/// # Examples
/// ```
/// use pricer_models::models::VgParams;
///
/// let params = VgParams::new(0.20, 0.05, -0.50).unwrap();
/// assert!((params.omega() - (1.0_f64 + 0.025 - 0.001).ln() / 0.05).abs() < 1e-12);
///
/// // sigma must be positive
/// assert!(VgParams::new(0.0, 0.05, -0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VgParams {
    sigma: f64,
    nu: f64,
    theta: f64,
}

impl VgParams {
    /// Validate and build the parameter set.
    ///
    /// # Errors
    /// `ModelError::InvalidParameter` if `sigma <= 0`, `nu <= 0`, any value is
    /// not finite, or `1 - theta*nu - sigma^2*nu/2 <= 0`.
    pub fn new(sigma: f64, nu: f64, theta: f64) -> Result<Self, ModelError> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ModelError::invalid("sigma", sigma, "must be finite and positive"));
        }
        if !nu.is_finite() || nu <= 0.0 {
            return Err(ModelError::invalid("nu", nu, "must be finite and positive"));
        }
        if !theta.is_finite() {
            return Err(ModelError::invalid("theta", theta, "must be finite"));
        }

        let params = Self { sigma, nu, theta };
        let base = params.martingale_base();
        if base <= 0.0 {
            return Err(ModelError::invalid(
                "theta",
                theta,
                format!(
                    "1 - theta*nu - sigma^2*nu/2 = {} must be positive for a risk-neutral drift",
                    base
                ),
            ));
        }
        Ok(params)
    }

    /// Volatility of the subordinated Brownian motion.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Variance rate of the Gamma time change.
    #[inline]
    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// Drift of the subordinated Brownian motion (skew).
    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    #[inline]
    fn martingale_base(&self) -> f64 {
        1.0 - self.theta * self.nu - 0.5 * self.sigma * self.sigma * self.nu
    }

    /// Martingale correction `ω = ln(1 - θν - σ²ν/2) / ν`.
    #[inline]
    pub fn omega(&self) -> f64 {
        self.martingale_base().ln() / self.nu
    }

    /// Largest damping `α` with `E[S_T^{α+1}] < ∞`.
    ///
    /// The moment `E[e^{p s}]` exists while `1 - θνp - σ²νp²/2 > 0`, i.e. for
    /// `p` below the positive root `p*`; the bound is `p* - 1`.
    pub fn max_damping(&self) -> f64 {
        let a = self.sigma * self.sigma * self.nu;
        let b = self.theta * self.nu;
        let p_star = (-b + (b * b + 2.0 * a).sqrt()) / a;
        p_star - 1.0
    }

    /// `ln(1 - iθνu + σ²νu²/2)` on the principal branch.
    #[inline]
    fn log_base(&self, u: Complex<f64>) -> Complex<f64> {
        let i = Complex::new(0.0, 1.0);
        let base = Complex::new(1.0, 0.0) - i * self.theta * self.nu * u
            + 0.5 * self.sigma * self.sigma * self.nu * u * u;
        base.ln()
    }
}

/// Risk-neutral Variance Gamma process for one underlying.
///
/// Immutable once built. Engines hold it behind an `Arc` and share it
/// across every option they price.
///
/// # Examples
/// ```
/// use num_complex::Complex;
/// use pricer_core::market_data::curves::CurveEnum;
/// use pricer_models::models::VarianceGammaProcess;
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
///
/// // E[S_t] / S_0 = e^{(r - q) t}
/// let growth = process.characteristic_function(Complex::new(0.0, -1.0), 1.0).unwrap();
/// assert!((growth.re - 0.05_f64.exp()).abs() < 1e-12);
/// assert!(growth.im.abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct VarianceGammaProcess {
    spot: f64,
    dividend_curve: CurveEnum<f64>,
    risk_free_curve: CurveEnum<f64>,
    params: VgParams,
}

impl VarianceGammaProcess {
    /// Build a process from spot, curves and raw VG parameters.
    ///
    /// # Errors
    /// `ModelError::InvalidParameter` if `spot` is not finite and positive or
    /// the VG parameters fail [`VgParams::new`].
    pub fn new(
        spot: f64,
        dividend_curve: CurveEnum<f64>,
        risk_free_curve: CurveEnum<f64>,
        sigma: f64,
        nu: f64,
        theta: f64,
    ) -> Result<Self, ModelError> {
        let params = VgParams::new(sigma, nu, theta)?;
        Self::from_params(spot, dividend_curve, risk_free_curve, params)
    }

    /// Build a process from an already validated parameter set.
    pub fn from_params(
        spot: f64,
        dividend_curve: CurveEnum<f64>,
        risk_free_curve: CurveEnum<f64>,
        params: VgParams,
    ) -> Result<Self, ModelError> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(ModelError::invalid("spot", spot, "must be finite and positive"));
        }
        Ok(Self {
            spot,
            dividend_curve,
            risk_free_curve,
            params,
        })
    }

    /// Spot price `S_0`.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// VG shape parameters.
    #[inline]
    pub fn params(&self) -> &VgParams {
        &self.params
    }

    /// Volatility parameter.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.params.sigma
    }

    /// Variance rate parameter.
    #[inline]
    pub fn nu(&self) -> f64 {
        self.params.nu
    }

    /// Drift (skew) parameter.
    #[inline]
    pub fn theta(&self) -> f64 {
        self.params.theta
    }

    /// Continuous dividend yield curve.
    #[inline]
    pub fn dividend_curve(&self) -> &CurveEnum<f64> {
        &self.dividend_curve
    }

    /// Risk-free discount curve.
    #[inline]
    pub fn risk_free_curve(&self) -> &CurveEnum<f64> {
        &self.risk_free_curve
    }

    /// Martingale correction, see [`VgParams::omega`].
    #[inline]
    pub fn omega(&self) -> f64 {
        self.params.omega()
    }

    /// Largest admissible Carr-Madan damping, see [`VgParams::max_damping`].
    #[inline]
    pub fn max_damping(&self) -> f64 {
        self.params.max_damping()
    }

    /// Continuously compounded risk-free zero rate to `t`.
    pub fn risk_free_rate(&self, t: f64) -> Result<f64, ModelError> {
        Ok(self.risk_free_curve.rate_to(check_horizon(t)?)?)
    }

    /// Continuously compounded dividend yield to `t`.
    pub fn dividend_rate(&self, t: f64) -> Result<f64, ModelError> {
        Ok(self.dividend_curve.rate_to(check_horizon(t)?)?)
    }

    /// Risk-free discount factor to `t`.
    pub fn risk_free_discount(&self, t: f64) -> Result<f64, ModelError> {
        Ok(self.risk_free_curve.discount_factor(check_horizon(t)?)?)
    }

    /// Dividend discount factor to `t`.
    pub fn dividend_discount(&self, t: f64) -> Result<f64, ModelError> {
        Ok(self.dividend_curve.discount_factor(check_horizon(t)?)?)
    }

    /// Forward price `S_0 · D_q(t) / D_r(t)`.
    pub fn forward(&self, t: f64) -> Result<f64, ModelError> {
        Ok(self.spot * self.dividend_discount(t)? / self.risk_free_discount(t)?)
    }

    /// Risk-neutral characteristic function of `ln(S_t / S_0)` at `u`.
    ///
    /// `u` may be complex; the engines evaluate it on `Im(u) = -(α + 1)`.
    ///
    /// # Errors
    /// * `ModelError::InvalidParameter` - `t` is not finite
    /// * `ModelError::MarketData` - a curve rejects the horizon (e.g. `t < 0`)
    pub fn characteristic_function(
        &self,
        u: Complex<f64>,
        t: f64,
    ) -> Result<Complex<f64>, ModelError> {
        let t = check_horizon(t)?;
        let carry = (self.dividend_discount(t)? / self.risk_free_discount(t)?).ln();
        let drift = carry + self.omega() * t;

        let i = Complex::new(0.0, 1.0);
        let exponent = i * u * drift - (t / self.params.nu) * self.params.log_base(u);
        Ok(exponent.exp())
    }
}

fn check_horizon(t: f64) -> Result<f64, ModelError> {
    if t.is_finite() {
        Ok(t)
    } else {
        Err(ModelError::invalid("t", t, "horizon must be finite"))
    }
}

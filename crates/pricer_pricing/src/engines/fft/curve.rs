//! Dense call price curve over a log-moneyness grid.

use num_complex::Complex;
use pricer_core::math::fft::fft_forward;
use pricer_core::math::interpolators::{Interpolator, LinearInterpolator, QuadraticInterpolator};
use pricer_core::types::InterpolationError;
use pricer_models::models::VarianceGammaProcess;
use tracing::trace;

use super::config::{FftConfig, StrikeInterpolation};
use crate::engines::error::EngineError;
use crate::engines::integrand::CarrMadanIntegrand;

#[derive(Debug, Clone)]
enum GridInterpolator {
    Linear(LinearInterpolator<f64>),
    Quadratic(QuadraticInterpolator<f64>),
}

impl GridInterpolator {
    fn new(
        method: StrikeInterpolation,
        xs: &[f64],
        ys: &[f64],
    ) -> Result<Self, InterpolationError> {
        Ok(match method {
            StrikeInterpolation::Linear => {
                GridInterpolator::Linear(LinearInterpolator::new(xs, ys)?)
            }
            StrikeInterpolation::Quadratic => {
                GridInterpolator::Quadratic(QuadraticInterpolator::new(xs, ys)?)
            }
        })
    }

    fn interpolate(&self, x: f64) -> Result<f64, InterpolationError> {
        match self {
            GridInterpolator::Linear(inner) => inner.interpolate(x),
            GridInterpolator::Quadratic(inner) => inner.interpolate(x),
        }
    }

    fn nodes(&self) -> (&[f64], &[f64]) {
        match self {
            GridInterpolator::Linear(inner) => (inner.xs(), inner.ys()),
            GridInterpolator::Quadratic(inner) => (inner.xs(), inner.ys()),
        }
    }
}

/// Unit-notional call prices for one process and one expiry on the grid
/// `x_m = x_0 + m·lambda`, `x = ln(K / S_0)`.
///
/// Only `[x_1, x_{N-2}]` is priceable so that every query has a node on
/// each side.
#[derive(Debug, Clone)]
pub struct PriceCurve {
    expiry: f64,
    spot: f64,
    alpha: f64,
    interpolator: GridInterpolator,
}

impl PriceCurve {
    /// Runs one Carr-Madan FFT centred on log-moneyness `centre`.
    ///
    /// With `v_j = j·eta`, Simpson weights
    /// `w_j = eta/3 · (3 + (-1)^{j+1} - δ_{j0})` and
    /// `x_0 = centre - N·lambda/2`, the transform input is
    /// `e^{-i v_j x_0} ψ(v_j) w_j` and the call at node `m` is
    /// `S_0 e^{-α x_m} / π · Re X_m`.
    ///
    /// # Errors
    /// * `EngineError::InvalidConfig` - invalid `config`
    /// * `EngineError::InvalidParameter` - bad expiry or damping
    /// * `EngineError::Model` - the process cannot be evaluated at `expiry`
    /// * `EngineError::Fft` - the transform rejected the grid
    pub fn compute(
        process: &VarianceGammaProcess,
        expiry: f64,
        centre: f64,
        config: &FftConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if !centre.is_finite() {
            return Err(EngineError::InvalidParameter(format!(
                "grid centre = {} must be finite",
                centre
            )));
        }

        let integrand = CarrMadanIntegrand::new(process, expiry, config.damping)?;
        let n = config.grid_size;
        let eta = config.eta;
        let lambda = config.lambda();
        let x0 = centre - 0.5 * n as f64 * lambda;

        let mut values = (0..n)
            .map(|j| {
                let v = j as f64 * eta;
                let sign = if j % 2 == 0 { -1.0 } else { 1.0 };
                let delta = if j == 0 { 1.0 } else { 0.0 };
                let weight = eta / 3.0 * (3.0 + sign - delta);
                let phase = Complex::from_polar(1.0, -v * x0);
                Ok(phase * integrand.psi(v)? * weight)
            })
            .collect::<Result<Vec<Complex<f64>>, EngineError>>()?;

        fft_forward(&mut values)?;

        let spot = process.spot();
        let xs: Vec<f64> = (0..n).map(|m| x0 + m as f64 * lambda).collect();
        let calls: Vec<f64> = xs
            .iter()
            .zip(&values)
            .map(|(&x, z)| spot * integrand.prefactor(x) * z.re)
            .collect();

        trace!(
            expiry,
            centre,
            alpha = integrand.alpha(),
            grid_size = n,
            lambda,
            "computed FFT price curve"
        );

        let interpolator = GridInterpolator::new(config.interpolation, &xs, &calls)
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            expiry,
            spot,
            alpha: integrand.alpha(),
            interpolator,
        })
    }

    /// Expiry in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Damping coefficient the curve was built with.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of grid nodes.
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.interpolator.nodes().0.len()
    }

    /// Log-moneyness grid.
    pub fn log_moneyness(&self) -> &[f64] {
        self.interpolator.nodes().0
    }

    /// Unit-notional call price at each grid node.
    pub fn call_prices(&self) -> &[f64] {
        self.interpolator.nodes().1
    }

    /// Priceable log-moneyness range `[x_1, x_{N-2}]`.
    pub fn log_moneyness_range(&self) -> (f64, f64) {
        let xs = self.log_moneyness();
        (xs[1], xs[xs.len() - 2])
    }

    /// Priceable strike range.
    pub fn strike_range(&self) -> (f64, f64) {
        let (lo, hi) = self.log_moneyness_range();
        (self.spot * lo.exp(), self.spot * hi.exp())
    }

    /// Interpolated unit-notional call price at `strike`.
    ///
    /// # Errors
    /// `EngineError::StrikeOutOfRange` outside [`strike_range`](Self::strike_range).
    pub fn call_price(&self, strike: f64) -> Result<f64, EngineError> {
        let x = (strike / self.spot).ln();
        let (lo, hi) = self.log_moneyness_range();
        let out_of_range = || {
            let (min, max) = self.strike_range();
            EngineError::StrikeOutOfRange { strike, min, max }
        };
        if !(x >= lo && x <= hi) {
            return Err(out_of_range());
        }
        self.interpolator.interpolate(x).map_err(|_| out_of_range())
    }
}

//! Adaptive Gauss-Kronrod quadrature.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::QuadratureConfig;
use crate::types::IntegrationError;

/// Kronrod abscissae on [-1, 1] (positive half, descending; last is the centre).
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

/// 15-point Kronrod weights matching `XGK`.
const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// 7-point Gauss weights on `XGK[1]`, `XGK[3]`, `XGK[5]` and the centre.
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// Outcome of a successful integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureResult {
    /// Integral estimate.
    pub value: f64,
    /// Global error estimate (sum over subintervals).
    pub error_estimate: f64,
    /// Number of subintervals at termination.
    pub subdivisions: usize,
    /// Number of integrand evaluations.
    pub evaluations: usize,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    lower: f64,
    upper: f64,
    value: f64,
    error: f64,
}

// Heap ordering by error estimate only
impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}

/// Globally adaptive G7/K15 integrator.
///
/// Each subinterval is integrated with the 15-point Kronrod rule; the
/// embedded 7-point Gauss rule provides the error estimate. The subinterval
/// with the largest error is bisected until the summed error meets the
/// configured tolerance or the subdivision budget runs out.
///
/// # Example
///
/// ```
/// use pricer_core::math::integrators::{GaussKronrodIntegrator, QuadratureConfig};
///
/// let integrator = GaussKronrodIntegrator::new(QuadratureConfig::default()).unwrap();
/// let result = integrator
///     .integrate(|x: f64| x.sin(), 0.0, std::f64::consts::PI)
///     .unwrap();
/// assert!((result.value - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct GaussKronrodIntegrator {
    config: QuadratureConfig,
}

impl GaussKronrodIntegrator {
    /// Create an integrator after validating `config`.
    pub fn new(config: QuadratureConfig) -> Result<Self, IntegrationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Return the configuration.
    #[inline]
    pub fn config(&self) -> &QuadratureConfig {
        &self.config
    }

    /// Integrate `f` over `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// * `IntegrationError::InvalidInterval` - Bounds not finite or `lower > upper`
    /// * `IntegrationError::NonFiniteIntegrand` - `f` returned NaN or infinity
    /// * `IntegrationError::MaxSubdivisionsExceeded` - Tolerance not reached
    ///   within `max_subdivisions`, or a subinterval became too narrow to split
    pub fn integrate<F>(
        &self,
        f: F,
        lower: f64,
        upper: f64,
    ) -> Result<QuadratureResult, IntegrationError>
    where
        F: Fn(f64) -> f64,
    {
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(IntegrationError::InvalidInterval { lower, upper });
        }
        if lower == upper {
            return Ok(QuadratureResult {
                value: 0.0,
                error_estimate: 0.0,
                subdivisions: 0,
                evaluations: 0,
            });
        }

        let panels = self.config.initial_panels;
        let width = (upper - lower) / panels as f64;
        let mut heap = BinaryHeap::with_capacity(self.config.max_subdivisions + 1);
        let mut evaluations = 0;
        let mut total_value = 0.0;
        let mut total_error = 0.0;

        for i in 0..panels {
            let a = lower + i as f64 * width;
            let b = if i + 1 == panels { upper } else { a + width };
            let segment = kronrod_15(&f, a, b)?;
            evaluations += 15;
            total_value += segment.value;
            total_error += segment.error;
            heap.push(segment);
        }

        loop {
            let tolerance = self
                .config
                .abs_tolerance
                .max(self.config.rel_tolerance * total_value.abs());
            if total_error <= tolerance {
                break;
            }

            let exceeded = IntegrationError::MaxSubdivisionsExceeded {
                subdivisions: heap.len(),
                error_estimate: total_error,
            };
            if heap.len() >= self.config.max_subdivisions {
                return Err(exceeded);
            }
            let Some(worst) = heap.pop() else {
                return Err(exceeded);
            };

            let mid = 0.5 * (worst.lower + worst.upper);
            if mid <= worst.lower || mid >= worst.upper {
                return Err(exceeded);
            }

            let left = kronrod_15(&f, worst.lower, mid)?;
            let right = kronrod_15(&f, mid, worst.upper)?;
            evaluations += 30;

            total_value += left.value + right.value - worst.value;
            total_error += left.error + right.error - worst.error;
            heap.push(left);
            heap.push(right);
        }

        // Re-sum to drop drift from the running totals
        let subdivisions = heap.len();
        let (value, error_estimate) = heap
            .iter()
            .fold((0.0, 0.0), |(v, e), s| (v + s.value, e + s.error));

        Ok(QuadratureResult {
            value,
            error_estimate,
            subdivisions,
            evaluations,
        })
    }
}

/// Applies the G7/K15 pair on `[a, b]` with the QUADPACK error heuristic.
fn kronrod_15<F>(f: &F, a: f64, b: f64) -> Result<Segment, IntegrationError>
where
    F: Fn(f64) -> f64,
{
    let centre = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let eval = |x: f64| -> Result<f64, IntegrationError> {
        let y = f(x);
        if y.is_finite() {
            Ok(y)
        } else {
            Err(IntegrationError::NonFiniteIntegrand { x })
        }
    };

    let f_centre = eval(centre)?;
    let mut result_kronrod = f_centre * WGK[7];
    let mut result_gauss = f_centre * WG[3];
    let mut result_abs = result_kronrod.abs();

    let mut f_left = [0.0; 7];
    let mut f_right = [0.0; 7];

    for j in 0..7 {
        let dx = half * XGK[j];
        let fl = eval(centre - dx)?;
        let fr = eval(centre + dx)?;
        f_left[j] = fl;
        f_right[j] = fr;

        result_kronrod += WGK[j] * (fl + fr);
        result_abs += WGK[j] * (fl.abs() + fr.abs());
        if j % 2 == 1 {
            result_gauss += WG[j / 2] * (fl + fr);
        }
    }

    let mean = 0.5 * result_kronrod;
    let mut result_asc = WGK[7] * (f_centre - mean).abs();
    for j in 0..7 {
        result_asc += WGK[j] * ((f_left[j] - mean).abs() + (f_right[j] - mean).abs());
    }

    let value = result_kronrod * half;
    let result_abs = result_abs * half.abs();
    let result_asc = result_asc * half.abs();

    let mut error = ((result_kronrod - result_gauss) * half).abs();
    if result_asc != 0.0 && error != 0.0 {
        error = result_asc * (1.0_f64).min((200.0 * error / result_asc).powf(1.5));
    }
    if result_abs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        error = error.max(50.0 * f64::EPSILON * result_abs);
    }

    Ok(Segment {
        lower: a,
        upper: b,
        value,
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn integrator() -> GaussKronrodIntegrator {
        GaussKronrodIntegrator::new(QuadratureConfig::default()).unwrap()
    }

    #[test]
    fn test_weights_integrate_constant() {
        let kronrod: f64 = WGK[7] + 2.0 * WGK[..7].iter().sum::<f64>();
        let gauss: f64 = WG[3] + 2.0 * WG[..3].iter().sum::<f64>();
        assert_relative_eq!(kronrod, 2.0, epsilon = 1e-14);
        assert_relative_eq!(gauss, 2.0, epsilon = 1e-14);
    }

    #[test]
    fn test_polynomial_is_exact() {
        // K15 is exact up to degree 22
        let result = integrator()
            .integrate(|x: f64| 7.0 * x.powi(6) - 3.0 * x * x, 0.0, 2.0)
            .unwrap();
        assert_relative_eq!(result.value, 128.0 - 8.0, epsilon = 1e-11);
    }

    #[test]
    fn test_exponential() {
        let result = integrator().integrate(|x: f64| (-x).exp(), 0.0, 10.0).unwrap();
        assert_relative_eq!(result.value, 1.0 - (-10.0_f64).exp(), epsilon = 1e-12);
        assert!(result.error_estimate <= 1e-9);
    }

    #[test]
    fn test_oscillatory_integrand() {
        // ∫_0^{20π} cos(x)^2 dx = 10π
        let result = integrator()
            .integrate(|x: f64| x.cos().powi(2), 0.0, 20.0 * PI)
            .unwrap();
        assert_relative_eq!(result.value, 10.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn test_peaked_integrand_refines() {
        // ∫_{-1}^{1} 1 / (1e-4 + x^2) dx = 2 / 1e-2 * atan(1 / 1e-2)
        let eps2 = 1e-4_f64;
        let exact = 2.0 / eps2.sqrt() * (1.0 / eps2.sqrt()).atan();
        let result = integrator()
            .integrate(|x: f64| 1.0 / (eps2 + x * x), -1.0, 1.0)
            .unwrap();
        assert_relative_eq!(result.value, exact, max_relative = 1e-9);
        assert!(result.subdivisions > QuadratureConfig::default().initial_panels);
    }

    #[test]
    fn test_empty_interval() {
        let result = integrator().integrate(|x: f64| x, 3.0, 3.0).unwrap();
        assert_eq!(result.value, 0.0);
        assert_eq!(result.evaluations, 0);
    }

    #[test]
    fn test_reversed_interval_rejected() {
        assert_eq!(
            integrator().integrate(|x: f64| x, 1.0, 0.0).unwrap_err(),
            IntegrationError::InvalidInterval {
                lower: 1.0,
                upper: 0.0
            }
        );
    }

    #[test]
    fn test_infinite_bound_rejected() {
        assert!(matches!(
            integrator().integrate(|x: f64| x, 0.0, f64::INFINITY),
            Err(IntegrationError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_non_finite_integrand() {
        let result = integrator().integrate(|x: f64| if x > 0.3 { f64::NAN } else { x }, 0.0, 1.0);
        assert!(matches!(
            result,
            Err(IntegrationError::NonFiniteIntegrand { .. })
        ));
    }

    #[test]
    fn test_budget_exhaustion() {
        let config = QuadratureConfig::default()
            .with_abs_tolerance(1e-14)
            .with_rel_tolerance(0.0)
            .with_initial_panels(1)
            .with_max_subdivisions(3);
        let integrator = GaussKronrodIntegrator::new(config).unwrap();
        // Integrable singularity at 0: sqrt(x) needs many bisections
        match integrator.integrate(|x: f64| x.sqrt(), 0.0, 1.0) {
            Err(IntegrationError::MaxSubdivisionsExceeded {
                subdivisions,
                error_estimate,
            }) => {
                assert_eq!(subdivisions, 3);
                assert!(error_estimate > 1e-14);
            }
            other => panic!("Expected MaxSubdivisionsExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = QuadratureConfig::default().with_initial_panels(0);
        assert!(matches!(
            GaussKronrodIntegrator::new(config),
            Err(IntegrationError::InvalidConfig(_))
        ));
    }
}

//! Complex FFT driver on top of rustfft.
//!
//! Plans are cached per length and shared across threads.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::types::FftError;

static FORWARD_PLANS: OnceLock<Mutex<HashMap<usize, Arc<dyn Fft<f64>>>>> = OnceLock::new();

fn forward_plan(n: usize) -> Arc<dyn Fft<f64>> {
    let cache = FORWARD_PLANS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut guard = cache.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(
        guard
            .entry(n)
            .or_insert_with(|| FftPlanner::<f64>::new().plan_fft_forward(n)),
    )
}

/// In-place unnormalised forward DFT, `X_m = Σ_j x_j e^{-2πi jm/N}`.
///
/// # Errors
///
/// `FftError::InvalidLength` unless the length is a power of two >= 2.
///
/// # Example
///
/// ```
/// use num_complex::Complex;
/// use pricer_core::math::fft::fft_forward;
///
/// let mut values = vec![Complex::new(1.0, 0.0); 4];
/// fft_forward(&mut values).unwrap();
/// assert!((values[0].re - 4.0).abs() < 1e-12);
/// assert!(values[1].norm() < 1e-12);
/// ```
pub fn fft_forward(values: &mut [Complex<f64>]) -> Result<(), FftError> {
    let n = values.len();
    if n < 2 || !n.is_power_of_two() {
        return Err(FftError::InvalidLength { len: n });
    }

    let plan = forward_plan(n);
    let mut scratch = vec![Complex::new(0.0, 0.0); plan.get_inplace_scratch_len()];
    plan.process_with_scratch(values, &mut scratch);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn naive_dft(input: &[Complex<f64>]) -> Vec<Complex<f64>> {
        let n = input.len();
        (0..n)
            .map(|m| {
                input
                    .iter()
                    .enumerate()
                    .map(|(j, &x)| {
                        let angle = -2.0 * PI * (j * m) as f64 / n as f64;
                        x * Complex::new(angle.cos(), angle.sin())
                    })
                    .sum()
            })
            .collect()
    }

    #[test]
    fn test_matches_naive_dft() {
        let input: Vec<Complex<f64>> = (0..16)
            .map(|j| Complex::new((j as f64 * 0.7).sin(), (j as f64 * 0.3).cos()))
            .collect();
        let expected = naive_dft(&input);

        let mut actual = input.clone();
        fft_forward(&mut actual).unwrap();

        for (a, e) in actual.iter().zip(&expected) {
            assert!((*a - *e).norm() < 1e-10);
        }
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        let mut values = vec![Complex::new(0.0, 0.0); 12];
        assert_eq!(
            fft_forward(&mut values).unwrap_err(),
            FftError::InvalidLength { len: 12 }
        );
    }

    #[test]
    fn test_rejects_single_point() {
        let mut values = vec![Complex::new(1.0, 0.0)];
        assert!(fft_forward(&mut values).is_err());
    }

    #[test]
    fn test_plan_reuse_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    let mut values = vec![Complex::new(1.0, 0.0); 64];
                    fft_forward(&mut values).map(|_| values[0].re)
                })
            })
            .collect();
        for handle in handles {
            let dc = handle.join().unwrap().unwrap();
            assert!((dc - 64.0).abs() < 1e-10);
        }
    }
}

//! Benchmarks for the Variance Gamma pricing engines.
//!
//! Run with: cargo bench -p pricer_pricing

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pricer_core::market_data::curves::CurveEnum;
use pricer_models::instruments::{PayoffType, VanillaOption};
use pricer_models::models::VarianceGammaProcess;
use pricer_pricing::engines::{
    AnalyticVarianceGammaEngine, FftConfig, FftVarianceGammaEngine, PricingEngine,
};

fn process() -> Arc<VarianceGammaProcess> {
    Arc::new(
        VarianceGammaProcess::new(
            6000.0,
            CurveEnum::flat(0.0),
            CurveEnum::flat(0.05),
            0.20,
            0.05,
            -0.50,
        )
        .unwrap(),
    )
}

fn strip(n: usize, expiry: f64) -> Vec<VanillaOption<f64>> {
    (0..n)
        .map(|i| {
            let strike = 5000.0 + 2000.0 * i as f64 / n as f64;
            VanillaOption::european(strike, expiry, PayoffType::Call).unwrap()
        })
        .collect()
}

fn bench_analytic_single(c: &mut Criterion) {
    let engine = AnalyticVarianceGammaEngine::new(process()).unwrap();
    let option = VanillaOption::european(6000.0, 1.0, PayoffType::Call).unwrap();

    c.bench_function("analytic_vg_single", |b| {
        b.iter(|| engine.npv(black_box(&option)))
    });
}

fn bench_analytic_batch(c: &mut Criterion) {
    let engine = AnalyticVarianceGammaEngine::new(process()).unwrap();
    let mut group = c.benchmark_group("analytic_vg_batch");

    for n in [10usize, 100] {
        let options = strip(n, 1.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &options, |b, opts| {
            b.iter(|| engine.npv_many(black_box(opts)))
        });
    }
    group.finish();
}

fn bench_fft_precalculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft_vg_precalculate");
    group.sample_size(20);

    for grid_size in [1024usize, 4096, 8192] {
        let config = FftConfig::default().with_grid_size(grid_size);
        let engine = FftVarianceGammaEngine::with_config(process(), config).unwrap();
        let options = strip(100, 1.0);
        group.bench_with_input(BenchmarkId::from_parameter(grid_size), &options, |b, opts| {
            b.iter(|| engine.precalculate(black_box(opts)))
        });
    }
    group.finish();
}

fn bench_fft_lookup(c: &mut Criterion) {
    let engine = FftVarianceGammaEngine::new(process()).unwrap();
    let options = strip(100, 1.0);
    engine.precalculate(&options).unwrap();

    c.bench_function("fft_vg_cached_npv_100", |b| {
        b.iter(|| {
            options
                .iter()
                .map(|o| engine.npv(black_box(o)).unwrap_or(0.0))
                .sum::<f64>()
        })
    });
}

criterion_group!(
    benches,
    bench_analytic_single,
    bench_analytic_batch,
    bench_fft_precalculate,
    bench_fft_lookup
);
criterion_main!(benches);

//! Criterion benchmarks for filtergraph effects
//!
//! Run with: cargo bench -p filtergraph-effects
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use filtergraph_core::Filter;
use filtergraph_effects::{AllPass, Comb, Echo, JcRev, LowPass, Reverb};

const SAMPLE_RATE: f64 = 44100.0;
const RUN_LENGTHS: &[usize] = &[64, 512, 4096];

fn generate_test_signal(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE;
            (2.0 * std::f64::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_effect<F: Filter>(c: &mut Criterion, name: &str, mut effect: F) {
    let mut group = c.benchmark_group(name);

    for &len in RUN_LENGTHS {
        let input = generate_test_signal(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter(|| {
                for &x in input {
                    black_box(effect.compute_one_step(black_box(&[x])).unwrap());
                }
            });
        });
    }

    group.finish();
}

fn bench_effects(c: &mut Criterion) {
    bench_effect(c, "echo", Echo::new(22050, 0.6).unwrap());
    bench_effect(c, "comb", Comb::new(441, 0.5).unwrap());
    bench_effect(c, "allpass", AllPass::new(353, 0.3).unwrap());
    bench_effect(c, "lowpass", LowPass::new(88, 0.7133).unwrap());
    bench_effect(c, "reverb", Reverb::new().unwrap());
    bench_effect(c, "jcrev", JcRev::new().unwrap());
}

criterion_group!(benches, bench_effects);
criterion_main!(benches);

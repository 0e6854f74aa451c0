//! Benchmarks for scanline profiles and the row-level analyses built on them

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use phenomask_algorithms::guide::GuideClassifier;
use phenomask_algorithms::lines::{erase_isolated_lines, IsolatedLineParams};
use phenomask_algorithms::profile::ScanlineProfile;
use phenomask_core::Mask;

/// Thin guide over a ragged plant body, with a few horizontal streaks
fn create_test_mask(size: usize) -> Mask {
    let mut mask = Mask::new(size, size);
    let center = size / 2;
    for row in size / 8..size / 3 {
        mask.set(row, center, 255).unwrap();
        mask.set(row, center + 1, 255).unwrap();
    }
    for row in size / 3..size - size / 8 {
        let half = size / 4 + (row * 7 % 13);
        for col in center.saturating_sub(half)..(center + half).min(size) {
            if (row * 31 + col * 17) % 11 != 0 {
                mask.set(row, col, 255).unwrap();
            }
        }
    }
    for row in (size / 16..size / 8).step_by(4) {
        for col in size / 10..size / 4 {
            mask.set(row, col, 255).unwrap();
        }
    }
    mask
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile/build");
    for size in [256, 512, 1024, 2048] {
        let mask = create_test_mask(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| ScanlineProfile::new(black_box(&mask)).area())
        });
    }
    group.finish();
}

fn bench_quantiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile/quantile_features");
    for size in [256, 512, 1024, 2048] {
        let mask = create_test_mask(size);
        let profile = ScanlineProfile::new(&mask);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| profile.quantile_features(black_box(8)).unwrap())
        });
    }
    group.finish();
}

fn bench_isolated_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("lines/erase_isolated");
    let params = IsolatedLineParams::default();
    for size in [256, 512, 1024, 2048] {
        let mask = create_test_mask(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| erase_isolated_lines(black_box(&mask), params.clone()).unwrap())
        });
    }
    group.finish();
}

fn bench_guide(c: &mut Criterion) {
    let mut group = c.benchmark_group("guide/classify");
    let classifier = GuideClassifier::default();
    for size in [256, 512, 1024, 2048] {
        let mask = create_test_mask(size);
        let profile = ScanlineProfile::new(&mask);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| classifier.classify(black_box(&profile)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_quantiles,
    bench_isolated_lines,
    bench_guide
);
criterion_main!(benches);

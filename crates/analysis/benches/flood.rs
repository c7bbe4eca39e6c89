//! Benchmarks for the flood analysis kernels

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use floodgrid_analysis::flood::flood_depth;
use floodgrid_analysis::risk::{evacuation_zones, EvacuationParams};
use floodgrid_core::Raster;

fn create_dem(size: usize) -> Raster<f64> {
    let mut dem = Raster::new(size, size);

    // A varied surface (ridges plus a noise-like pattern)
    for row in 0..size {
        for col in 0..size {
            let base = (row + col) as f64 * 0.1;
            let variation = ((row * 7 + col * 13) % 100) as f64 / 10.0;
            dem.set(row, col, 100.0 + base + variation).unwrap();
        }
    }
    dem
}

fn bench_flood_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_depth");

    for size in [256, 512, 1024, 2048].iter() {
        let dem = create_dem(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| flood_depth(black_box(&dem), 120.0).unwrap())
        });
    }

    group.finish();
}

fn bench_evacuation_zones(c: &mut Criterion) {
    let mut group = c.benchmark_group("evacuation_zones");
    group.sample_size(20);

    for size in [256, 512, 1024].iter() {
        let dem = create_dem(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                evacuation_zones(black_box(&dem), 120.0, EvacuationParams::default()).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_flood_depth, bench_evacuation_zones);
criterion_main!(benches);

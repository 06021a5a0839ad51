//! Benchmarks for the heatmap tile pipeline.
//!
//! Run with: cargo bench --package renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use heatmap_common::{LatLonDeg, LatLonRad, TILE_PIXELS, TILE_SIZE};
use projection::project_tile;
use renderer::{accumulate, filter_points, map_colors, png, render_rgba};
use test_utils::{cluster_around, scatter_points, tile_center, tile_containing, MOSCOW, STREET_ZOOM};

fn to_radians(points: &[LatLonDeg]) -> Vec<LatLonRad> {
    points.iter().map(LatLonDeg::to_radians).collect()
}

fn bench_projection(c: &mut Criterion) {
    let tile = tile_containing(MOSCOW, STREET_ZOOM);
    let mut group = c.benchmark_group("projection");
    group.throughput(Throughput::Elements(TILE_PIXELS as u64));
    group.bench_function("project_tile", |b| b.iter(|| project_tile(black_box(&tile))));
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let tile = tile_containing(MOSCOW, STREET_ZOOM);
    let grid = project_tile(&tile);
    let mut group = c.benchmark_group("filter");

    for count in [1_000usize, 10_000, 100_000] {
        let points = to_radians(&scatter_points(count, 1));
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, pts| {
            b.iter(|| filter_points(black_box(&grid), black_box(pts)))
        });
    }
    group.finish();
}

fn bench_density(c: &mut Criterion) {
    let tile = tile_containing(MOSCOW, STREET_ZOOM);
    let grid = project_tile(&tile);
    let mut group = c.benchmark_group("density");

    for count in [10usize, 100, 1_000] {
        let points = to_radians(&cluster_around(tile_center(&tile), count, 0.8));
        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, pts| {
            b.iter(|| accumulate(black_box(&grid), black_box(pts)))
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let tile = tile_containing(MOSCOW, STREET_ZOOM);
    let grid = project_tile(&tile);
    let points = to_radians(&cluster_around(tile_center(&tile), 200, 0.8));
    let pixels = map_colors(&accumulate(&grid, &points));

    let mut group = c.benchmark_group("png");
    group.throughput(Throughput::Bytes(pixels.len() as u64));
    group.bench_function("auto", |b| {
        b.iter(|| png::create_png_auto(black_box(&pixels), TILE_SIZE, TILE_SIZE))
    });
    group.bench_function("rgba", |b| {
        b.iter(|| png::create_png(black_box(&pixels), TILE_SIZE, TILE_SIZE))
    });
    group.finish();
}

fn bench_full_tile(c: &mut Criterion) {
    let tile = tile_containing(MOSCOW, STREET_ZOOM);
    let points = to_radians(&cluster_around(MOSCOW, 500, 1.0));

    c.bench_function("render_rgba_street_tile", |b| {
        b.iter(|| render_rgba(black_box(&tile), black_box(&points)))
    });
}

criterion_group!(
    benches,
    bench_projection,
    bench_filter,
    bench_density,
    bench_encode,
    bench_full_tile
);
criterion_main!(benches);

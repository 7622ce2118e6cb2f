// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Analyzer benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use meshqa::analysis::{
    analyze_boundary, count_components, detect_self_intersections, flux_integrity, EdgeIncidence,
};
use meshqa::geometry::{Primitive, TriMesh};
use nalgebra::Vector3;

fn spheres() -> Vec<(u32, TriMesh)> {
    [16, 32, 64, 128]
        .into_iter()
        .map(|segments| (segments, Primitive::sphere(10.0, segments).to_mesh()))
        .collect()
}

fn bench_topology(c: &mut Criterion) {
    let mut group = c.benchmark_group("topology");

    for (segments, mesh) in spheres() {
        group.bench_with_input(BenchmarkId::new("boundary", segments), &mesh, |b, mesh| {
            b.iter(|| {
                let incidence = EdgeIncidence::build(black_box(mesh)).unwrap();
                analyze_boundary(mesh, &incidence).unwrap()
            });
        });
        group.bench_with_input(BenchmarkId::new("components", segments), &mesh, |b, mesh| {
            b.iter(|| count_components(black_box(mesh)));
        });
        group.bench_with_input(BenchmarkId::new("flux", segments), &mesh, |b, mesh| {
            b.iter(|| flux_integrity(black_box(mesh)).unwrap());
        });
    }

    group.finish();
}

fn bench_self_intersection(c: &mut Criterion) {
    let mut group = c.benchmark_group("self_intersection");
    group.sample_size(20);

    for (segments, mesh) in spheres() {
        group.bench_with_input(BenchmarkId::new("sphere", segments), &mesh, |b, mesh| {
            b.iter(|| detect_self_intersections(black_box(mesh)).unwrap());
        });
    }

    // Two overlapping spheres: many narrow-phase hits
    let mut overlapping = Primitive::sphere(10.0, 64).to_mesh();
    let mut other = Primitive::sphere(10.0, 64).to_mesh();
    other.translate(5.0, 0.0, 0.0);
    overlapping.merge(&other);
    group.bench_function("overlapping_spheres_64", |b| {
        b.iter(|| detect_self_intersections(black_box(&overlapping)).unwrap());
    });

    let cube = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), true).to_mesh();
    group.bench_function("cube", |b| {
        b.iter(|| detect_self_intersections(black_box(&cube)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_topology, bench_self_intersection);
criterion_main!(benches);

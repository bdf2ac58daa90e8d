// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polytable::geometry::{cuboid_mesh, taper_z, warp_top};
use polytable::{create_low_poly_table, validate_table, InMemoryScene, TableParameters, TableReport};
use nalgebra::Vector3;

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");

    group.bench_function("cuboid_taper_warp", |b| {
        b.iter(|| {
            let mut mesh = cuboid_mesh(black_box(Vector3::new(1.2, 1.2, 0.08)));
            taper_z(&mut mesh, black_box(0.9), 1.0);
            warp_top(&mut mesh, black_box(0.008));
            mesh
        });
    });

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for splay in [0.0, 5.0, 20.0] {
        let params = TableParameters {
            leg_splay_deg: splay,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::new("table", splay), &params, |b, params| {
            b.iter(|| {
                let mut scene = InMemoryScene::new();
                create_low_poly_table(&mut scene, black_box(params)).unwrap()
            });
        });
    }

    // Rebuilding into a populated scene exercises the collection clear
    group.bench_function("rebuild", |b| {
        let mut scene = InMemoryScene::new();
        let params = TableParameters::default();
        b.iter(|| create_low_poly_table(&mut scene, black_box(&params)).unwrap());
    });

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    let params = TableParameters::default();
    let mut scene = InMemoryScene::new();
    let assembly = create_low_poly_table(&mut scene, &params).unwrap();

    group.bench_function("validate_table", |b| {
        b.iter(|| validate_table(black_box(&scene), black_box(&assembly), &params));
    });

    group.bench_function("report", |b| {
        b.iter(|| TableReport::from_scene(black_box(&scene), &assembly).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_primitives, bench_build, bench_validate);
criterion_main!(benches);

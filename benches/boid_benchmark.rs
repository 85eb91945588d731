/*
 * Boid Simulation Benchmark
 *
 * This file contains benchmarks for the flocking engine to identify performance bottlenecks.
 * It measures the key operations separately: rebuilding the spatial grid, the parallel
 * force phase on its own, and complete ticks including commit.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

use toroidal_boids::{FlockWeights, Simulation, SimulationParams, SpatialGrid};

const WORLD_WIDTH: f32 = 1920.0;
const WORLD_HEIGHT: f32 = 1080.0;
const DT: f32 = 1.0 / 60.0;
const POPULATIONS: [usize; 4] = [1_000, 5_000, 10_000, 20_000];

// Benchmark the spatial grid operations
fn bench_spatial_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_grid");
    let params = SimulationParams::default();

    for num_boids in POPULATIONS.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), num_boids, |b, &n| {
            let mut rng = ChaCha8Rng::seed_from_u64(n as u64);
            let positions: Vec<Vec2> = (0..n)
                .map(|_| Vec2::new(rng.gen_range(0.0..WORLD_WIDTH), rng.gen_range(0.0..WORLD_HEIGHT)))
                .collect();
            let mut grid = SpatialGrid::new(
                WORLD_WIDTH,
                WORLD_HEIGHT,
                params.cell_size,
                params.hash_table_size,
                params.initial_cell_capacity,
            )
            .unwrap();

            b.iter(|| {
                grid.rebuild(positions.iter().copied().enumerate());
                black_box(grid.len());
            });
        });
    }

    group.finish();
}

// Benchmark the force calculations (separation, alignment, cohesion)
fn bench_force_calculations(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_calculations");

    for num_boids in POPULATIONS.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), num_boids, |b, &n| {
            let mut sim =
                Simulation::seeded(SimulationParams::default(), WORLD_WIDTH, WORLD_HEIGHT, n, 7).unwrap();
            b.iter(|| {
                black_box(sim.compute_updates(DT, FlockWeights::default()).len());
            });
        });
    }

    group.finish();
}

// Benchmark the overall update loop
fn bench_update_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_loop");

    for parallel in [true, false] {
        for num_boids in POPULATIONS.iter() {
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, num_boids), num_boids, |b, &n| {
                let params = SimulationParams {
                    enable_parallel: parallel,
                    ..SimulationParams::default()
                };
                let mut sim = Simulation::seeded(params, WORLD_WIDTH, WORLD_HEIGHT, n, 7).unwrap();
                b.iter(|| {
                    black_box(sim.tick(DT, FlockWeights::default()));
                });
            });
        }
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_spatial_grid, bench_force_calculations, bench_update_loop
}

criterion_main!(benches);

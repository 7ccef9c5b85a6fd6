/*
 * Particle Flow Benchmark
 *
 * Benchmarks for the hot paths of a simulation tick: sampling the noise
 * field, updating the whole pool, and reconciling the pool size after the
 * particle count changes.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use particle_flow::physics::flow_noise;
use particle_flow::{MotionMode, ParticlePool, RuntimeInputs, SimulationConfig, Viewport};

fn viewport() -> Viewport {
    Viewport::new(1920.0, 1080.0)
}

// Benchmark sampling the noise field
fn bench_flow_noise(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let points: Vec<Vec2> = (0..1000)
        .map(|_| vec2(rng.gen_range(0.0..1920.0), rng.gen_range(0.0..1080.0)))
        .collect();

    c.bench_function("flow_noise_1000", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for p in &points {
                sum += flow_noise(p.x * 0.005, p.y * 0.005, black_box(1.5));
            }
            black_box(sum)
        });
    });
}

// Benchmark one update of every particle, per motion mode
fn bench_update_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_pool");

    for mode in [MotionMode::FlowDrift, MotionMode::OnCamera, MotionMode::Flocking] {
        for num_particles in [100, 500, 1000, 2000].iter() {
            let id = BenchmarkId::new(format!("{:?}", mode), num_particles);
            group.bench_with_input(id, num_particles, |b, &n| {
                let mut rng = StdRng::seed_from_u64(42);
                let config = SimulationConfig {
                    particle_count: n,
                    motion_mode: mode,
                    ..Default::default()
                };
                let mut inputs = RuntimeInputs::new(viewport());
                inputs.pointer = Some(vec2(960.0, 540.0));
                let mut pool = ParticlePool::filled(&config, mode, &viewport(), &mut rng);

                b.iter(|| {
                    inputs.advance_clock();
                    let mut drawn = 0usize;
                    pool.update_each(&config, &inputs, mode, &mut rng, |_| drawn += 1);
                    black_box(drawn)
                });
            });
        }
    }

    group.finish();
}

// Benchmark growing and shrinking the pool
fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");

    for num_particles in [100, 500, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_particles), num_particles, |b, &n| {
            let mut rng = StdRng::seed_from_u64(3);
            let config = SimulationConfig::default();
            let mut pool = ParticlePool::new();

            b.iter(|| {
                pool.reconcile(n, &config, MotionMode::FlowDrift, &viewport(), &mut rng);
                pool.reconcile(0, &config, MotionMode::FlowDrift, &viewport(), &mut rng);
                black_box(pool.len())
            });
        });
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
    targets = bench_flow_noise, bench_update_pool, bench_reconcile
}

criterion_main!(benches);
